use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::payload::{apply_layout, CreateDiagramRequest, DiagramSnapshot, LayoutPayload};
use super::DiagramService;
use crate::core::{Diagram, EngineError, ValidationError};

/// Diagramm-Service über einem Verzeichnis mit `<id>.json`-Dateien.
///
/// Schreibzugriffe gehen über eine temporäre Datei plus `rename`, ein
/// abgebrochener Schreibvorgang hinterlässt also den alten Stand.
#[derive(Debug, Clone)]
pub struct JsonDirectoryService {
    root: PathBuf,
}

impl JsonDirectoryService {
    /// Service über dem Verzeichnis (wird beim ersten Schreiben angelegt).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Basisverzeichnis.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, diagram_id: &str) -> Result<PathBuf, EngineError> {
        let valid = !diagram_id.is_empty()
            && diagram_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EngineError::network(format!(
                "Ungültige Diagramm-ID für Dateiablage: '{}'",
                diagram_id
            )));
        }
        Ok(self.root.join(format!("{}.json", diagram_id)))
    }

    fn read(&self, diagram_id: &str) -> Result<DiagramSnapshot, EngineError> {
        let path = self.path_for(diagram_id)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EngineError::NotFound {
                    id: diagram_id.to_string(),
                })
            }
            Err(e) => return Err(EngineError::network(e)),
        };
        serde_json::from_str(&content).map_err(|e| {
            EngineError::network(format!("{} fehlerhaft: {}", path.display(), e))
        })
    }

    fn write(&self, snapshot: &DiagramSnapshot) -> Result<(), EngineError> {
        let path = self.path_for(&snapshot.diagrama.id)?;
        fs::create_dir_all(&self.root).map_err(EngineError::network)?;
        let content = serde_json::to_string_pretty(snapshot).map_err(EngineError::network)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(EngineError::network)?;
        fs::rename(&tmp, &path).map_err(EngineError::network)?;
        log::debug!("Diagramm geschrieben: {}", path.display());
        Ok(())
    }
}

impl DiagramService for JsonDirectoryService {
    fn fetch_diagram(&self, diagram_id: &str) -> Result<DiagramSnapshot, EngineError> {
        self.read(diagram_id)
    }

    fn create_diagram(&self, request: &CreateDiagramRequest) -> Result<Diagram, EngineError> {
        if self.path_for(&request.id)?.exists() {
            return Err(ValidationError::DuplicateDiagram(request.id.clone()).into());
        }
        let diagram = request.to_diagram();
        self.write(&DiagramSnapshot::empty(diagram.clone()))?;
        Ok(diagram)
    }

    fn put_layout(&self, payload: &LayoutPayload) -> Result<(), EngineError> {
        let mut snapshot = self.read(&payload.diagrama_id)?;
        apply_layout(&mut snapshot, payload);
        self.write(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::EquipmentLayout;

    fn fresh_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_create_put_fetch() {
        let dir = fresh_dir("test_unifilar_json_dir");
        let service = JsonDirectoryService::new(&dir);
        service
            .create_diagram(&CreateDiagramRequest {
                id: "d1".into(),
                nome: "Usina".into(),
                descricao: Some("Teste".into()),
                unidade_id: "u1".into(),
            })
            .unwrap();

        let junction = crate::core::Equipment::junction("junction-1", glam::Vec2::new(3.0, 4.0));
        service
            .put_layout(&LayoutPayload {
                diagrama_id: "d1".into(),
                equipamentos: vec![EquipmentLayout::from_equipment(&junction)],
                conexoes: vec![],
            })
            .unwrap();

        let snapshot = service.fetch_diagram("d1").unwrap();
        assert_eq!(snapshot.diagrama.nome, "Usina");
        assert_eq!(snapshot.equipamentos.len(), 1);
        assert!(snapshot.equipamentos[0].is_junction());
        assert!(!dir.join("d1.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_fehlende_datei_ist_not_found() {
        let service = JsonDirectoryService::new(fresh_dir("test_unifilar_json_leer"));
        assert!(service.fetch_diagram("d9").unwrap_err().is_not_found());
    }

    #[test]
    fn test_pfad_ids_werden_abgelehnt() {
        let service = JsonDirectoryService::new(fresh_dir("test_unifilar_json_pfad"));
        assert!(matches!(
            service.fetch_diagram("../etc/passwd"),
            Err(EngineError::Network(_))
        ));
    }
}
