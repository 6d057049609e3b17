use super::payload::{CreateDiagramRequest, DiagramSnapshot, LayoutPayload};
use super::InMemoryDiagramService;
use crate::core::{Diagram, EngineError};

/// Abstraktion über das Diagramm-Backend (REST, Datei, Speicher).
///
/// Implementierungen dürfen blockieren; der Aufrufer entscheidet, ob er
/// über [`prepare_save`](crate::app::use_cases::persistence::prepare_save)
/// und `finish_save` asynchron speichert.
pub trait DiagramService {
    /// Lädt Metadaten, Equipments und Verbindungen eines Diagramms.
    fn fetch_diagram(&self, diagram_id: &str) -> Result<DiagramSnapshot, EngineError>;

    /// Legt ein leeres Diagramm an.
    fn create_diagram(&self, request: &CreateDiagramRequest) -> Result<Diagram, EngineError>;

    /// Ersetzt das gespeicherte Layout atomar.
    fn put_layout(&self, payload: &LayoutPayload) -> Result<(), EngineError>;
}

/// Einstiegspunkt der Engine für alle Backend-Zugriffe.
pub struct PersistenceGateway {
    service: Box<dyn DiagramService>,
}

impl PersistenceGateway {
    /// Erstellt ein Gateway über dem gegebenen Service.
    pub fn new(service: impl DiagramService + 'static) -> Self {
        Self {
            service: Box::new(service),
        }
    }

    /// Gateway über einem leeren In-Memory-Service.
    pub fn in_memory() -> Self {
        Self::new(InMemoryDiagramService::default())
    }

    /// Lädt ein Diagramm.
    pub fn load(&self, diagram_id: &str) -> Result<DiagramSnapshot, EngineError> {
        log::info!("Lade Diagramm {}", diagram_id);
        let snapshot = self.service.fetch_diagram(diagram_id)?;
        log::info!(
            "Diagramm {} geladen: {} Equipments, {} Verbindungen",
            diagram_id,
            snapshot.equipamentos.len(),
            snapshot.conexoes.len()
        );
        Ok(snapshot)
    }

    /// Legt ein leeres Diagramm an.
    pub fn create(&self, request: &CreateDiagramRequest) -> Result<Diagram, EngineError> {
        log::info!("Lege Diagramm {} an", request.id);
        self.service.create_diagram(request)
    }

    /// Speichert das Layout.
    pub fn save_layout(&self, payload: &LayoutPayload) -> Result<(), EngineError> {
        log::info!(
            "Speichere Layout {}: {} Equipments, {} Verbindungen",
            payload.diagrama_id,
            payload.equipamentos.len(),
            payload.conexoes.len()
        );
        self.service.put_layout(payload).map_err(|e| {
            log::error!("Speichern von {} fehlgeschlagen: {}", payload.diagrama_id, e);
            e
        })
    }
}

impl Default for PersistenceGateway {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway").finish_non_exhaustive()
    }
}
