use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::payload::{apply_layout, CreateDiagramRequest, DiagramSnapshot, LayoutPayload};
use super::DiagramService;
use crate::core::{Diagram, EngineError, ValidationError};

#[derive(Debug, Default)]
struct MemoryStore {
    diagrams: HashMap<String, DiagramSnapshot>,
    fail_saves: bool,
    put_count: usize,
    last_payload: Option<LayoutPayload>,
}

/// Diagramm-Service im Arbeitsspeicher.
///
/// Klone teilen sich denselben Speicher, so kann ein Test den Stand nach
/// dem Speichern über seinen eigenen Klon prüfen.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiagramService {
    store: Arc<Mutex<MemoryStore>>,
}

impl InMemoryDiagramService {
    /// Leerer Service.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryStore>, EngineError> {
        self.store
            .lock()
            .map_err(|_| EngineError::network("In-Memory-Speicher vergiftet"))
    }

    /// Legt einen Stand ab (überschreibt vorhandene).
    pub fn insert(&self, snapshot: DiagramSnapshot) {
        if let Ok(mut store) = self.lock() {
            store.diagrams.insert(snapshot.diagrama.id.clone(), snapshot);
        }
    }

    /// Aktueller Stand eines Diagramms.
    pub fn snapshot(&self, diagram_id: &str) -> Option<DiagramSnapshot> {
        self.lock().ok()?.diagrams.get(diagram_id).cloned()
    }

    /// Lässt alle folgenden `put_layout`-Aufrufe fehlschlagen.
    pub fn set_fail_saves(&self, fail: bool) {
        if let Ok(mut store) = self.lock() {
            store.fail_saves = fail;
        }
    }

    /// Anzahl erfolgreicher Layout-Speicherungen.
    pub fn put_count(&self) -> usize {
        self.lock().map(|s| s.put_count).unwrap_or(0)
    }

    /// Zuletzt erfolgreich gespeichertes Payload.
    pub fn last_payload(&self) -> Option<LayoutPayload> {
        self.lock().ok()?.last_payload.clone()
    }
}

impl DiagramService for InMemoryDiagramService {
    fn fetch_diagram(&self, diagram_id: &str) -> Result<DiagramSnapshot, EngineError> {
        self.lock()?
            .diagrams
            .get(diagram_id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound {
                id: diagram_id.to_string(),
            })
    }

    fn create_diagram(&self, request: &CreateDiagramRequest) -> Result<Diagram, EngineError> {
        let mut store = self.lock()?;
        if store.diagrams.contains_key(&request.id) {
            return Err(ValidationError::DuplicateDiagram(request.id.clone()).into());
        }
        let diagram = request.to_diagram();
        store
            .diagrams
            .insert(diagram.id.clone(), DiagramSnapshot::empty(diagram.clone()));
        Ok(diagram)
    }

    fn put_layout(&self, payload: &LayoutPayload) -> Result<(), EngineError> {
        let mut store = self.lock()?;
        if store.fail_saves {
            return Err(EngineError::network("Backend nicht erreichbar"));
        }
        let snapshot = store
            .diagrams
            .get_mut(&payload.diagrama_id)
            .ok_or_else(|| EngineError::NotFound {
                id: payload.diagrama_id.clone(),
            })?;
        apply_layout(snapshot, payload);
        store.put_count += 1;
        store.last_payload = Some(payload.clone());
        Ok(())
    }
}
