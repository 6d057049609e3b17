//! Handler für Laden, Anlegen und Speichern.

use crate::app::use_cases;
use crate::app::AppState;
use crate::persistence::{CreateDiagramRequest, PersistenceGateway};
use crate::shared::EditorMode;

/// Lädt ein Diagramm über das Gateway.
pub fn load(
    state: &mut AppState,
    gateway: &PersistenceGateway,
    diagram_id: &str,
    mode: Option<EditorMode>,
) -> anyhow::Result<()> {
    use_cases::persistence::load_diagram(state, gateway, diagram_id, mode)?;
    Ok(())
}

/// Legt ein leeres Diagramm an und öffnet es.
pub fn create(
    state: &mut AppState,
    gateway: &PersistenceGateway,
    request: CreateDiagramRequest,
) -> anyhow::Result<()> {
    use_cases::persistence::create_diagram(state, gateway, &request)?;
    Ok(())
}

/// Speichert das aktuelle Layout synchron.
pub fn save(state: &mut AppState, gateway: &PersistenceGateway) -> anyhow::Result<()> {
    use_cases::persistence::save_layout(state, gateway)?;
    Ok(())
}
