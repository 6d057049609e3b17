//! Use-Case: Equipment- und Verbindungs-Selektion per Klick.

use crate::app::AppState;
use crate::core::{EngineError, ValidationError};

/// Selektiert genau ein Equipment (Verbindungs-Auswahl wird aufgehoben).
pub fn select_equipamento(state: &mut AppState, equipment_id: &str) -> Result<(), EngineError> {
    let Some(diagram) = state.diagram.as_ref() else {
        return Err(ValidationError::NoDiagram.into());
    };
    if !diagram.contains_equipment(equipment_id) {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    }

    state.selection.clear();
    state
        .selection
        .equipment_ids_mut()
        .insert(equipment_id.to_string());
    log::debug!("Equipment {} selektiert", equipment_id);
    Ok(())
}

/// Selektiert eine Verbindung; erneuter Klick auf dieselbe hebt die Auswahl auf.
pub fn select_connection(state: &mut AppState, connection_id: &str) -> Result<(), EngineError> {
    let Some(diagram) = state.diagram.as_ref() else {
        return Err(ValidationError::NoDiagram.into());
    };
    if diagram.connection(connection_id).is_none() {
        return Err(ValidationError::UnknownConnection(connection_id.to_string()).into());
    }

    let already_selected = state.selection.connection_ids.len() == 1
        && state.selection.connection_ids.contains(connection_id);
    state.selection.clear();
    if already_selected {
        log::debug!("Verbindung {} abgewählt", connection_id);
    } else {
        state
            .selection
            .connection_ids_mut()
            .insert(connection_id.to_string());
        log::debug!("Verbindung {} selektiert", connection_id);
    }
    Ok(())
}

/// Hebt jede Selektion auf.
pub fn clear_selection(state: &mut AppState) {
    state.selection.clear();
}
