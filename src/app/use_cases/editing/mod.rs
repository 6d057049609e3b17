//! Use-Case-Funktionen für Equipment- und Verbindungs-Editing.
//!
//! Aufgeteilt nach Operation:
//! - `equipment` — Equipment platzieren, entfernen, Position/Label ändern
//! - `connect` — Verbindungs-Protokoll (start/finish/cancel) und Entfernen
//! - `delete` — Selektion kaskadierend löschen
//! - `mode` — Moduswechsel view/edit

mod connect;
mod delete;
mod equipment;
mod mode;

pub use connect::{
    cancel_connecting, finish_connecting, remove_conexao, start_connecting, ConnectTarget,
};
pub use delete::delete_selection;
pub use equipment::{
    add_equipamento, remove_equipamento, set_label_position, update_equipamento_label_offset,
    update_equipamento_position,
};
pub use mode::{set_mode, set_snap_to_grid};

use crate::app::AppState;
use crate::core::{DiagramModel, ValidationError};
use std::sync::Arc;

/// Mutable Sicht auf das Diagramm (CoW über `Arc::make_mut`).
fn diagram_mut(state: &mut AppState) -> Result<&mut DiagramModel, ValidationError> {
    state
        .diagram
        .as_mut()
        .map(Arc::make_mut)
        .ok_or(ValidationError::NoDiagram)
}

/// Entfernt IDs aus der Selektion, ohne unnötig zu klonen.
fn deselect(state: &mut AppState, equipment_id: Option<&str>, connection_ids: &[String]) {
    if let Some(id) = equipment_id {
        if state.selection.equipment_ids.contains(id) {
            state.selection.equipment_ids_mut().shift_remove(id);
        }
    }
    for id in connection_ids {
        if state.selection.connection_ids.contains(id) {
            state.selection.connection_ids_mut().shift_remove(id);
        }
    }
}
