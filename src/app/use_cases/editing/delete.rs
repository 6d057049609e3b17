//! Use-Case: Selektion kaskadierend löschen.

use crate::app::use_cases::layout;
use crate::app::AppState;
use crate::core::EngineError;
use crate::shared::EditorMode;

use super::diagram_mut;

/// Löscht alle selektierten Verbindungen und Equipments.
///
/// Verbindungen der gelöschten Equipments werden mit entfernt.
pub fn delete_selection(state: &mut AppState) -> Result<(), EngineError> {
    if state.editor.mode() != EditorMode::Edit {
        return Err(state.editor.forbid("delete_selection").into());
    }
    if state.selection.is_empty() {
        return Ok(());
    }

    let connection_ids: Vec<String> = state.selection.connection_ids.iter().cloned().collect();
    let equipment_ids: Vec<String> = state.selection.equipment_ids.iter().cloned().collect();

    let diagram = diagram_mut(state)?;
    let mut removed_connections = 0;
    for id in &connection_ids {
        if diagram.remove_connection(id).is_some() {
            removed_connections += 1;
        }
    }
    let mut removed_equipment = 0;
    for id in &equipment_ids {
        if let Some((_, cascaded)) = diagram.remove_equipment(id) {
            removed_equipment += 1;
            removed_connections += cascaded.len();
        }
    }

    if let Some(dragged) = state.editor.drag().dragging_equipment_id() {
        if equipment_ids.iter().any(|id| id == dragged) {
            state.editor.take_drag();
        }
    }
    state.selection.clear();

    if removed_connections + removed_equipment > 0 {
        layout::recompute(state);
        state.mark_changed();
    }
    log::info!(
        "{} Equipment(s) und {} Verbindung(en) gelöscht",
        removed_equipment,
        removed_connections
    );
    Ok(())
}
