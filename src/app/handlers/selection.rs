//! Handler für Selektion und Zieh-Gesten.

use crate::app::use_cases;
use crate::app::AppState;
use glam::Vec2;

/// Selektiert ein Equipment exklusiv.
pub fn select_equipment(state: &mut AppState, equipment_id: &str) -> anyhow::Result<()> {
    use_cases::selection::select_equipamento(state, equipment_id)?;
    Ok(())
}

/// Selektiert eine Verbindung (oder hebt die Selektion auf).
pub fn select_connection(state: &mut AppState, connection_id: &str) -> anyhow::Result<()> {
    use_cases::selection::select_connection(state, connection_id)?;
    Ok(())
}

/// Hebt die Selektion auf.
pub fn clear(state: &mut AppState) {
    use_cases::selection::clear_selection(state);
}

/// Beginnt einen Equipment-Drag.
pub fn begin_equipment_drag(
    state: &mut AppState,
    equipment_id: &str,
    world_pos: Vec2,
) -> anyhow::Result<()> {
    use_cases::selection::begin_equipment_drag(state, equipment_id, world_pos)?;
    Ok(())
}

/// Beginnt einen Label-Drag.
pub fn begin_label_drag(
    state: &mut AppState,
    equipment_id: &str,
    world_pos: Vec2,
) -> anyhow::Result<()> {
    use_cases::selection::begin_label_drag(state, equipment_id, world_pos)?;
    Ok(())
}

/// Beginnt einen Pan.
pub fn begin_pan(state: &mut AppState, screen_pos: Vec2) {
    use_cases::selection::begin_pan(state, screen_pos);
}

/// Setzt die laufende Geste fort.
pub fn drag_to(state: &mut AppState, screen_pos: Vec2) {
    use_cases::selection::drag_to(state, screen_pos);
}

/// Schließt die laufende Geste ab.
pub fn end_drag(state: &mut AppState) {
    use_cases::selection::end_drag(state);
}
