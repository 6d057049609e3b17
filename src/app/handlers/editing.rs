//! Handler für Modus, Equipment-Editing und Verbindungen.

use crate::app::use_cases;
use crate::app::use_cases::editing::ConnectTarget;
use crate::app::AppState;
use crate::core::{AvailableEquipment, LabelPosition, Port};
use crate::shared::EditorMode;
use glam::Vec2;

/// Setzt den Editor-Modus (view/edit).
pub fn set_mode(state: &mut AppState, mode: EditorMode) -> anyhow::Result<()> {
    use_cases::editing::set_mode(state, mode)?;
    Ok(())
}

/// Schaltet Snap-to-Grid.
pub fn set_snap_to_grid(state: &mut AppState, enabled: bool) {
    use_cases::editing::set_snap_to_grid(state, enabled);
}

/// Platziert ein Equipment aus der Host-Liste.
pub fn add_equipment(
    state: &mut AppState,
    available: &AvailableEquipment,
    grid_pos: Vec2,
) -> anyhow::Result<()> {
    use_cases::editing::add_equipamento(state, available, grid_pos)?;
    Ok(())
}

/// Entfernt ein Equipment (kaskadierend).
pub fn remove_equipment(state: &mut AppState, equipment_id: &str) -> anyhow::Result<()> {
    use_cases::editing::remove_equipamento(state, equipment_id)?;
    Ok(())
}

/// Löscht alle selektierten Equipments und Verbindungen.
pub fn delete_selected(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::editing::delete_selection(state)?;
    Ok(())
}

/// Setzt die Position eines Equipments.
pub fn update_position(
    state: &mut AppState,
    equipment_id: &str,
    grid_pos: Vec2,
) -> anyhow::Result<()> {
    use_cases::editing::update_equipamento_position(state, equipment_id, grid_pos)?;
    Ok(())
}

/// Setzt den Label-Versatz eines Equipments.
pub fn update_label_offset(
    state: &mut AppState,
    equipment_id: &str,
    offset: Vec2,
) -> anyhow::Result<()> {
    use_cases::editing::update_equipamento_label_offset(state, equipment_id, offset)?;
    Ok(())
}

/// Setzt den Label-Anker eines Equipments.
pub fn set_label_position(
    state: &mut AppState,
    equipment_id: &str,
    position: LabelPosition,
) -> anyhow::Result<()> {
    use_cases::editing::set_label_position(state, equipment_id, position)?;
    Ok(())
}

/// Beginnt eine Verbindung an einem Port.
pub fn start_connecting(
    state: &mut AppState,
    equipment_id: &str,
    port: Port,
) -> anyhow::Result<()> {
    use_cases::editing::start_connecting(state, equipment_id, port)?;
    Ok(())
}

/// Schließt die Verbindung an einem Port ab.
pub fn finish_at_port(
    state: &mut AppState,
    equipment_id: String,
    port: Port,
) -> anyhow::Result<()> {
    use_cases::editing::finish_connecting(state, ConnectTarget::Port { equipment_id, port })?;
    Ok(())
}

/// Schließt die Verbindung an einem neuen Junction-Point ab.
pub fn finish_at_point(
    state: &mut AppState,
    world_pos: Vec2,
    on_connection: Option<String>,
) -> anyhow::Result<()> {
    use_cases::editing::finish_connecting(
        state,
        ConnectTarget::Point {
            world_pos,
            on_connection,
        },
    )?;
    Ok(())
}

/// Bricht die laufende Verbindung ab.
pub fn cancel_connecting(state: &mut AppState) {
    use_cases::editing::cancel_connecting(state);
}

/// Entfernt eine Verbindung.
pub fn remove_connection(state: &mut AppState, connection_id: &str) -> anyhow::Result<()> {
    use_cases::editing::remove_conexao(state, connection_id)?;
    Ok(())
}
