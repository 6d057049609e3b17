//! Use-Case: Equipments platzieren, entfernen und bearbeiten.

use crate::app::state::ActiveDrag;
use crate::app::use_cases::layout;
use crate::app::AppState;
use crate::core::{
    AvailableEquipment, EngineError, Equipment, EquipmentType, Grid, LabelPosition,
    ValidationError,
};
use glam::Vec2;

use super::{deselect, diagram_mut};

/// Platziert ein Equipment aus der Host-Liste an einer Grid-Position.
pub fn add_equipamento(
    state: &mut AppState,
    available: &AvailableEquipment,
    grid_pos: Vec2,
) -> Result<(), EngineError> {
    state.editor.require_mutation("add_equipamento")?;
    let grid_pos = if state.editor.snap_to_grid {
        Grid::snap(grid_pos)
    } else {
        grid_pos
    };

    let diagram = diagram_mut(state)?;
    let mut equipment = Equipment::new(
        available.id.clone(),
        available.nome.clone(),
        EquipmentType::from_tag_or_default(&available.tipo),
        grid_pos,
    );
    equipment.tag = available.tag.clone();
    equipment.diagrama_id = Some(diagram.meta.id.clone());
    equipment.unidade_id = diagram.meta.unidade_id.clone();
    diagram.add_equipment(equipment)?;

    state.mark_changed();
    log::info!(
        "Equipment {} ({}) platziert bei ({}, {})",
        available.id,
        available.tipo,
        grid_pos.x,
        grid_pos.y
    );
    Ok(())
}

/// Entfernt ein Equipment inklusive aller referenzierenden Verbindungen.
///
/// Gibt die Anzahl der mitentfernten Verbindungen zurück.
pub fn remove_equipamento(state: &mut AppState, equipment_id: &str) -> Result<usize, EngineError> {
    state.editor.require_mutation("remove_equipamento")?;
    let diagram = diagram_mut(state)?;
    let Some((_, cascaded)) = diagram.remove_equipment(equipment_id) else {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    };

    let cascaded_ids: Vec<String> = cascaded.into_iter().map(|c| c.id).collect();
    deselect(state, Some(equipment_id), &cascaded_ids);

    let drag_target = match state.editor.drag() {
        ActiveDrag::Equipment { equipment_id: id, .. }
        | ActiveDrag::Label { equipment_id: id, .. } => Some(id.clone()),
        _ => None,
    };
    if drag_target.as_deref() == Some(equipment_id) {
        state.editor.take_drag();
    }
    if state
        .editor
        .connecting_from()
        .is_some_and(|(from, _)| from == equipment_id)
    {
        state.editor.end_connecting();
        log::info!("Laufende Verbindung abgebrochen: Start-Equipment entfernt");
    }

    layout::recompute(state);
    state.mark_changed();
    log::info!(
        "Equipment {} entfernt ({} Verbindung(en) kaskadierend)",
        equipment_id,
        cascaded_ids.len()
    );
    Ok(cascaded_ids.len())
}

/// Setzt die Position eines Equipments (Grid-Einheiten).
pub fn update_equipamento_position(
    state: &mut AppState,
    equipment_id: &str,
    grid_pos: Vec2,
) -> Result<(), EngineError> {
    state.editor.require_mutation("update_equipamento_position")?;
    let grid_pos = if state.editor.snap_to_grid {
        Grid::snap(grid_pos)
    } else {
        grid_pos
    };
    let diagram = diagram_mut(state)?;
    if !diagram.contains_equipment(equipment_id) {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    }
    if diagram.set_equipment_position(equipment_id, grid_pos) {
        layout::reroute_equipment(state, equipment_id);
        state.mark_changed();
    }
    Ok(())
}

/// Setzt den Label-Versatz eines Equipments (Pixel).
pub fn update_equipamento_label_offset(
    state: &mut AppState,
    equipment_id: &str,
    offset: Vec2,
) -> Result<(), EngineError> {
    state.editor.require_mutation("update_equipamento_label_offset")?;
    let diagram = diagram_mut(state)?;
    if !diagram.contains_equipment(equipment_id) {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    }
    if diagram.set_label_offset(equipment_id, offset) {
        state.mark_changed();
    }
    Ok(())
}

/// Setzt den Label-Anker eines Equipments.
pub fn set_label_position(
    state: &mut AppState,
    equipment_id: &str,
    position: LabelPosition,
) -> Result<(), EngineError> {
    state.editor.require_mutation("set_label_position")?;
    let diagram = diagram_mut(state)?;
    if !diagram.contains_equipment(equipment_id) {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    }
    if diagram.set_label_position(equipment_id, position) {
        state.mark_changed();
    }
    Ok(())
}
