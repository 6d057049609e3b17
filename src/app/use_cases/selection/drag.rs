//! Use-Case: Zieh-Gesten für Equipments, Labels und den Viewport.
//!
//! Während eines Equipment-Drags wird die Position live und ungerundet
//! übernommen; gerundet wird erst beim Loslassen (oder Verlassen der
//! Zeichenfläche), falls Snap-to-Grid aktiv ist.

use crate::app::state::ActiveDrag;
use crate::app::use_cases::layout;
use crate::app::AppState;
use crate::core::{EngineError, Grid, ValidationError};
use crate::shared::EditorMode;
use glam::Vec2;
use std::sync::Arc;

fn require_edit(state: &AppState, action: &'static str) -> Result<(), ValidationError> {
    if state.editor.mode() == EditorMode::Edit {
        Ok(())
    } else {
        Err(state.editor.forbid(action))
    }
}

/// Beginnt das Verschieben eines Equipments und selektiert es.
pub fn begin_equipment_drag(
    state: &mut AppState,
    equipment_id: &str,
    world_pos: Vec2,
) -> Result<(), EngineError> {
    require_edit(state, "drag_equipment")?;
    let grid = state.options.grid();
    let Some(diagram) = state.diagram.as_ref() else {
        return Err(ValidationError::NoDiagram.into());
    };
    let Some(eq) = diagram.equipment(equipment_id) else {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    };

    let offset = world_pos - eq.pixel_position(&grid);
    if !state.editor.begin_drag(ActiveDrag::Equipment {
        equipment_id: equipment_id.to_string(),
        offset,
    }) {
        log::debug!("Drag ignoriert: andere Geste aktiv");
        return Ok(());
    }
    super::select_equipamento(state, equipment_id)
}

/// Beginnt das Verschieben eines Labels.
pub fn begin_label_drag(
    state: &mut AppState,
    equipment_id: &str,
    world_pos: Vec2,
) -> Result<(), EngineError> {
    require_edit(state, "drag_label")?;
    let Some(diagram) = state.diagram.as_ref() else {
        return Err(ValidationError::NoDiagram.into());
    };
    let Some(eq) = diagram.equipment(equipment_id) else {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    };

    let start_offset = eq.label_offset();
    if !state.editor.begin_drag(ActiveDrag::Label {
        equipment_id: equipment_id.to_string(),
        grab_world: world_pos,
        start_offset,
    }) {
        log::debug!("Label-Drag ignoriert: andere Geste aktiv");
    }
    Ok(())
}

/// Beginnt das Verschieben des Viewports (in jedem Modus erlaubt).
pub fn begin_pan(state: &mut AppState, screen_pos: Vec2) {
    if state.editor.begin_drag(ActiveDrag::Pan {
        last_screen: screen_pos,
    }) {
        state.view.viewport.is_dragging = true;
    }
}

/// Führt die laufende Geste bis zur Pointer-Position fort.
pub fn drag_to(state: &mut AppState, screen_pos: Vec2) {
    let world = state.view.screen_to_world(screen_pos);
    match state.editor.drag().clone() {
        ActiveDrag::None => {}
        ActiveDrag::Equipment {
            equipment_id,
            offset,
        } => {
            let grid_pos = state.options.grid().point_to_grid(world - offset, false);
            move_equipment(state, &equipment_id, grid_pos);
        }
        ActiveDrag::Label {
            equipment_id,
            grab_world,
            start_offset,
        } => {
            let offset = start_offset + (world - grab_world);
            let Some(diagram) = state.diagram.as_mut() else {
                return;
            };
            if Arc::make_mut(diagram).set_label_offset(&equipment_id, offset) {
                state.mark_changed();
            }
        }
        ActiveDrag::Pan { last_screen } => {
            state.view.viewport.pan(screen_pos - last_screen);
            if let ActiveDrag::Pan { last_screen } = state.editor.drag_mut() {
                *last_screen = screen_pos;
            }
        }
    }
}

/// Schließt die laufende Geste an der letzten Position ab.
pub fn end_drag(state: &mut AppState) {
    match state.editor.take_drag() {
        ActiveDrag::None => {}
        ActiveDrag::Equipment { equipment_id, .. } => {
            if state.editor.snap_to_grid {
                let snapped = state
                    .diagram
                    .as_ref()
                    .and_then(|d| d.equipment(&equipment_id))
                    .map(|eq| Grid::snap(eq.grid_position()));
                if let Some(snapped) = snapped {
                    move_equipment(state, &equipment_id, snapped);
                }
            }
            if let Some(eq) = state
                .diagram
                .as_ref()
                .and_then(|d| d.equipment(&equipment_id))
            {
                log::info!(
                    "Equipment {} verschoben nach ({}, {})",
                    equipment_id,
                    eq.posicao_x,
                    eq.posicao_y
                );
            }
        }
        ActiveDrag::Label { equipment_id, .. } => {
            log::info!("Label von {} verschoben", equipment_id);
        }
        ActiveDrag::Pan { .. } => {
            state.view.viewport.is_dragging = false;
        }
    }
}

/// Setzt die Grid-Position und routet die betroffenen Verbindungen neu.
fn move_equipment(state: &mut AppState, equipment_id: &str, grid_pos: Vec2) {
    let Some(diagram) = state.diagram.as_mut() else {
        return;
    };
    if Arc::make_mut(diagram).set_equipment_position(equipment_id, grid_pos) {
        layout::reroute_equipment(state, equipment_id);
        state.mark_changed();
    }
}
