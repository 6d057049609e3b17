//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::shared::{RenderScene, SceneEquipment};

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    let grid = state.options.grid();
    let equipamentos = state
        .diagram
        .as_deref()
        .map(|diagram| {
            diagram
                .equipamentos_iter()
                .map(|eq| SceneEquipment {
                    position_px: eq.pixel_position(&grid),
                    size_px: eq.size(),
                    equipment: eq.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    RenderScene {
        grid,
        equipamentos,
        visual_connections: state.layout.visual_connections.clone(),
        barramentos: state.layout.barramentos.clone(),
        viewport: state.view.viewport.clone(),
        mode: state.editor.mode(),
        selected_equipment_ids: state.selection.equipment_ids.clone(),
        selected_connection_ids: state.selection.connection_ids.clone(),
        connecting_from: state
            .editor
            .connecting_from()
            .map(|(id, port)| (id.to_string(), port)),
        is_dirty: state.editor.is_dirty(),
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::use_cases::layout;
    use crate::app::AppState;
    use crate::core::{Connection, Diagram, DiagramModel, Equipment, EquipmentType, Port};
    use glam::Vec2;
    use std::sync::Arc;

    #[test]
    fn build_loest_pixelpositionen_auf() {
        let mut state = AppState::new();
        assert!(!build(&state).has_diagram());

        let mut model = DiagramModel::new(Diagram::default());
        model
            .add_equipment(Equipment::new("a", "A", EquipmentType::Motor, Vec2::new(1.0, 2.0)))
            .unwrap();
        model
            .add_equipment(Equipment::new("b", "B", EquipmentType::Motor, Vec2::new(1.0, 8.0)))
            .unwrap();
        model
            .add_connection(Connection::new("c", "a", Port::Bottom, "b", Port::Top))
            .unwrap();
        state.diagram = Some(Arc::new(model));
        layout::recompute(&mut state);

        let scene = build(&state);
        let a = scene.equipment("a").expect("a in Szene");
        assert_eq!(a.position_px, Vec2::new(20.0, 40.0));
        assert!(scene.connection("c").is_some());
        assert!(!scene.is_dirty);
        assert!(scene.connecting_from.is_none());
    }
}
