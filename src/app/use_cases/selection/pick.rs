//! Use-Case: engine-seitiger Hit-Test für Klicks ohne Host-Hit-Test.

use crate::app::AppState;
use crate::core::routing::distance_to_polyline;
use crate::core::Port;
use glam::Vec2;

/// Ergebnis eines Hit-Tests in Prioritäts-Reihenfolge.
#[derive(Debug, Clone, PartialEq)]
pub enum PickTarget {
    /// Port eines Equipments
    Port { equipment_id: String, port: Port },
    /// Körper eines Equipments
    Equipment { equipment_id: String },
    /// Verbindungslinie (oder Sammelschiene eines Mitglieds)
    Connection { connection_id: String },
    /// Nichts getroffen
    Background,
}

/// Ermittelt das Ziel unter einer Weltposition.
///
/// Priorität: Port > Equipment > Verbindung > Hintergrund. Später
/// eingefügte Equipments liegen oben und werden zuerst geprüft.
/// Radien sind in Screen-Pixeln konfiguriert und werden über den Zoom
/// in Welt-Pixel umgerechnet.
pub fn pick_target(state: &AppState, world_pos: Vec2) -> PickTarget {
    let Some(diagram) = state.diagram.as_ref() else {
        return PickTarget::Background;
    };
    let grid = state.options.grid();
    let scale = state.view.viewport.scale.max(f32::EPSILON);
    let port_radius = state.options.port_pick_radius_px / scale;
    let line_tolerance = state.options.connection_pick_tolerance_px / scale;

    let equipamentos: Vec<_> = diagram.equipamentos_iter().collect();

    let mut best_port: Option<(f32, &str, Port)> = None;
    for eq in equipamentos.iter().rev() {
        for port in Port::ALL {
            let distance = eq.anchor(port, &grid).distance(world_pos);
            if distance <= port_radius && best_port.map_or(true, |(d, _, _)| distance < d) {
                best_port = Some((distance, eq.id.as_str(), port));
            }
        }
    }
    if let Some((_, equipment_id, port)) = best_port {
        return PickTarget::Port {
            equipment_id: equipment_id.to_string(),
            port,
        };
    }

    if let Some(eq) = equipamentos
        .iter()
        .rev()
        .find(|eq| !eq.is_junction() && eq.contains(world_pos, &grid, 0.0))
    {
        return PickTarget::Equipment {
            equipment_id: eq.id.clone(),
        };
    }

    let nearest_line = state
        .layout
        .visual_connections
        .iter()
        .map(|v| (distance_to_polyline(world_pos, &v.points), v.id.as_str()))
        .filter(|(d, _)| *d <= line_tolerance)
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, connection_id)) = nearest_line {
        return PickTarget::Connection {
            connection_id: connection_id.to_string(),
        };
    }

    for bar in &state.layout.barramentos {
        let rail = [
            Vec2::new(bar.min_x, bar.anchor.y),
            Vec2::new(bar.max_x, bar.anchor.y),
        ];
        if distance_to_polyline(world_pos, &rail) <= line_tolerance {
            if let Some(first) = bar.members.first() {
                return PickTarget::Connection {
                    connection_id: first.clone(),
                };
            }
        }
    }

    PickTarget::Background
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::layout;
    use crate::core::{Connection, Diagram, DiagramModel, Equipment, EquipmentType};
    use std::sync::Arc;

    fn state_with_pair() -> AppState {
        let mut model = DiagramModel::new(Diagram::default());
        model
            .add_equipment(Equipment::new(
                "a",
                "A",
                EquipmentType::Disjuntor,
                Vec2::new(2.0, 2.0),
            ))
            .unwrap();
        model
            .add_equipment(Equipment::new(
                "b",
                "B",
                EquipmentType::Disjuntor,
                Vec2::new(2.0, 8.0),
            ))
            .unwrap();
        model
            .add_connection(Connection::new("c1", "a", Port::Bottom, "b", Port::Top))
            .unwrap();
        let mut state = AppState::new();
        state.diagram = Some(Arc::new(model));
        layout::recompute(&mut state);
        state
    }

    #[test]
    fn test_port_vor_equipment_vor_linie() {
        let state = state_with_pair();
        // Bottom-Port von a liegt bei (60, 80)
        assert_eq!(
            pick_target(&state, Vec2::new(61.0, 78.0)),
            PickTarget::Port {
                equipment_id: "a".into(),
                port: Port::Bottom
            }
        );
        assert_eq!(
            pick_target(&state, Vec2::new(50.0, 55.0)),
            PickTarget::Equipment {
                equipment_id: "a".into()
            }
        );
        assert_eq!(
            pick_target(&state, Vec2::new(63.0, 120.0)),
            PickTarget::Connection {
                connection_id: "c1".into()
            }
        );
        assert_eq!(
            pick_target(&state, Vec2::new(300.0, 300.0)),
            PickTarget::Background
        );
    }

    #[test]
    fn test_radien_skalieren_mit_zoom() {
        let mut state = state_with_pair();
        assert_eq!(
            pick_target(&state, Vec2::new(70.0, 120.0)),
            PickTarget::Background
        );
        state.view.viewport.scale = 0.5;
        assert_eq!(
            pick_target(&state, Vec2::new(70.0, 120.0)),
            PickTarget::Connection {
                connection_id: "c1".into()
            }
        );
    }
}
