//! Abgeleitetes Layout: geroutete Verbindungen plus Sammelschienen.

use glam::Vec2;
use indexmap::IndexMap;

use super::barramento::{detect_barramentos, Barramento, VisualConnection};
use super::routing::route_connection;
use super::{DiagramModel, Grid};

/// Parameter für Routing und Sammelschienen-Erkennung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Raster
    pub grid: Grid,
    /// Z-Pfad-Abstand in Pixeln
    pub clearance: f32,
    /// Toleranz für gemeinsame Anker
    pub busbar_epsilon: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            clearance: super::routing::DEFAULT_CLEARANCE,
            busbar_epsilon: super::barramento::DEFAULT_EPSILON,
        }
    }
}

/// Reine Funktion des aktuellen (Equipment, Verbindung)-Stands.
///
/// `routes` hält die rohen Routen je Verbindung, damit während eines Drags
/// nur die betroffenen Verbindungen neu geroutet werden müssen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramLayout {
    routes: IndexMap<String, Vec<Vec2>>,
    /// Fertige Darstellung (nach Sammelschienen-Umschreibung)
    pub visual_connections: Vec<VisualConnection>,
    /// Erkannte Sammelschienen
    pub barramentos: Vec<Barramento>,
}

impl DiagramLayout {
    /// Routet alle Verbindungen neu und erkennt Sammelschienen.
    pub fn compute(model: &DiagramModel, params: &LayoutParams) -> Self {
        let mut layout = Self::default();
        for connection in model.connections_iter() {
            match route_connection(model, connection, &params.grid, params.clearance) {
                Ok(points) => {
                    layout.routes.insert(connection.id.clone(), points);
                }
                Err(e) => {
                    log::warn!("Verbindung {} nicht geroutet: {}", connection.id, e);
                }
            }
        }
        layout.rebuild_barramentos(params.busbar_epsilon);
        layout
    }

    /// Routet nur die Verbindungen des Equipments neu.
    ///
    /// Ergebnis ist identisch zu [`compute`](Self::compute) auf demselben Modell.
    pub fn reroute_equipment(
        &mut self,
        model: &DiagramModel,
        equipment_id: &str,
        params: &LayoutParams,
    ) -> usize {
        let mut count = 0;
        for connection in model.connections_touching(equipment_id) {
            match route_connection(model, connection, &params.grid, params.clearance) {
                Ok(points) => {
                    self.routes.insert(connection.id.clone(), points);
                    count += 1;
                }
                Err(_) => {
                    self.routes.shift_remove(&connection.id);
                }
            }
        }
        self.rebuild_barramentos(params.busbar_epsilon);
        count
    }

    /// Baut Darstellung und Sammelschienen aus den rohen Routen neu auf.
    fn rebuild_barramentos(&mut self, epsilon: f32) {
        let mut visuals: Vec<VisualConnection> = self
            .routes
            .iter()
            .map(|(id, points)| VisualConnection::new(id.clone(), points.clone()))
            .collect();
        self.barramentos = detect_barramentos(&mut visuals, epsilon);
        self.visual_connections = visuals;
    }

    /// Rohe Route einer Verbindung (vor der Sammelschienen-Umschreibung).
    pub fn route(&self, connection_id: &str) -> Option<&[Vec2]> {
        self.routes.get(connection_id).map(Vec::as_slice)
    }

    /// Darstellung einer Verbindung.
    pub fn visual(&self, connection_id: &str) -> Option<&VisualConnection> {
        self.visual_connections
            .iter()
            .find(|v| v.id == connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Connection, Diagram, Equipment, EquipmentType, Port};

    fn sample() -> DiagramModel {
        let mut model = DiagramModel::new(Diagram::default());
        let items = [
            ("src", EquipmentType::Transformador, Vec2::new(6.0, 0.0)),
            ("a", EquipmentType::Disjuntor, Vec2::new(0.0, 8.0)),
            ("b", EquipmentType::Disjuntor, Vec2::new(6.0, 8.0)),
            ("c", EquipmentType::Disjuntor, Vec2::new(12.0, 8.0)),
        ];
        for (id, tipo, pos) in items {
            model.add_equipment(Equipment::new(id, id, tipo, pos)).unwrap();
        }
        for (i, target) in ["a", "b", "c"].iter().enumerate() {
            model
                .add_connection(Connection::new(
                    format!("k{}", i),
                    "src",
                    Port::Bottom,
                    *target,
                    Port::Top,
                ))
                .unwrap();
        }
        model
    }

    #[test]
    fn test_compute_erkennt_schiene() {
        let layout = DiagramLayout::compute(&sample(), &LayoutParams::default());
        assert_eq!(layout.visual_connections.len(), 3);
        assert_eq!(layout.barramentos.len(), 1);
        assert!(layout.visual_connections.iter().all(|v| v.is_barramento));
    }

    #[test]
    fn test_inkrementell_gleich_vollstaendig() {
        let params = LayoutParams::default();
        let mut model = sample();
        let mut layout = DiagramLayout::compute(&model, &params);

        model.set_equipment_position("b", Vec2::new(9.5, 11.25));
        layout.reroute_equipment(&model, "b", &params);

        assert_eq!(layout, DiagramLayout::compute(&model, &params));
    }
}
