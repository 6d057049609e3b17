//! Core-Domänentypen: Equipments, Verbindungen, Diagramm, Raster, Routing.

pub mod barramento;
pub mod connection;
/// Core-Datenmodelle des Schaltbilds
///
/// - DiagramModel: Container für alle Equipments und Verbindungen
/// - Equipment: Knoten mit Kategorie, Position und Label
/// - Connection: Port-zu-Port-Verbindung ohne Geometrie
pub mod diagram;
pub mod equipment;
pub mod error;
pub mod grid;
pub mod layout;
pub mod routing;
pub mod viewport;

pub use barramento::{detect_barramentos, Barramento, BusbarAxis, VisualConnection};
pub use connection::Connection;
pub use diagram::{Diagram, DiagramModel, HydrationReport};
pub use equipment::{
    AvailableEquipment, Equipment, EquipmentType, LabelPosition, Port, JUNCTION_PORT,
};
pub use error::{EngineError, ValidationError};
pub use grid::{Grid, GRID_SIZE};
pub use layout::{DiagramLayout, LayoutParams};
pub use routing::{route, route_connection, Endpoint};
pub use viewport::{screen_to_world, world_to_screen, Viewport};
