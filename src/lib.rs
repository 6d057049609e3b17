//! Unifilar-Editor Engine.
//! Layout, orthogonales Routing, Sammelschienen-Erkennung und Editier-Logik
//! für unifilare Schaltbilder, unabhängig von einem konkreten Renderer.

pub mod app;
pub mod core;
pub mod persistence;
pub mod shared;

pub use app::{AppCommand, AppController, AppIntent, AppState, HostEvent};
pub use core::{
    Barramento, Connection, Diagram, DiagramLayout, DiagramModel, EngineError, Equipment,
    EquipmentType, Grid, LabelPosition, Port, ValidationError, Viewport, VisualConnection,
};
pub use persistence::{
    DiagramService, InMemoryDiagramService, JsonDirectoryService, LayoutPayload,
    PersistenceGateway,
};
pub use shared::{EditorMode, EngineOptions, RenderScene};
