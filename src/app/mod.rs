//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod render_scene;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Engine (Diagramm, Layout, View, Editor).
pub mod state;
pub mod use_cases;

pub use command_log::{CommandLog, CommandOutcome, CommandRecord};
pub use controller::AppController;
pub use events::{AppCommand, AppIntent, HostEvent};
pub use intent_mapping::map_intent_to_commands;
pub use render_scene::build as build_render_scene;
pub use state::{ActiveDrag, AppState, EditorState, SelectionState, ViewState};
