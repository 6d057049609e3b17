//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und externen Renderern bzw. Hosts
//! geteilt werden, um direkte Abhängigkeiten zu vermeiden.

mod editor_mode;
pub mod options;
mod render_scene;

pub use editor_mode::EditorMode;
pub use options::EngineOptions;
pub use render_scene::{RenderScene, SceneEquipment};
