//! Use-Case-Funktionen für Selektion und Zieh-Gesten.
//!
//! - `pick` — Hit-Test (Port > Equipment > Verbindung > Hintergrund)
//! - `select` — Klick-Selektion von Equipments und Verbindungen
//! - `drag` — Equipment-, Label- und Viewport-Drag

mod drag;
mod pick;
mod select;

pub use drag::{begin_equipment_drag, begin_label_drag, begin_pan, drag_to, end_drag};
pub use pick::{pick_target, PickTarget};
pub use select::{clear_selection, select_connection, select_equipamento};
