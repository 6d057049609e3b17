//! Handler für Viewport, Optionen und Host-Events.

use crate::app::events::HostEvent;
use crate::app::use_cases;
use crate::app::AppState;
use crate::shared::EngineOptions;
use glam::Vec2;

/// Zoomt um einen Client-Fokuspunkt.
pub fn zoom_at(state: &mut AppState, factor: f32, screen_pos: Vec2) {
    use_cases::viewport::zoom_at(state, factor, screen_pos);
}

/// Setzt Pan und Zoom zurück.
pub fn reset_view(state: &mut AppState) {
    use_cases::viewport::reset(state);
}

/// Setzt den Canvas-Ursprung.
pub fn set_canvas_origin(state: &mut AppState, origin: Vec2) {
    use_cases::viewport::set_canvas_origin(state, origin);
}

/// Übernimmt neue Optionen und berechnet das Layout neu.
///
/// Der aktuelle Zoom wird in die neuen Grenzen geklemmt.
pub fn apply_options(state: &mut AppState, options: EngineOptions) {
    state.options = options.sanitized();
    let viewport = &mut state.view.viewport;
    viewport.scale = viewport
        .scale
        .max(state.options.zoom_min)
        .min(state.options.zoom_max);
    use_cases::layout::recompute(state);
    log::info!("Optionen übernommen");
}

/// Stellt ein Host-Event in den Ausgang.
pub fn emit_host_event(state: &mut AppState, event: HostEvent) {
    state.push_host_event(event);
}
