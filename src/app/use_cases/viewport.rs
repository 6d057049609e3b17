//! Use-Case-Funktionen für Pan/Zoom der Zeichenfläche.

use crate::app::AppState;
use glam::Vec2;

/// Zoomt so, dass der Weltpunkt unter dem Pointer fix bleibt.
pub fn zoom_at(state: &mut AppState, factor: f32, screen_pos: Vec2) {
    let focus_local = screen_pos - state.view.canvas_origin;
    state.view.viewport.zoom_towards(
        factor,
        focus_local,
        state.options.zoom_min,
        state.options.zoom_max,
    );
}

/// Mausrad-Zoom: `steps` Rasten mit dem konfigurierten Zoom-Schritt.
pub fn wheel_factor(state: &AppState, steps: f32) -> f32 {
    state.options.zoom_step.powf(steps)
}

/// Setzt Pan und Zoom zurück.
pub fn reset(state: &mut AppState) {
    state.view.viewport.reset();
}

/// Setzt die Client-Position der Canvas-Ecke.
pub fn set_canvas_origin(state: &mut AppState, origin: Vec2) {
    state.view.canvas_origin = origin;
}
