use crate::core::Viewport;
use glam::Vec2;

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Pan/Zoom der Zeichenfläche
    pub viewport: Viewport,
    /// Client-Position der linken oberen Canvas-Ecke
    pub canvas_origin: Vec2,
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(),
            canvas_origin: Vec2::ZERO,
        }
    }

    /// Client-Koordinaten → Welt-Koordinaten.
    pub fn screen_to_world(&self, client: Vec2) -> Vec2 {
        crate::core::screen_to_world(client, &self.viewport, self.canvas_origin)
    }
}
