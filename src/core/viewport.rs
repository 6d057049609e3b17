//! Viewport für Pan und Zoom sowie die Screen↔Welt-Transformation.

use glam::Vec2;

/// Pan/Zoom-Zustand der Zeichenfläche (reiner UI-Zustand, wird nie persistiert).
///
/// Der Renderer wendet `translate(x, y)` und danach `scale(scale)` auf die
/// Welt-Koordinaten an. `screen_to_world` ist die exakte Umkehrung davon.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Pan-Offset X in Pixeln
    pub x: f32,
    /// Pan-Offset Y in Pixeln
    pub y: f32,
    /// Zoom-Faktor (1.0 = normal)
    pub scale: f32,
    /// Läuft gerade ein Pan-Drag?
    pub is_dragging: bool,
}

impl Viewport {
    /// Minimaler Zoom-Faktor (Fallback ohne Optionen).
    pub const SCALE_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor (Fallback ohne Optionen).
    pub const SCALE_MAX: f32 = 10.0;

    /// Erstellt einen Viewport ohne Pan und mit Zoom 1.0.
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            is_dragging: false,
        }
    }

    /// Pan-Offset als Vektor.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Verschiebt den Viewport um ein Pixel-Delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Zoomt so, dass der Weltpunkt unter `focus_local` (Canvas-lokale Pixel) fix bleibt.
    ///
    /// Vertauschte oder NaN-Grenzen führen nie zu einem Panic.
    pub fn zoom_towards(&mut self, factor: f32, focus_local: Vec2, min: f32, max: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let world_before = (focus_local - self.offset()) / self.scale;
        let scale = (self.scale * factor).max(min).min(max);
        if !(scale.is_finite() && scale > 0.0) {
            return;
        }
        self.scale = scale;
        let offset = focus_local - world_before * self.scale;
        self.x = offset.x;
        self.y = offset.y;
    }

    /// Setzt Pan und Zoom zurück (Drag-Zustand bleibt unverändert).
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.scale = 1.0;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Konvertiert eine Pointer-Position (Client-Koordinaten) in Welt-Koordinaten.
///
/// `canvas_origin` ist die Client-Position der linken oberen Canvas-Ecke.
pub fn screen_to_world(client: Vec2, viewport: &Viewport, canvas_origin: Vec2) -> Vec2 {
    (client - canvas_origin - viewport.offset()) / viewport.scale
}

/// Konvertiert Welt-Koordinaten in Client-Koordinaten (Umkehrung von [`screen_to_world`]).
pub fn world_to_screen(world: Vec2, viewport: &Viewport, canvas_origin: Vec2) -> Vec2 {
    world * viewport.scale + viewport.offset() + canvas_origin
}
