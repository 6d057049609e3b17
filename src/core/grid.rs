//! Raster-Transformationen zwischen Grid-Einheiten und Pixel-Raum.

use glam::Vec2;

/// Standard-Kantenlänge einer Rasterzelle in Pixeln (`GRID.SIZE`).
pub const GRID_SIZE: f32 = 20.0;

/// Logisches Diagramm-Raster.
///
/// Positionen von Equipments werden in Grid-Einheiten gespeichert,
/// Pixel-Position = Grid-Einheit × `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Zellgröße in Pixeln
    pub size: f32,
}

impl Grid {
    /// Erstellt ein Raster mit der gegebenen Zellgröße (Werte <= 0 fallen auf `GRID_SIZE` zurück).
    pub fn new(size: f32) -> Self {
        if size > 0.0 && size.is_finite() {
            Self { size }
        } else {
            log::warn!("Ungültige Rastergröße {}, verwende {}", size, GRID_SIZE);
            Self { size: GRID_SIZE }
        }
    }

    /// Grid-Einheit → Pixel.
    #[inline]
    pub fn grid_to_pixels(&self, units: f32) -> f32 {
        units * self.size
    }

    /// Pixel → Grid-Einheit, optional auf ganze Einheiten gerundet.
    #[inline]
    pub fn pixels_to_grid(&self, pixels: f32, snap: bool) -> f32 {
        let units = pixels / self.size;
        if snap {
            units.round()
        } else {
            units
        }
    }

    /// Grid-Punkt → Pixel-Punkt.
    pub fn point_to_pixels(&self, grid_pos: Vec2) -> Vec2 {
        grid_pos * self.size
    }

    /// Pixel-Punkt → Grid-Punkt (komponentenweise, optional gerundet).
    pub fn point_to_grid(&self, pixel_pos: Vec2, snap: bool) -> Vec2 {
        Vec2::new(
            self.pixels_to_grid(pixel_pos.x, snap),
            self.pixels_to_grid(pixel_pos.y, snap),
        )
    }

    /// Rundet eine Grid-Position auf die nächste ganze Rasterzelle.
    pub fn snap(grid_pos: Vec2) -> Vec2 {
        grid_pos.round()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self { size: GRID_SIZE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_roundtrip_ohne_snap() {
        let grid = Grid::default();
        for u in [-7.25_f32, -1.0, 0.0, 0.5, 2.0, 5.3, 123.75] {
            let back = grid.pixels_to_grid(grid.grid_to_pixels(u), false);
            assert_relative_eq!(back, u, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_pixels_to_grid_snap_rundet() {
        let grid = Grid::default();
        assert_relative_eq!(grid.pixels_to_grid(106.0, true), 5.0);
        assert_relative_eq!(grid.pixels_to_grid(111.0, true), 6.0);
        assert_relative_eq!(grid.pixels_to_grid(106.0, false), 5.3);
    }

    #[test]
    fn test_ungueltige_groesse_faellt_auf_default() {
        assert_relative_eq!(Grid::new(0.0).size, GRID_SIZE);
        assert_relative_eq!(Grid::new(f32::NAN).size, GRID_SIZE);
        assert_relative_eq!(Grid::new(10.0).size, 10.0);
    }

    #[test]
    fn test_point_conversions() {
        let grid = Grid::new(10.0);
        let px = grid.point_to_pixels(Vec2::new(2.0, 3.5));
        assert_eq!(px, Vec2::new(20.0, 35.0));
        assert_eq!(grid.point_to_grid(Vec2::new(26.0, 34.0), true), Vec2::new(3.0, 3.0));
    }
}
