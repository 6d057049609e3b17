//! Zentrale Konfiguration der Schaltbild-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use super::EditorMode;
use crate::core::{barramento, routing, LayoutParams, Grid, GRID_SIZE};

// ── Viewport ────────────────────────────────────────────────────────

/// Minimaler Zoom-Faktor.
pub const ZOOM_MIN: f32 = 0.1;
/// Maximaler Zoom-Faktor.
pub const ZOOM_MAX: f32 = 10.0;
/// Zoom-Schritt pro Mausrad-Raste.
pub const ZOOM_STEP: f32 = 1.1;

// ── Hit-Testing ─────────────────────────────────────────────────────

/// Klick-Radius um einen Port-Anker in Welt-Pixeln.
pub const PORT_PICK_RADIUS_PX: f32 = 8.0;
/// Maximaler Abstand eines Klicks zu einer Verbindungslinie.
pub const CONNECTION_PICK_TOLERANCE_PX: f32 = 6.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Wird als `unifilar_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    // ── Raster & Routing ────────────────────────────────────────
    /// Kantenlänge einer Rasterzelle in Pixeln
    pub grid_size_px: f32,
    /// Abstand, mit dem Z-Pfade aus dem Port herausführen
    pub route_clearance_px: f32,
    /// Toleranz für gemeinsame Sammelschienen-Anker
    #[serde(default = "default_busbar_epsilon")]
    pub busbar_epsilon_px: f32,

    // ── Viewport ────────────────────────────────────────────────
    /// Minimaler Zoom-Faktor
    pub zoom_min: f32,
    /// Maximaler Zoom-Faktor
    pub zoom_max: f32,
    /// Zoom-Schritt pro Mausrad-Raste
    pub zoom_step: f32,

    // ── Hit-Testing ─────────────────────────────────────────────
    /// Klick-Radius um Port-Anker
    pub port_pick_radius_px: f32,
    /// Klick-Toleranz zu Verbindungslinien
    pub connection_pick_tolerance_px: f32,

    // ── Editor-Verhalten ────────────────────────────────────────
    /// Snap-to-Grid beim Laden eines Diagramms aktiv
    #[serde(default = "default_true")]
    pub snap_to_grid_default: bool,
    /// Modus nach dem Laden eines Diagramms
    #[serde(default)]
    pub initial_mode: EditorMode,
    /// Verbindung am neuen Junction-Point auftrennen (A→J, J→B)
    #[serde(default)]
    pub split_connection_on_junction: bool,
}

fn default_busbar_epsilon() -> f32 {
    barramento::DEFAULT_EPSILON
}

fn default_true() -> bool {
    true
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            grid_size_px: GRID_SIZE,
            route_clearance_px: routing::DEFAULT_CLEARANCE,
            busbar_epsilon_px: barramento::DEFAULT_EPSILON,

            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,

            port_pick_radius_px: PORT_PICK_RADIUS_PX,
            connection_pick_tolerance_px: CONNECTION_PICK_TOLERANCE_PX,

            snap_to_grid_default: true,
            initial_mode: EditorMode::View,
            split_connection_on_junction: false,
        }
    }
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler werden Standardwerte verwendet.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.sanitized()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Korrigiert Werte, mit denen Zoom und Raster nicht arbeiten können.
    ///
    /// Vertauschte Zoom-Grenzen werden getauscht, nicht-endliche oder
    /// nicht-positive Werte fallen auf die Standardwerte zurück.
    pub fn sanitized(mut self) -> Self {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.zoom_min) || !valid(self.zoom_max) {
            log::warn!(
                "Ungültige Zoom-Grenzen {}..{}, verwende {}..{}",
                self.zoom_min,
                self.zoom_max,
                ZOOM_MIN,
                ZOOM_MAX
            );
            self.zoom_min = ZOOM_MIN;
            self.zoom_max = ZOOM_MAX;
        } else if self.zoom_min > self.zoom_max {
            log::warn!(
                "Zoom-Grenzen vertauscht ({} > {}), tausche",
                self.zoom_min,
                self.zoom_max
            );
            std::mem::swap(&mut self.zoom_min, &mut self.zoom_max);
        }
        if !valid(self.zoom_step) {
            log::warn!(
                "Ungültiger Zoom-Schritt {}, verwende {}",
                self.zoom_step,
                ZOOM_STEP
            );
            self.zoom_step = ZOOM_STEP;
        }
        if !valid(self.grid_size_px) {
            log::warn!(
                "Ungültige Rastergröße {}, verwende {}",
                self.grid_size_px,
                GRID_SIZE
            );
            self.grid_size_px = GRID_SIZE;
        }
        self
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("unifilar-editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("unifilar_editor.toml")
    }

    /// Raster aus der konfigurierten Zellgröße.
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size_px)
    }

    /// Parameter für Routing und Sammelschienen-Erkennung.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            grid: self.grid(),
            clearance: self.route_clearance_px.max(0.0),
            busbar_epsilon: self.busbar_epsilon_px,
        }
    }
}
