//! Render-Szene als expliziter Übergabevertrag zwischen Engine und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und externe Renderer sie konsumieren.

use super::EditorMode;
use crate::core::{Barramento, Equipment, Grid, Port, Viewport, VisualConnection};
use indexmap::IndexSet;
use std::sync::Arc;

/// Equipment mit bereits aufgelöster Pixel-Geometrie.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEquipment {
    /// Equipment-Daten
    pub equipment: Equipment,
    /// Linke obere Ecke in Pixeln
    pub position_px: glam::Vec2,
    /// Bounding-Box in Pixeln
    pub size_px: glam::Vec2,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone)]
pub struct RenderScene {
    /// Raster, in dem die Positionen aufgelöst wurden
    pub grid: Grid,
    /// Alle Equipments in Einfüge-Reihenfolge
    pub equipamentos: Vec<SceneEquipment>,
    /// Geroutete Verbindungen
    pub visual_connections: Vec<VisualConnection>,
    /// Abgeleitete Sammelschienen
    pub barramentos: Vec<Barramento>,
    /// Pan/Zoom-Zustand für diesen Frame
    pub viewport: Viewport,
    /// Aktueller Editor-Modus
    pub mode: EditorMode,
    /// IDs der selektierten Equipments (Arc für O(1)-Clone pro Frame)
    pub selected_equipment_ids: Arc<IndexSet<String>>,
    /// IDs der selektierten Verbindungen
    pub selected_connection_ids: Arc<IndexSet<String>>,
    /// Start-Port einer laufenden Verbindung (für Hervorhebung)
    pub connecting_from: Option<(String, Port)>,
    /// Ungespeicherte Änderungen vorhanden?
    pub is_dirty: bool,
}

impl RenderScene {
    /// Gibt zurück, ob ein Diagramm für Rendering vorhanden ist.
    pub fn has_diagram(&self) -> bool {
        !self.equipamentos.is_empty() || !self.visual_connections.is_empty()
    }

    /// Findet ein Equipment der Szene.
    pub fn equipment(&self, id: &str) -> Option<&SceneEquipment> {
        self.equipamentos.iter().find(|e| e.equipment.id == id)
    }

    /// Findet eine Verbindung der Szene.
    pub fn connection(&self, id: &str) -> Option<&VisualConnection> {
        self.visual_connections.iter().find(|v| v.id == id)
    }
}
