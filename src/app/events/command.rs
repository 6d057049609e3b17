use crate::core::{AvailableEquipment, LabelPosition, Port};
use crate::shared::{EditorMode, EngineOptions};
use glam::Vec2;

use super::HostEvent;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
/// Positionen sind bereits in Welt-Koordinaten aufgelöst, wo möglich.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // === Persistenz ===
    /// Diagramm laden
    LoadDiagram {
        diagram_id: String,
        mode: Option<EditorMode>,
    },
    /// Leeres Diagramm anlegen und laden
    CreateDiagram {
        diagram_id: String,
        nome: String,
        descricao: Option<String>,
        unidade_id: String,
    },
    /// Layout speichern
    SaveLayout,

    // === Modus & Optionen ===
    /// Modus setzen
    SetMode { mode: EditorMode },
    /// Snap-to-Grid setzen
    SetSnapToGrid { enabled: bool },
    /// Optionen übernehmen
    ApplyOptions { options: Box<EngineOptions> },
    /// Host-Event ohne Zustandsänderung auslösen
    EmitHostEvent { event: HostEvent },

    // === Selektion ===
    /// Equipment exklusiv selektieren
    SelectEquipment { equipment_id: String },
    /// Verbindung selektieren (erneuter Klick hebt auf)
    SelectConnection { connection_id: String },
    /// Selektion aufheben
    ClearSelection,

    // === Verbindungen ===
    /// Verbindung an einem Port beginnen
    StartConnecting { equipment_id: String, port: Port },
    /// Verbindung an einem Port abschließen
    FinishConnectingAtPort { equipment_id: String, port: Port },
    /// Verbindung an einem Junction-Point abschließen
    FinishConnectingAtPoint {
        world_pos: Vec2,
        on_connection: Option<String>,
    },
    /// Laufende Verbindung abbrechen
    CancelConnecting,
    /// Verbindung entfernen
    RemoveConnection { connection_id: String },

    // === Editing ===
    /// Equipment platzieren
    AddEquipment {
        available: AvailableEquipment,
        grid_pos: Vec2,
    },
    /// Equipment entfernen (kaskadierend)
    RemoveEquipment { equipment_id: String },
    /// Selektion löschen (kaskadierend)
    DeleteSelected,
    /// Position setzen (Grid-Einheiten)
    UpdateEquipmentPosition {
        equipment_id: String,
        grid_pos: Vec2,
    },
    /// Label-Versatz setzen
    UpdateLabelOffset { equipment_id: String, offset: Vec2 },
    /// Label-Anker setzen
    SetLabelPosition {
        equipment_id: String,
        position: LabelPosition,
    },

    // === Gesten ===
    /// Equipment-Drag beginnen
    BeginEquipmentDrag {
        equipment_id: String,
        world_pos: Vec2,
    },
    /// Label-Drag beginnen
    BeginLabelDrag {
        equipment_id: String,
        world_pos: Vec2,
    },
    /// Pan beginnen
    BeginPan { screen_pos: Vec2 },
    /// Laufende Geste fortsetzen
    DragTo { screen_pos: Vec2 },
    /// Laufende Geste abschließen
    EndDrag,

    // === Viewport ===
    /// Zoom um einen Client-Fokuspunkt
    ZoomAt { factor: f32, screen_pos: Vec2 },
    /// Pan/Zoom zurücksetzen
    ResetView,
    /// Canvas-Ursprung setzen
    SetCanvasOrigin { origin: Vec2 },
}
