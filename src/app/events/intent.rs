use crate::core::{AvailableEquipment, LabelPosition, Port};
use crate::shared::{EditorMode, EngineOptions};
use glam::Vec2;

/// App-Intent Events.
/// Intents sind Eingaben aus Host/Renderer ohne direkte Mutationslogik.
/// Pointer-Positionen sind Client-Koordinaten.
#[derive(Debug, Clone)]
pub enum AppIntent {
    // ── Persistenz ──────────────────────────────────────────────
    /// Diagramm laden (optional mit Start-Modus)
    LoadDiagramRequested {
        diagram_id: String,
        mode: Option<EditorMode>,
    },
    /// Leeres Diagramm anlegen
    CreateDiagramRequested {
        diagram_id: String,
        nome: String,
        descricao: Option<String>,
        unidade_id: String,
    },
    /// Layout speichern
    SaveRequested,

    // ── Modus & Optionen ────────────────────────────────────────
    /// Modus wechseln (view/edit)
    SetModeRequested { mode: EditorMode },
    /// Snap-to-Grid ein-/ausschalten
    SnapToGridToggled { enabled: bool },
    /// Optionen wurden im Host geändert
    OptionsChanged { options: Box<EngineOptions> },

    // ── Pointer (Hit-Test im Host) ──────────────────────────────
    /// Equipment-Körper angeklickt
    EquipmentClicked { equipment_id: String },
    /// Equipment doppelt angeklickt
    EquipmentDoubleClicked { equipment_id: String },
    /// Port eines Equipments angeklickt
    PortClicked { equipment_id: String, port: Port },
    /// Verbindungslinie angeklickt
    ConnectionClicked {
        connection_id: String,
        screen_pos: Vec2,
    },
    /// Leere Fläche angeklickt
    BackgroundClicked { screen_pos: Vec2 },
    /// Klick ohne Host-Hit-Test; die Engine ermittelt das Ziel selbst
    CanvasClicked { screen_pos: Vec2 },

    // ── Gesten ──────────────────────────────────────────────────
    /// Pointer-Down auf einem Equipment
    EquipmentDragStarted {
        equipment_id: String,
        screen_pos: Vec2,
    },
    /// Pointer-Down auf einem Label
    LabelDragStarted {
        equipment_id: String,
        screen_pos: Vec2,
    },
    /// Pointer-Down auf der leeren Fläche (Pan)
    PanStarted { screen_pos: Vec2 },
    /// Pointer bewegt
    PointerMoved { screen_pos: Vec2 },
    /// Pointer losgelassen
    PointerReleased,
    /// Pointer hat die Zeichenfläche verlassen
    PointerLeft,

    // ── Viewport ────────────────────────────────────────────────
    /// Mausrad: positive Schritte zoomen hinein
    WheelScrolled { steps: f32, screen_pos: Vec2 },
    /// Pan/Zoom zurücksetzen
    ResetViewRequested,
    /// Canvas wurde im Host verschoben
    CanvasOriginChanged { origin: Vec2 },

    // ── Tastatur ────────────────────────────────────────────────
    /// Escape
    CancelRequested,
    /// Entf/Backspace
    DeleteSelectedRequested,

    // ── Property-Editor ─────────────────────────────────────────
    /// Equipment aus der Host-Liste platzieren
    AddEquipmentRequested {
        available: AvailableEquipment,
        grid_pos: Vec2,
    },
    /// Equipment entfernen
    RemoveEquipmentRequested { equipment_id: String },
    /// Position direkt setzen (Grid-Einheiten)
    EquipmentPositionChanged {
        equipment_id: String,
        grid_pos: Vec2,
    },
    /// Label-Versatz direkt setzen (Pixel)
    LabelOffsetChanged { equipment_id: String, offset: Vec2 },
    /// Label-Anker ändern
    LabelPositionChanged {
        equipment_id: String,
        position: LabelPosition,
    },
    /// Verbindung entfernen
    RemoveConnectionRequested { connection_id: String },
}
