use crate::shared::EditorMode;
use glam::Vec2;

/// Benachrichtigungen an den Host (Property-Editor, Dialoge, Toasts).
///
/// Werden im `AppState` gesammelt und vom Host per
/// [`AppState::drain_host_events`](crate::app::AppState::drain_host_events) abgeholt.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Equipment im View-Modus angeklickt
    EquipmentClicked { equipment_id: String },
    /// Verbindung im View-Modus angeklickt
    ConnectionClicked { connection_id: String },
    /// Leere Fläche im View-Modus angeklickt
    BackgroundClicked { world_pos: Vec2 },
    /// Doppelklick im Edit-Modus: Eigenschaften-Dialog öffnen
    EditEquipmentRequested { equipment_id: String },
    /// Modus gewechselt
    ModeChanged { mode: EditorMode },
    /// Strukturelle Änderung (aufeinanderfolgende werden zusammengefasst)
    DiagramChanged { revision: u64 },
    /// Diagramm geladen oder angelegt
    DiagramLoaded { diagram_id: String },
    /// Diagramm existiert nicht (Host kann "neu anlegen" anbieten)
    DiagramNotFound { diagram_id: String },
    /// Layout gespeichert
    SaveSucceeded { revision: u64 },
    /// Speichern fehlgeschlagen, lokales Layout bleibt erhalten
    SaveFailed { message: String },
}
