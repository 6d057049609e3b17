//! Fehler-Taxonomie der Engine.

use super::Port;
use thiserror::Error;

/// Lokal abgelehnte Operation; der Zustand bleibt unverändert.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Start- und Zielport sind identisch
    #[error("Verbindung auf denselben Port nicht erlaubt ({equipment_id}/{})", .port.as_str())]
    SelfPortConnection { equipment_id: String, port: Port },
    /// Referenziertes Equipment existiert nicht (oder ist gelöscht)
    #[error("Equipment {0} existiert nicht")]
    UnknownEquipment(String),
    /// Referenzierte Verbindung existiert nicht
    #[error("Verbindung {0} existiert nicht")]
    UnknownConnection(String),
    /// Equipment-ID bereits vergeben
    #[error("Equipment-ID {0} bereits vergeben")]
    DuplicateEquipment(String),
    /// Verbindungs-ID bereits vergeben
    #[error("Verbindungs-ID {0} bereits vergeben")]
    DuplicateConnection(String),
    /// Diagramm-ID bereits vergeben
    #[error("Diagramm {0} existiert bereits")]
    DuplicateDiagram(String),
    /// Aktion im aktuellen Editor-Modus nicht erlaubt
    #[error("Aktion '{action}' im Modus '{mode}' nicht erlaubt")]
    ModeForbids {
        action: &'static str,
        mode: &'static str,
    },
    /// Kein Diagramm geladen
    #[error("Kein Diagramm geladen")]
    NoDiagram,
}

/// Fehlerarten, die an den Host gemeldet werden.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Diagramm existiert im Backend nicht (Host kann "neu anlegen" anbieten)
    #[error("Diagramm {id} nicht gefunden")]
    NotFound { id: String },
    /// Ungültige Anfrage, vor jeder Mutation abgelehnt
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Laden/Speichern fehlgeschlagen; lokales Layout bleibt erhalten
    #[error("Netzwerkfehler: {0}")]
    Network(String),
    /// Inkonsistentes Modell (z.B. hängende Verbindung)
    #[error("Invariante verletzt: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    /// Kurzform für Netzwerkfehler aus beliebigen Fehlertypen.
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    /// Ist das ein NotFound?
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
