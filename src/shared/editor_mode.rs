//! Editor-Modus, geteilt zwischen Optionen, App-State und Render-Szene.

use serde::{Deserialize, Serialize};

/// Betriebsmodus des Editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Nur Ansicht, Klicks werden an den Host gemeldet
    #[default]
    View,
    /// Bearbeiten: Selektion, Drag, Löschen
    Edit,
    /// Verbindung wird gerade gezogen
    Connecting,
}

impl EditorMode {
    /// Name für Logs und Fehlermeldungen.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Connecting => "connecting",
        }
    }
}
