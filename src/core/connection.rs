//! Repräsentiert eine Verbindung zwischen zwei Equipment-Ports.

use super::Port;
use serde::{Deserialize, Serialize};

/// Persistierte Topologie: Verbindung von einem Port zu einem anderen.
///
/// Enthält bewusst keine Geometrie; der Linienverlauf wird bei jeder
/// Änderung neu geroutet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Eindeutige ID
    pub id: String,
    /// Start-Equipment
    pub origem_id: String,
    /// Start-Port
    pub origem_porta: Port,
    /// Ziel-Equipment
    pub destino_id: String,
    /// Ziel-Port
    pub destino_porta: Port,
}

impl Connection {
    /// Erstellt eine neue Verbindung
    pub fn new(
        id: impl Into<String>,
        origem_id: impl Into<String>,
        origem_porta: Port,
        destino_id: impl Into<String>,
        destino_porta: Port,
    ) -> Self {
        Self {
            id: id.into(),
            origem_id: origem_id.into(),
            origem_porta,
            destino_id: destino_id.into(),
            destino_porta,
        }
    }

    /// Prüft ob die Verbindung das Equipment an einem Ende referenziert.
    pub fn references(&self, equipment_id: &str) -> bool {
        self.origem_id == equipment_id || self.destino_id == equipment_id
    }

    /// Start und Ziel sind derselbe Port desselben Equipments.
    pub fn is_self_port(&self) -> bool {
        self.origem_id == self.destino_id && self.origem_porta == self.destino_porta
    }
}
