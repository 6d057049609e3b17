use indexmap::IndexSet;
use std::sync::Arc;

/// Auswahlbezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Selektierte Equipment-IDs (Arc für O(1)-Clone in RenderScene)
    pub equipment_ids: Arc<IndexSet<String>>,
    /// Selektierte Verbindungs-IDs
    pub connection_ids: Arc<IndexSet<String>>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable Equipment-Auswahl (CoW: klont nur wenn nötig).
    #[inline]
    pub fn equipment_ids_mut(&mut self) -> &mut IndexSet<String> {
        Arc::make_mut(&mut self.equipment_ids)
    }

    /// Mutable Verbindungs-Auswahl (CoW: klont nur wenn nötig).
    #[inline]
    pub fn connection_ids_mut(&mut self) -> &mut IndexSet<String> {
        Arc::make_mut(&mut self.connection_ids)
    }

    /// Leert beide Auswahlen.
    pub fn clear(&mut self) {
        if !self.equipment_ids.is_empty() {
            self.equipment_ids_mut().clear();
        }
        if !self.connection_ids.is_empty() {
            self.connection_ids_mut().clear();
        }
    }

    /// Ist irgendetwas selektiert?
    pub fn is_empty(&self) -> bool {
        self.equipment_ids.is_empty() && self.connection_ids.is_empty()
    }
}
