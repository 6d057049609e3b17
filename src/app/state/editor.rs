use crate::core::{Port, ValidationError};
use crate::shared::EditorMode;
use glam::Vec2;

/// Aktuell laufende Zieh-Geste. Es ist immer höchstens eine aktiv.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveDrag {
    /// Keine Geste
    #[default]
    None,
    /// Equipment wird verschoben
    Equipment {
        /// ID des gezogenen Equipments
        equipment_id: String,
        /// Pointer (Welt) minus linke obere Ecke beim Greifen
        offset: Vec2,
    },
    /// Label wird verschoben
    Label {
        /// ID des Equipments, dessen Label gezogen wird
        equipment_id: String,
        /// Pointer-Position (Welt) beim Greifen
        grab_world: Vec2,
        /// Label-Versatz beim Greifen
        start_offset: Vec2,
    },
    /// Viewport wird verschoben
    Pan {
        /// Letzte Pointer-Position (Client)
        last_screen: Vec2,
    },
}

impl ActiveDrag {
    /// Läuft eine Geste?
    pub fn is_active(&self) -> bool {
        !matches!(self, ActiveDrag::None)
    }

    /// ID des gezogenen Equipments (nur Equipment-Drag).
    pub fn dragging_equipment_id(&self) -> Option<&str> {
        match self {
            ActiveDrag::Equipment { equipment_id, .. } => Some(equipment_id),
            _ => None,
        }
    }
}

/// Modus-Automat des Editors inklusive Dirty-Tracking.
///
/// `mode` und `connecting_from` sind nur über die Übergangsmethoden
/// änderbar, damit `connecting_from.is_some() == (mode == Connecting)` gilt.
#[derive(Debug, Clone)]
pub struct EditorState {
    mode: EditorMode,
    connecting_from: Option<(String, Port)>,
    drag: ActiveDrag,
    /// Positionen beim Loslassen auf ganze Rasterzellen runden
    pub snap_to_grid: bool,
    dirty: bool,
    revision: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorMode::View, true)
    }
}

impl EditorState {
    /// Erstellt den Editor-Zustand mit Start-Modus.
    ///
    /// `Connecting` ist als Start-Modus nicht möglich und wird zu `Edit`.
    pub fn new(mode: EditorMode, snap_to_grid: bool) -> Self {
        let mode = if mode == EditorMode::Connecting {
            log::warn!("Start-Modus 'connecting' ohne Startport, verwende 'edit'");
            EditorMode::Edit
        } else {
            mode
        };
        Self {
            mode,
            connecting_from: None,
            drag: ActiveDrag::None,
            snap_to_grid,
            dirty: false,
            revision: 0,
        }
    }

    /// Aktueller Modus
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Start-Port der laufenden Verbindung
    pub fn connecting_from(&self) -> Option<(&str, Port)> {
        self.connecting_from
            .as_ref()
            .map(|(id, port)| (id.as_str(), *port))
    }

    /// Sind strukturelle Änderungen erlaubt?
    pub fn allows_mutation(&self) -> bool {
        self.mode != EditorMode::View
    }

    /// Fehler für eine im aktuellen Modus verbotene Aktion.
    pub fn forbid(&self, action: &'static str) -> ValidationError {
        ValidationError::ModeForbids {
            action,
            mode: self.mode.as_str(),
        }
    }

    /// Prüft, dass der Modus strukturelle Änderungen erlaubt.
    pub fn require_mutation(&self, action: &'static str) -> Result<(), ValidationError> {
        if self.allows_mutation() {
            Ok(())
        } else {
            Err(self.forbid(action))
        }
    }

    /// Wechselt zwischen `View` und `Edit`. Eine laufende Verbindung wird verworfen.
    pub fn set_mode(&mut self, mode: EditorMode) -> Result<(), ValidationError> {
        if mode == EditorMode::Connecting {
            return Err(ValidationError::ModeForbids {
                action: "set_mode",
                mode: EditorMode::Connecting.as_str(),
            });
        }
        self.mode = mode;
        self.connecting_from = None;
        Ok(())
    }

    /// `Edit` → `Connecting` mit Start-Port.
    pub fn begin_connecting(
        &mut self,
        equipment_id: impl Into<String>,
        port: Port,
    ) -> Result<(), ValidationError> {
        if self.mode != EditorMode::Edit {
            return Err(self.forbid("start_connecting"));
        }
        self.mode = EditorMode::Connecting;
        self.connecting_from = Some((equipment_id.into(), port));
        Ok(())
    }

    /// `Connecting` → `Edit`. Gibt den Start-Port zurück.
    pub fn end_connecting(&mut self) -> Option<(String, Port)> {
        let from = self.connecting_from.take()?;
        self.mode = EditorMode::Edit;
        Some(from)
    }

    /// Aktive Geste
    pub fn drag(&self) -> &ActiveDrag {
        &self.drag
    }

    /// Startet eine Geste. Gibt `false` zurück, wenn bereits eine läuft.
    pub fn begin_drag(&mut self, drag: ActiveDrag) -> bool {
        if self.drag.is_active() {
            return false;
        }
        self.drag = drag;
        true
    }

    /// Aktualisiert die laufende Geste (z.B. letzte Pan-Position).
    pub fn drag_mut(&mut self) -> &mut ActiveDrag {
        &mut self.drag
    }

    /// Beendet die Geste und gibt sie zurück.
    pub fn take_drag(&mut self) -> ActiveDrag {
        std::mem::take(&mut self.drag)
    }

    /// Ungespeicherte Änderungen?
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Zähler aller strukturellen Änderungen
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Markiert eine strukturelle Änderung und gibt die neue Revision zurück.
    pub fn mark_dirty(&mut self) -> u64 {
        self.dirty = true;
        self.revision += 1;
        self.revision
    }

    /// Setzt die Revision fort, statt bei 0 zu beginnen.
    ///
    /// Nach einem Neuladen liegt die Revision über jeder zuvor vergebenen,
    /// damit ältere Save-Tickets nie zu einem späteren Stand passen.
    pub fn continue_after(mut self, previous_revision: u64) -> Self {
        self.revision = previous_revision + 1;
        self
    }

    /// Löscht das Dirty-Flag, sofern seit `revision` nichts geändert wurde.
    pub fn mark_saved(&mut self, revision: u64) -> bool {
        if self.revision == revision {
            self.dirty = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_laeuft_nach_neuladen_weiter() {
        let mut editor = EditorState::new(EditorMode::Edit, true);
        let old = editor.mark_dirty();
        let mut reloaded =
            EditorState::new(EditorMode::Edit, true).continue_after(editor.revision());
        assert!(!reloaded.is_dirty());
        assert!(!reloaded.mark_saved(old));
        let next = reloaded.mark_dirty();
        assert!(next > old);
        assert!(!reloaded.mark_saved(old));
        assert!(reloaded.is_dirty());
    }

    #[test]
    fn test_connecting_nur_aus_edit() {
        let mut editor = EditorState::new(EditorMode::View, true);
        assert!(editor.begin_connecting("a", Port::Top).is_err());
        assert_eq!(editor.mode(), EditorMode::View);
        assert!(editor.connecting_from().is_none());

        editor.set_mode(EditorMode::Edit).expect("edit erlaubt");
        editor.begin_connecting("a", Port::Top).expect("aus edit erlaubt");
        assert_eq!(editor.mode(), EditorMode::Connecting);
        assert_eq!(editor.connecting_from(), Some(("a", Port::Top)));

        assert_eq!(editor.end_connecting(), Some(("a".to_string(), Port::Top)));
        assert_eq!(editor.mode(), EditorMode::Edit);
        assert!(editor.connecting_from().is_none());
    }

    #[test]
    fn test_set_mode_connecting_wird_abgelehnt() {
        let mut editor = EditorState::new(EditorMode::Edit, true);
        assert!(editor.set_mode(EditorMode::Connecting).is_err());
        assert_eq!(editor.mode(), EditorMode::Edit);
    }

    #[test]
    fn test_nur_eine_geste_gleichzeitig() {
        let mut editor = EditorState::default();
        assert!(editor.begin_drag(ActiveDrag::Pan {
            last_screen: Vec2::ZERO
        }));
        assert!(!editor.begin_drag(ActiveDrag::Equipment {
            equipment_id: "a".into(),
            offset: Vec2::ZERO,
        }));
        assert!(matches!(editor.take_drag(), ActiveDrag::Pan { .. }));
        assert!(!editor.drag().is_active());
    }

    #[test]
    fn test_mark_saved_nur_bei_gleicher_revision() {
        let mut editor = EditorState::default();
        let rev = editor.mark_dirty();
        editor.mark_dirty();
        assert!(!editor.mark_saved(rev));
        assert!(editor.is_dirty());
        assert!(editor.mark_saved(editor.revision()));
        assert!(!editor.is_dirty());
    }
}
