use crate::app::events::HostEvent;
use crate::app::CommandLog;
use crate::core::{DiagramLayout, DiagramModel};
use crate::shared::EngineOptions;
use std::sync::Arc;

use super::{EditorState, SelectionState, ViewState};

/// Hauptzustand der Engine
#[derive(Debug, Default)]
pub struct AppState {
    /// Aktuell geladenes Diagramm (None = nichts geladen)
    pub diagram: Option<Arc<DiagramModel>>,
    /// Abgeleitetes Layout (Routen, Darstellung, Sammelschienen)
    pub layout: DiagramLayout,
    /// View-State
    pub view: ViewState,
    /// Selection-State
    pub selection: SelectionState,
    /// Modus, Geste, Dirty-Tracking
    pub editor: EditorState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EngineOptions,
    host_events: Vec<HostEvent>,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Erstellt einen leeren App-State mit Optionen
    pub fn with_options(options: EngineOptions) -> Self {
        let options = options.sanitized();
        Self {
            diagram: None,
            layout: DiagramLayout::default(),
            view: ViewState::new(),
            selection: SelectionState::new(),
            editor: EditorState::new(options.initial_mode, options.snap_to_grid_default),
            command_log: CommandLog::new(),
            options,
            host_events: Vec::new(),
        }
    }

    /// Gibt die Anzahl der Equipments zurück
    pub fn equipment_count(&self) -> usize {
        self.diagram.as_ref().map_or(0, |d| d.equipment_count())
    }

    /// Gibt die Anzahl der Verbindungen zurück
    pub fn connection_count(&self) -> usize {
        self.diagram.as_ref().map_or(0, |d| d.connection_count())
    }

    /// Stellt ein Host-Event in den Ausgang.
    ///
    /// Aufeinanderfolgende `DiagramChanged` werden zu einem zusammengefasst.
    pub fn push_host_event(&mut self, event: HostEvent) {
        if let HostEvent::DiagramChanged { revision: new_rev } = event {
            if let Some(HostEvent::DiagramChanged { revision }) = self.host_events.last_mut() {
                *revision = new_rev;
                return;
            }
        }
        self.host_events.push(event);
    }

    /// Noch nicht abgeholte Host-Events
    pub fn pending_host_events(&self) -> &[HostEvent] {
        &self.host_events
    }

    /// Holt alle Host-Events ab.
    pub fn drain_host_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.host_events)
    }

    /// Markiert eine strukturelle Änderung und benachrichtigt den Host.
    pub fn mark_changed(&mut self) {
        let revision = self.editor.mark_dirty();
        self.push_host_event(HostEvent::DiagramChanged { revision });
    }
}
