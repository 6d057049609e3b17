//! Use-Case: Diagramm laden, anlegen und Layout speichern.
//!
//! Speichern läuft zweiphasig: `prepare_save` schnappt Payload und Revision,
//! `finish_save` wertet das Ergebnis aus. Dazwischen darf weiter editiert
//! werden; das Dirty-Flag fällt nur, wenn seitdem nichts geändert wurde.

use std::sync::Arc;

use crate::app::events::HostEvent;
use crate::app::state::{EditorState, SelectionState};
use crate::app::use_cases::layout;
use crate::app::AppState;
use crate::core::{DiagramModel, EngineError, ValidationError};
use crate::persistence::{
    build_layout_payload, CreateDiagramRequest, DiagramSnapshot, PersistenceGateway, SaveTicket,
};
use crate::shared::EditorMode;

/// Lädt ein Diagramm und ersetzt den kompletten Editor-Zustand.
///
/// Bei `NotFound` wird `DiagramNotFound` gemeldet und der bisherige
/// Zustand bleibt erhalten.
pub fn load_diagram(
    state: &mut AppState,
    gateway: &PersistenceGateway,
    diagram_id: &str,
    mode: Option<EditorMode>,
) -> Result<(), EngineError> {
    match gateway.load(diagram_id) {
        Ok(snapshot) => {
            install_snapshot(state, snapshot, mode);
            Ok(())
        }
        Err(e) => {
            if e.is_not_found() {
                log::warn!("Diagramm {} nicht gefunden", diagram_id);
                state.push_host_event(HostEvent::DiagramNotFound {
                    diagram_id: diagram_id.to_string(),
                });
            } else {
                log::error!("Laden von {} fehlgeschlagen: {}", diagram_id, e);
            }
            Err(e)
        }
    }
}

/// Legt ein leeres Diagramm an und öffnet es im Edit-Modus.
pub fn create_diagram(
    state: &mut AppState,
    gateway: &PersistenceGateway,
    request: &CreateDiagramRequest,
) -> Result<(), EngineError> {
    let diagram = gateway.create(request)?;
    install_snapshot(state, DiagramSnapshot::empty(diagram), Some(EditorMode::Edit));
    Ok(())
}

/// Übernimmt einen geladenen Stand als neues Modell.
pub fn install_snapshot(state: &mut AppState, snapshot: DiagramSnapshot, mode: Option<EditorMode>) {
    let DiagramSnapshot {
        diagrama,
        equipamentos,
        conexoes,
    } = snapshot;
    let diagram_id = diagrama.id.clone();
    let (model, report) = DiagramModel::from_parts(diagrama, equipamentos, conexoes);

    let cleaned = report.skipped_deleted
        + report.skipped_duplicates
        + report.pruned_connections
        + report.pruned_self_port;
    if cleaned > 0 {
        log::warn!(
            "Diagramm {} bereinigt: {} gelöscht, {} doppelt, {} hängend, {} Self-Port",
            diagram_id,
            report.skipped_deleted,
            report.skipped_duplicates,
            report.pruned_connections,
            report.pruned_self_port
        );
    }

    state.diagram = Some(Arc::new(model));
    state.selection = SelectionState::new();
    state.editor = EditorState::new(
        mode.unwrap_or(state.options.initial_mode),
        state.options.snap_to_grid_default,
    )
    .continue_after(state.editor.revision());
    state.view.viewport.reset();
    state.view.viewport.is_dragging = false;
    layout::recompute(state);

    log::info!(
        "Diagramm {} aktiv ({} Equipments, {} Verbindungen, Modus {})",
        diagram_id,
        state.equipment_count(),
        state.connection_count(),
        state.editor.mode().as_str()
    );
    state.push_host_event(HostEvent::DiagramLoaded { diagram_id });
}

/// Schnappt Layout-Payload und Revision für einen Speichervorgang.
pub fn prepare_save(state: &AppState) -> Result<SaveTicket, EngineError> {
    let diagram = state
        .diagram
        .as_deref()
        .ok_or(ValidationError::NoDiagram)?;
    Ok(SaveTicket {
        payload: build_layout_payload(diagram),
        revision: state.editor.revision(),
    })
}

/// Wertet das Ergebnis eines Speichervorgangs aus.
///
/// Bei Fehlern bleibt das lokale Layout samt Dirty-Flag unverändert.
pub fn finish_save(
    state: &mut AppState,
    ticket: &SaveTicket,
    outcome: Result<(), EngineError>,
) -> Result<(), EngineError> {
    match outcome {
        Ok(()) => {
            let same_diagram = state
                .diagram
                .as_deref()
                .is_some_and(|d| d.meta.id == ticket.payload.diagrama_id);
            if !same_diagram {
                log::info!(
                    "Gespeichert: {} (nicht mehr aktiv)",
                    ticket.payload.diagrama_id
                );
            } else if !state.editor.mark_saved(ticket.revision) {
                log::info!(
                    "Gespeichert (Revision {}), inzwischen weiter geändert (Revision {})",
                    ticket.revision,
                    state.editor.revision()
                );
            }
            state.push_host_event(HostEvent::SaveSucceeded {
                revision: ticket.revision,
            });
            Ok(())
        }
        Err(e) => {
            state.push_host_event(HostEvent::SaveFailed {
                message: e.to_string(),
            });
            Err(e)
        }
    }
}

/// Speichert synchron über das Gateway.
pub fn save_layout(state: &mut AppState, gateway: &PersistenceGateway) -> Result<(), EngineError> {
    let ticket = prepare_save(state)?;
    let outcome = gateway.save_layout(&ticket.payload);
    finish_save(state, &ticket, outcome)
}
