//! Use-Case: Moduswechsel und Snap-Einstellung.

use crate::app::events::HostEvent;
use crate::app::use_cases::selection;
use crate::app::AppState;
use crate::core::EngineError;
use crate::shared::EditorMode;

/// Wechselt zwischen `View` und `Edit`.
///
/// Eine laufende Geste wird an ihrer letzten Position abgeschlossen,
/// eine laufende Verbindung verworfen. `Connecting` ist nur über
/// `start_connecting` erreichbar.
pub fn set_mode(state: &mut AppState, mode: EditorMode) -> Result<(), EngineError> {
    if mode == EditorMode::Connecting {
        return Err(crate::core::ValidationError::ModeForbids {
            action: "set_mode",
            mode: mode.as_str(),
        }
        .into());
    }
    let previous = state.editor.mode();
    if state.editor.drag().is_active() {
        selection::end_drag(state);
    }
    state.editor.set_mode(mode)?;
    if previous != mode {
        state.push_host_event(HostEvent::ModeChanged { mode });
        log::info!("Modus: {} → {}", previous.as_str(), mode.as_str());
    }
    Ok(())
}

/// Schaltet Snap-to-Grid um.
pub fn set_snap_to_grid(state: &mut AppState, enabled: bool) {
    state.editor.snap_to_grid = enabled;
    log::info!("Snap-to-Grid: {}", if enabled { "an" } else { "aus" });
}
