//! Use-Case: abgeleitetes Layout (Routen + Sammelschienen) aktuell halten.

use crate::app::AppState;
use crate::core::DiagramLayout;

/// Berechnet das komplette Layout aus dem aktuellen Diagramm neu.
pub fn recompute(state: &mut AppState) {
    state.layout = match state.diagram.as_ref() {
        Some(diagram) => DiagramLayout::compute(diagram, &state.options.layout_params()),
        None => DiagramLayout::default(),
    };
}

/// Routet nur die Verbindungen eines Equipments neu (während eines Drags).
pub fn reroute_equipment(state: &mut AppState, equipment_id: &str) {
    let Some(diagram) = state.diagram.as_ref() else {
        return;
    };
    let params = state.options.layout_params();
    let rerouted = state.layout.reroute_equipment(diagram, equipment_id, &params);
    log::debug!(
        "{} Verbindung(en) von {} neu geroutet",
        rerouted,
        equipment_id
    );
}
