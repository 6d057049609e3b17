//! Mapping von Host-Intents auf mutierende App-Commands.
//!
//! Hier lebt die Modus-Tabelle des Editors: derselbe Klick bedeutet im
//! View-Modus "Host benachrichtigen", im Edit-Modus "selektieren" und im
//! Connecting-Modus "Verbindung abschließen".

use super::events::HostEvent;
use super::use_cases::selection::{pick_target, PickTarget};
use super::use_cases::viewport::wheel_factor;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::EditorMode;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let mode = state.editor.mode();
    match intent {
        // === Persistenz ===
        AppIntent::LoadDiagramRequested { diagram_id, mode } => {
            vec![AppCommand::LoadDiagram { diagram_id, mode }]
        }
        AppIntent::CreateDiagramRequested {
            diagram_id,
            nome,
            descricao,
            unidade_id,
        } => vec![AppCommand::CreateDiagram {
            diagram_id,
            nome,
            descricao,
            unidade_id,
        }],
        AppIntent::SaveRequested => vec![AppCommand::SaveLayout],

        // === Modus & Optionen ===
        AppIntent::SetModeRequested { mode } => vec![AppCommand::SetMode { mode }],
        AppIntent::SnapToGridToggled { enabled } => vec![AppCommand::SetSnapToGrid { enabled }],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],

        // === Klicks ===
        AppIntent::EquipmentClicked { equipment_id } => match mode {
            EditorMode::View => vec![emit(HostEvent::EquipmentClicked { equipment_id })],
            EditorMode::Edit => vec![AppCommand::SelectEquipment { equipment_id }],
            // Körper ist kein Verbindungsziel, nur Ports
            EditorMode::Connecting => vec![],
        },
        AppIntent::EquipmentDoubleClicked { equipment_id } => match mode {
            EditorMode::Edit => vec![emit(HostEvent::EditEquipmentRequested { equipment_id })],
            _ => vec![],
        },
        AppIntent::PortClicked { equipment_id, port } => match mode {
            EditorMode::View => vec![emit(HostEvent::EquipmentClicked { equipment_id })],
            EditorMode::Edit => vec![AppCommand::StartConnecting { equipment_id, port }],
            EditorMode::Connecting => {
                vec![AppCommand::FinishConnectingAtPort { equipment_id, port }]
            }
        },
        AppIntent::ConnectionClicked {
            connection_id,
            screen_pos,
        } => match mode {
            EditorMode::View => vec![emit(HostEvent::ConnectionClicked { connection_id })],
            EditorMode::Edit => vec![AppCommand::SelectConnection { connection_id }],
            EditorMode::Connecting => vec![AppCommand::FinishConnectingAtPoint {
                world_pos: state.view.screen_to_world(screen_pos),
                on_connection: Some(connection_id),
            }],
        },
        AppIntent::BackgroundClicked { screen_pos } => {
            let world_pos = state.view.screen_to_world(screen_pos);
            match mode {
                EditorMode::View => vec![emit(HostEvent::BackgroundClicked { world_pos })],
                EditorMode::Edit => vec![AppCommand::ClearSelection],
                EditorMode::Connecting => vec![AppCommand::FinishConnectingAtPoint {
                    world_pos,
                    on_connection: None,
                }],
            }
        }
        AppIntent::CanvasClicked { screen_pos } => {
            let world_pos = state.view.screen_to_world(screen_pos);
            let resolved = match pick_target(state, world_pos) {
                PickTarget::Port { equipment_id, port } => {
                    AppIntent::PortClicked { equipment_id, port }
                }
                PickTarget::Equipment { equipment_id } => {
                    AppIntent::EquipmentClicked { equipment_id }
                }
                PickTarget::Connection { connection_id } => AppIntent::ConnectionClicked {
                    connection_id,
                    screen_pos,
                },
                PickTarget::Background => AppIntent::BackgroundClicked { screen_pos },
            };
            map_intent_to_commands(state, resolved)
        }

        // === Gesten ===
        AppIntent::EquipmentDragStarted {
            equipment_id,
            screen_pos,
        } if mode == EditorMode::Edit => vec![AppCommand::BeginEquipmentDrag {
            equipment_id,
            world_pos: state.view.screen_to_world(screen_pos),
        }],
        AppIntent::LabelDragStarted {
            equipment_id,
            screen_pos,
        } if mode == EditorMode::Edit => vec![AppCommand::BeginLabelDrag {
            equipment_id,
            world_pos: state.view.screen_to_world(screen_pos),
        }],
        AppIntent::EquipmentDragStarted { .. } | AppIntent::LabelDragStarted { .. } => vec![],
        AppIntent::PanStarted { screen_pos } => vec![AppCommand::BeginPan { screen_pos }],
        AppIntent::PointerMoved { screen_pos } => {
            if state.editor.drag().is_active() {
                vec![AppCommand::DragTo { screen_pos }]
            } else {
                vec![]
            }
        }
        AppIntent::PointerReleased | AppIntent::PointerLeft => {
            if state.editor.drag().is_active() {
                vec![AppCommand::EndDrag]
            } else {
                vec![]
            }
        }

        // === Viewport ===
        AppIntent::WheelScrolled { steps, screen_pos } => vec![AppCommand::ZoomAt {
            factor: wheel_factor(state, steps),
            screen_pos,
        }],
        AppIntent::ResetViewRequested => vec![AppCommand::ResetView],
        AppIntent::CanvasOriginChanged { origin } => vec![AppCommand::SetCanvasOrigin { origin }],

        // === Tastatur ===
        AppIntent::CancelRequested => match mode {
            EditorMode::Connecting => vec![AppCommand::CancelConnecting],
            EditorMode::Edit => vec![AppCommand::ClearSelection],
            EditorMode::View => vec![],
        },
        AppIntent::DeleteSelectedRequested => {
            if mode == EditorMode::Edit && !state.selection.is_empty() {
                vec![AppCommand::DeleteSelected]
            } else {
                vec![]
            }
        }

        // === Property-Editor (Modus wird im Use-Case geprüft) ===
        AppIntent::AddEquipmentRequested {
            available,
            grid_pos,
        } => vec![AppCommand::AddEquipment {
            available,
            grid_pos,
        }],
        AppIntent::RemoveEquipmentRequested { equipment_id } => {
            vec![AppCommand::RemoveEquipment { equipment_id }]
        }
        AppIntent::EquipmentPositionChanged {
            equipment_id,
            grid_pos,
        } => vec![AppCommand::UpdateEquipmentPosition {
            equipment_id,
            grid_pos,
        }],
        AppIntent::LabelOffsetChanged {
            equipment_id,
            offset,
        } => vec![AppCommand::UpdateLabelOffset {
            equipment_id,
            offset,
        }],
        AppIntent::LabelPositionChanged {
            equipment_id,
            position,
        } => vec![AppCommand::SetLabelPosition {
            equipment_id,
            position,
        }],
        AppIntent::RemoveConnectionRequested { connection_id } => {
            vec![AppCommand::RemoveConnection { connection_id }]
        }
    }
}

fn emit(event: HostEvent) -> AppCommand {
    AppCommand::EmitHostEvent { event }
}
