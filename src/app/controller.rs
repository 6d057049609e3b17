//! Application Controller für zentrale Event-Verarbeitung.

use super::events::HostEvent;
use super::render_scene;
use super::use_cases;
use super::{AppCommand, AppIntent, AppState};
use crate::core::EngineError;
use crate::persistence::{CreateDiagramRequest, DiagramService, PersistenceGateway, SaveTicket};
use crate::shared::RenderScene;

/// Orchestriert Host-Events und Use-Cases auf den AppState.
#[derive(Debug, Default)]
pub struct AppController {
    gateway: PersistenceGateway,
}

impl AppController {
    /// Erstellt einen Controller über einem leeren In-Memory-Backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt einen Controller über dem gegebenen Diagramm-Service.
    pub fn with_service(service: impl DiagramService + 'static) -> Self {
        Self {
            gateway: PersistenceGateway::new(service),
        }
    }

    /// Zugriff auf das Persistenz-Gateway.
    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    ///
    /// Jeder Command landet samt Ergebnis im Command-Log, abgelehnte
    /// Commands sind dort über `last_rejected()` für den Host abrufbar.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        let logged = command.clone();
        let result = self.dispatch(state, command);
        match &result {
            Ok(()) => state.command_log.record_applied(logged),
            Err(e) => {
                log::debug!("Command {:?} abgelehnt: {:#}", logged, e);
                state.command_log.record_rejected(logged, format!("{e:#}"));
            }
        }
        result
    }

    /// Dispatcht an Feature-Handler in `handlers/`.
    fn dispatch(&self, state: &mut AppState, command: AppCommand) -> anyhow::Result<()> {
        use super::handlers;

        match command {
            // === Persistenz ===
            AppCommand::LoadDiagram { diagram_id, mode } => {
                handlers::persistence::load(state, &self.gateway, &diagram_id, mode)?
            }
            AppCommand::CreateDiagram {
                diagram_id,
                nome,
                descricao,
                unidade_id,
            } => handlers::persistence::create(
                state,
                &self.gateway,
                CreateDiagramRequest {
                    id: diagram_id,
                    nome,
                    descricao,
                    unidade_id,
                },
            )?,
            AppCommand::SaveLayout => handlers::persistence::save(state, &self.gateway)?,

            // === Modus & Optionen ===
            AppCommand::SetMode { mode } => handlers::editing::set_mode(state, mode)?,
            AppCommand::SetSnapToGrid { enabled } => {
                handlers::editing::set_snap_to_grid(state, enabled)
            }
            AppCommand::ApplyOptions { options } => handlers::view::apply_options(state, *options),
            AppCommand::EmitHostEvent { event } => handlers::view::emit_host_event(state, event),

            // === Selektion ===
            AppCommand::SelectEquipment { equipment_id } => {
                handlers::selection::select_equipment(state, &equipment_id)?
            }
            AppCommand::SelectConnection { connection_id } => {
                handlers::selection::select_connection(state, &connection_id)?
            }
            AppCommand::ClearSelection => handlers::selection::clear(state),

            // === Verbindungen ===
            AppCommand::StartConnecting { equipment_id, port } => {
                handlers::editing::start_connecting(state, &equipment_id, port)?
            }
            AppCommand::FinishConnectingAtPort { equipment_id, port } => {
                handlers::editing::finish_at_port(state, equipment_id, port)?
            }
            AppCommand::FinishConnectingAtPoint {
                world_pos,
                on_connection,
            } => handlers::editing::finish_at_point(state, world_pos, on_connection)?,
            AppCommand::CancelConnecting => handlers::editing::cancel_connecting(state),
            AppCommand::RemoveConnection { connection_id } => {
                handlers::editing::remove_connection(state, &connection_id)?
            }

            // === Editing ===
            AppCommand::AddEquipment {
                available,
                grid_pos,
            } => handlers::editing::add_equipment(state, &available, grid_pos)?,
            AppCommand::RemoveEquipment { equipment_id } => {
                handlers::editing::remove_equipment(state, &equipment_id)?
            }
            AppCommand::DeleteSelected => handlers::editing::delete_selected(state)?,
            AppCommand::UpdateEquipmentPosition {
                equipment_id,
                grid_pos,
            } => handlers::editing::update_position(state, &equipment_id, grid_pos)?,
            AppCommand::UpdateLabelOffset {
                equipment_id,
                offset,
            } => handlers::editing::update_label_offset(state, &equipment_id, offset)?,
            AppCommand::SetLabelPosition {
                equipment_id,
                position,
            } => handlers::editing::set_label_position(state, &equipment_id, position)?,

            // === Gesten ===
            AppCommand::BeginEquipmentDrag {
                equipment_id,
                world_pos,
            } => handlers::selection::begin_equipment_drag(state, &equipment_id, world_pos)?,
            AppCommand::BeginLabelDrag {
                equipment_id,
                world_pos,
            } => handlers::selection::begin_label_drag(state, &equipment_id, world_pos)?,
            AppCommand::BeginPan { screen_pos } => {
                handlers::selection::begin_pan(state, screen_pos)
            }
            AppCommand::DragTo { screen_pos } => handlers::selection::drag_to(state, screen_pos),
            AppCommand::EndDrag => handlers::selection::end_drag(state),

            // === Viewport ===
            AppCommand::ZoomAt { factor, screen_pos } => {
                handlers::view::zoom_at(state, factor, screen_pos)
            }
            AppCommand::ResetView => handlers::view::reset_view(state),
            AppCommand::SetCanvasOrigin { origin } => {
                handlers::view::set_canvas_origin(state, origin)
            }
        }

        Ok(())
    }

    /// Erste Phase eines asynchronen Speicherns: Payload und Revision schnappen.
    ///
    /// Der Host schickt `ticket.payload` selbst ab und meldet das Ergebnis
    /// über [`finish_save`](Self::finish_save) zurück.
    pub fn prepare_save(&self, state: &AppState) -> Result<SaveTicket, EngineError> {
        use_cases::persistence::prepare_save(state)
    }

    /// Zweite Phase eines asynchronen Speicherns.
    pub fn finish_save(
        &self,
        state: &mut AppState,
        ticket: &SaveTicket,
        outcome: Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        use_cases::persistence::finish_save(state, ticket, outcome)
    }

    /// Holt alle Host-Events ab.
    pub fn drain_host_events(&self, state: &mut AppState) -> Vec<HostEvent> {
        state.drain_host_events()
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
