//! Integrationstests für den Intent → Command → Use-Case Fluss über den Controller.

use glam::Vec2;
use unifilar_editor::persistence::DiagramSnapshot;
use unifilar_editor::{
    AppCommand, AppController, AppIntent, AppState, Connection, Diagram, EditorMode, EngineError,
    EngineOptions, Equipment, EquipmentType, HostEvent, InMemoryDiagramService, Port,
};

/// Transformator mit drei Abgängen (ergibt eine Sammelschiene) plus freiem Motor.
fn seeded_service() -> InMemoryDiagramService {
    let service = InMemoryDiagramService::new();
    let mut snapshot = DiagramSnapshot::empty(Diagram {
        id: "sub-01".into(),
        nome: "Subestação Norte".into(),
        descricao: None,
        unidade_id: "u-7".into(),
    });
    snapshot.equipamentos = vec![
        Equipment::new("t1", "TR-01", EquipmentType::Transformador, Vec2::new(6.0, 0.0)),
        Equipment::new("d1", "DJ-01", EquipmentType::Disjuntor, Vec2::new(0.0, 8.0)),
        Equipment::new("d2", "DJ-02", EquipmentType::Disjuntor, Vec2::new(6.0, 8.0)),
        Equipment::new("d3", "DJ-03", EquipmentType::Disjuntor, Vec2::new(12.0, 8.0)),
        Equipment::new("m1", "M-01", EquipmentType::Motor, Vec2::new(20.0, 0.0)),
    ];
    snapshot.conexoes = vec![
        Connection::new("c1", "t1", Port::Bottom, "d1", Port::Top),
        Connection::new("c2", "t1", Port::Bottom, "d2", Port::Top),
        Connection::new("c3", "t1", Port::Bottom, "d3", Port::Top),
    ];
    service.insert(snapshot);
    service
}

fn loaded(mode: EditorMode) -> (AppController, AppState, InMemoryDiagramService) {
    let service = seeded_service();
    let mut controller = AppController::with_service(service.clone());
    let mut state = AppState::new();
    controller
        .handle_intent(
            &mut state,
            AppIntent::LoadDiagramRequested {
                diagram_id: "sub-01".into(),
                mode: Some(mode),
            },
        )
        .expect("Diagramm sollte laden");
    state.drain_host_events();
    (controller, state, service)
}

#[test]
fn test_load_requested_hydrates_model_and_layout() {
    let service = seeded_service();
    let mut controller = AppController::with_service(service);
    let mut state = AppState::new();

    controller
        .handle_intent(
            &mut state,
            AppIntent::LoadDiagramRequested {
                diagram_id: "sub-01".into(),
                mode: None,
            },
        )
        .expect("LoadDiagramRequested sollte durchlaufen");

    assert_eq!(state.equipment_count(), 5);
    assert_eq!(state.connection_count(), 3);
    assert_eq!(state.layout.visual_connections.len(), 3);
    assert_eq!(state.layout.barramentos.len(), 1);
    assert_eq!(state.editor.mode(), EditorMode::View);
    assert!(!state.editor.is_dirty());

    match state.command_log.last().map(|r| &r.command) {
        Some(AppCommand::LoadDiagram { diagram_id, .. }) => assert_eq!(diagram_id, "sub-01"),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
    assert_eq!(
        controller.drain_host_events(&mut state),
        vec![HostEvent::DiagramLoaded {
            diagram_id: "sub-01".into()
        }]
    );
}

#[test]
fn test_load_unknown_diagram_is_distinct_not_found() {
    let mut controller = AppController::with_service(seeded_service());
    let mut state = AppState::new();

    let err = controller
        .handle_intent(
            &mut state,
            AppIntent::LoadDiagramRequested {
                diagram_id: "fehlt".into(),
                mode: None,
            },
        )
        .expect_err("unbekanntes Diagramm muss fehlschlagen");

    let engine_err = err
        .downcast_ref::<EngineError>()
        .expect("Fehler sollte ein EngineError sein");
    assert!(engine_err.is_not_found());
    assert!(state.diagram.is_none());
    assert_eq!(
        state.drain_host_events(),
        vec![HostEvent::DiagramNotFound {
            diagram_id: "fehlt".into()
        }]
    );
}

#[test]
fn test_create_after_not_found_opens_empty_diagram() {
    let mut controller = AppController::with_service(seeded_service());
    let mut state = AppState::new();

    let _ = controller.handle_intent(
        &mut state,
        AppIntent::LoadDiagramRequested {
            diagram_id: "novo".into(),
            mode: None,
        },
    );
    controller
        .handle_intent(
            &mut state,
            AppIntent::CreateDiagramRequested {
                diagram_id: "novo".into(),
                nome: "Novo Diagrama".into(),
                descricao: Some("criado no editor".into()),
                unidade_id: "u-7".into(),
            },
        )
        .expect("Anlegen sollte funktionieren");

    assert_eq!(state.equipment_count(), 0);
    assert_eq!(state.editor.mode(), EditorMode::Edit);
    let events = state.drain_host_events();
    assert_eq!(
        events.last(),
        Some(&HostEvent::DiagramLoaded {
            diagram_id: "novo".into()
        })
    );
}

#[test]
fn test_view_mode_clicks_notify_host_without_selecting() {
    let (mut controller, mut state, _) = loaded(EditorMode::View);

    controller
        .handle_intent(
            &mut state,
            AppIntent::EquipmentClicked {
                equipment_id: "d2".into(),
            },
        )
        .expect("Klick im View-Modus");
    controller
        .handle_intent(
            &mut state,
            AppIntent::BackgroundClicked {
                screen_pos: Vec2::new(700.0, 700.0),
            },
        )
        .expect("Hintergrund-Klick im View-Modus");

    assert!(state.selection.is_empty());
    assert_eq!(
        state.drain_host_events(),
        vec![
            HostEvent::EquipmentClicked {
                equipment_id: "d2".into()
            },
            HostEvent::BackgroundClicked {
                world_pos: Vec2::new(700.0, 700.0)
            },
        ]
    );
}

#[test]
fn test_view_mode_port_click_never_enters_connecting() {
    let (mut controller, mut state, _) = loaded(EditorMode::View);

    controller
        .handle_intent(
            &mut state,
            AppIntent::PortClicked {
                equipment_id: "m1".into(),
                port: Port::Bottom,
            },
        )
        .expect("Port-Klick im View-Modus");

    assert_eq!(state.editor.mode(), EditorMode::View);
    assert!(state.editor.connecting_from().is_none());
}

#[test]
fn test_set_mode_connecting_is_rejected() {
    let (mut controller, mut state, _) = loaded(EditorMode::View);

    let result = controller.handle_intent(
        &mut state,
        AppIntent::SetModeRequested {
            mode: EditorMode::Connecting,
        },
    );

    assert!(result.is_err());
    assert_eq!(state.editor.mode(), EditorMode::View);

    let rejected = state
        .command_log
        .last_rejected()
        .expect("abgelehnter Command im Log");
    assert_eq!(
        rejected.command,
        AppCommand::SetMode {
            mode: EditorMode::Connecting
        }
    );
    assert_eq!(state.command_log.rejected_total(), 1);
}

#[test]
fn test_edit_mode_port_click_enters_connecting() {
    let (mut controller, mut state, _) = loaded(EditorMode::Edit);

    controller
        .handle_intent(
            &mut state,
            AppIntent::PortClicked {
                equipment_id: "m1".into(),
                port: Port::Bottom,
            },
        )
        .expect("Port-Klick im Edit-Modus");

    assert_eq!(state.editor.mode(), EditorMode::Connecting);
    assert_eq!(state.editor.connecting_from(), Some(("m1", Port::Bottom)));
    assert!(controller
        .build_render_scene(&state)
        .connecting_from
        .is_some());
}

#[test]
fn test_mode_switch_emits_mode_changed() {
    let (mut controller, mut state, _) = loaded(EditorMode::View);

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetModeRequested {
                mode: EditorMode::Edit,
            },
        )
        .expect("Wechsel nach Edit");

    assert_eq!(
        state.drain_host_events(),
        vec![HostEvent::ModeChanged {
            mode: EditorMode::Edit
        }]
    );
}

#[test]
fn test_connect_then_save_round_trip() {
    let (mut controller, mut state, service) = loaded(EditorMode::Edit);

    for intent in [
        AppIntent::PortClicked {
            equipment_id: "m1".into(),
            port: Port::Bottom,
        },
        AppIntent::PortClicked {
            equipment_id: "d3".into(),
            port: Port::Right,
        },
        AppIntent::SaveRequested,
    ] {
        controller
            .handle_intent(&mut state, intent)
            .expect("Schritt sollte durchlaufen");
    }

    assert_eq!(state.editor.mode(), EditorMode::Edit);
    assert_eq!(state.connection_count(), 4);
    assert!(!state.editor.is_dirty());
    assert_eq!(service.put_count(), 1);

    let stored = service.snapshot("sub-01").expect("Diagramm gespeichert");
    assert_eq!(stored.conexoes.len(), 4);
    assert!(stored
        .conexoes
        .iter()
        .any(|c| c.origem_id == "m1" && c.destino_id == "d3"));

    let events = state.drain_host_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, HostEvent::SaveSucceeded { .. })));
}

#[test]
fn test_canvas_click_selects_equipment_via_engine_hit_test() {
    let (mut controller, mut state, _) = loaded(EditorMode::Edit);
    let scene = controller.build_render_scene(&state);
    let d2 = scene.equipment("d2").expect("d2 in Szene");
    let center = d2.position_px + d2.size_px * 0.5;

    controller
        .handle_intent(&mut state, AppIntent::CanvasClicked { screen_pos: center })
        .expect("Canvas-Klick");

    assert!(state.selection.equipment_ids.contains("d2"));
    assert_eq!(state.selection.equipment_ids.len(), 1);
}

#[test]
fn test_double_click_in_edit_mode_requests_property_editor() {
    let (mut controller, mut state, _) = loaded(EditorMode::Edit);

    controller
        .handle_intent(
            &mut state,
            AppIntent::EquipmentDoubleClicked {
                equipment_id: "t1".into(),
            },
        )
        .expect("Doppelklick");

    assert_eq!(
        state.drain_host_events(),
        vec![HostEvent::EditEquipmentRequested {
            equipment_id: "t1".into()
        }]
    );
}

#[test]
fn test_wheel_zoom_keeps_world_point_under_pointer() {
    let (mut controller, mut state, _) = loaded(EditorMode::View);
    controller
        .handle_intent(
            &mut state,
            AppIntent::CanvasOriginChanged {
                origin: Vec2::new(50.0, 30.0),
            },
        )
        .expect("Canvas-Ursprung");
    let pointer = Vec2::new(350.0, 230.0);
    let before = state.view.screen_to_world(pointer);

    controller
        .handle_intent(
            &mut state,
            AppIntent::WheelScrolled {
                steps: 3.0,
                screen_pos: pointer,
            },
        )
        .expect("Zoom");

    let after = state.view.screen_to_world(pointer);
    assert!(state.view.viewport.scale > 1.0);
    assert!((before - after).length() < 1e-3);
}

#[test]
fn test_swapped_zoom_bounds_from_options_do_not_abort_zoom() {
    let mut controller = AppController::new();
    let mut state = AppState::with_options(EngineOptions {
        zoom_min: 5.0,
        zoom_max: 1.0,
        ..EngineOptions::default()
    });

    controller
        .handle_intent(
            &mut state,
            AppIntent::WheelScrolled {
                steps: 2.0,
                screen_pos: Vec2::new(10.0, 10.0),
            },
        )
        .expect("Zoom mit vertauschten Grenzen");
    let scale = state.view.viewport.scale;
    assert!((1.0..=5.0).contains(&scale), "scale = {scale}");

    controller
        .handle_intent(
            &mut state,
            AppIntent::OptionsChanged {
                options: Box::new(EngineOptions {
                    zoom_min: f32::NAN,
                    zoom_max: 0.5,
                    ..EngineOptions::default()
                }),
            },
        )
        .expect("Optionen übernehmen");
    controller
        .handle_intent(
            &mut state,
            AppIntent::WheelScrolled {
                steps: -1.0,
                screen_pos: Vec2::ZERO,
            },
        )
        .expect("Zoom nach Optionswechsel");
    assert!(state.options.zoom_min <= state.options.zoom_max);
    assert!(state.view.viewport.scale.is_finite());
}
