//! Use-Case: Verbindungen interaktiv erstellen und entfernen.
//!
//! Ablauf: Port-Klick im Edit-Modus startet (`start_connecting`), ein
//! zweiter Port-Klick schließt ab. Ein Klick auf eine Linie oder die leere
//! Fläche erzeugt an der gerasterten Stelle einen Junction-Point und
//! verbindet dorthin.

use crate::app::use_cases::layout;
use crate::app::AppState;
use crate::core::{
    Connection, DiagramModel, EngineError, Equipment, Port, ValidationError, JUNCTION_PORT,
};
use glam::Vec2;

use super::{deselect, diagram_mut};

/// Ziel eines `finish_connecting`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectTarget {
    /// Port eines bestehenden Equipments
    Port { equipment_id: String, port: Port },
    /// Freier Punkt (Welt-Pixel), optional auf einer bestehenden Verbindung
    Point {
        world_pos: Vec2,
        on_connection: Option<String>,
    },
}

/// Beginnt eine Verbindung an einem Port (nur aus dem Edit-Modus).
pub fn start_connecting(
    state: &mut AppState,
    equipment_id: &str,
    port: Port,
) -> Result<(), EngineError> {
    let Some(diagram) = state.diagram.as_ref() else {
        return Err(ValidationError::NoDiagram.into());
    };
    if !diagram.contains_equipment(equipment_id) {
        return Err(ValidationError::UnknownEquipment(equipment_id.to_string()).into());
    }
    state.editor.begin_connecting(equipment_id, port)?;
    log::info!(
        "Verbindung gestartet an {}/{}",
        equipment_id,
        port.as_str()
    );
    Ok(())
}

/// Schließt die laufende Verbindung ab und kehrt in den Edit-Modus zurück.
///
/// Bei einem Validierungsfehler bleibt der Connecting-Modus bestehen, damit
/// der Benutzer ein anderes Ziel wählen oder mit Escape abbrechen kann.
/// Gibt die ID der neuen Verbindung zurück.
pub fn finish_connecting(
    state: &mut AppState,
    target: ConnectTarget,
) -> Result<String, EngineError> {
    let Some((from_id, from_port)) = state
        .editor
        .connecting_from()
        .map(|(id, port)| (id.to_string(), port))
    else {
        return Err(state.editor.forbid("finish_connecting").into());
    };

    let connection_id = match target {
        ConnectTarget::Port { equipment_id, port } => {
            let diagram = diagram_mut(state)?;
            let id = diagram.next_connection_id();
            diagram.add_connection(Connection::new(
                id.clone(),
                from_id,
                from_port,
                equipment_id,
                port,
            ))?;
            id
        }
        ConnectTarget::Point {
            world_pos,
            on_connection,
        } => {
            let grid_pos = state.options.grid().point_to_grid(world_pos, true);
            let split = state.options.split_connection_on_junction;
            let diagram = diagram_mut(state)?;
            let (id, removed) =
                connect_to_junction(diagram, &from_id, from_port, grid_pos, on_connection, split)?;
            if let Some(removed) = removed {
                deselect(state, None, &[removed]);
            }
            id
        }
    };

    state.editor.end_connecting();
    layout::recompute(state);
    state.mark_changed();
    log::info!("Verbindung {} erstellt", connection_id);
    Ok(connection_id)
}

/// Legt einen Junction-Point an und verbindet den Start-Port dorthin.
///
/// Bei `split` wird die getroffene Verbindung A→B durch A→J und J→B
/// ersetzt. Gibt die neue Verbindungs-ID und ggf. die ersetzte ID zurück.
fn connect_to_junction(
    diagram: &mut DiagramModel,
    from_id: &str,
    from_port: Port,
    grid_pos: Vec2,
    on_connection: Option<String>,
    split: bool,
) -> Result<(String, Option<String>), ValidationError> {
    if !diagram.contains_equipment(from_id) {
        return Err(ValidationError::UnknownEquipment(from_id.to_string()));
    }

    let junction_id = diagram.next_junction_id();
    let mut junction = Equipment::junction(junction_id.clone(), grid_pos);
    junction.diagrama_id = Some(diagram.meta.id.clone());
    junction.unidade_id = diagram.meta.unidade_id.clone();
    diagram.add_equipment(junction)?;

    let connection_id = diagram.next_connection_id();
    if let Err(e) = diagram.add_connection(Connection::new(
        connection_id.clone(),
        from_id,
        from_port,
        junction_id.clone(),
        JUNCTION_PORT,
    )) {
        diagram.remove_equipment(&junction_id);
        return Err(e);
    }
    log::info!(
        "Junction-Point {} bei ({}, {}) angelegt",
        junction_id,
        grid_pos.x,
        grid_pos.y
    );

    let mut replaced = None;
    if split {
        if let Some(target) = on_connection.and_then(|id| diagram.remove_connection(&id)) {
            let first = diagram.next_connection_id();
            diagram.add_connection(Connection::new(
                first,
                target.origem_id.clone(),
                target.origem_porta,
                junction_id.clone(),
                JUNCTION_PORT,
            ))?;
            let second = diagram.next_connection_id();
            diagram.add_connection(Connection::new(
                second,
                junction_id.clone(),
                JUNCTION_PORT,
                target.destino_id.clone(),
                target.destino_porta,
            ))?;
            log::info!("Verbindung {} am Junction-Point aufgetrennt", target.id);
            replaced = Some(target.id);
        }
    }

    Ok((connection_id, replaced))
}

/// Bricht die laufende Verbindung ab (Escape).
pub fn cancel_connecting(state: &mut AppState) {
    if let Some((from, port)) = state.editor.end_connecting() {
        log::info!("Verbindung von {}/{} abgebrochen", from, port.as_str());
    }
}

/// Entfernt eine Verbindung.
pub fn remove_conexao(state: &mut AppState, connection_id: &str) -> Result<(), EngineError> {
    state.editor.require_mutation("remove_conexao")?;
    let diagram = diagram_mut(state)?;
    if diagram.remove_connection(connection_id).is_none() {
        return Err(ValidationError::UnknownConnection(connection_id.to_string()).into());
    }
    deselect(state, None, &[connection_id.to_string()]);
    layout::recompute(state);
    state.mark_changed();
    log::info!("Verbindung {} entfernt", connection_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Diagram, EquipmentType};
    use crate::shared::EditorMode;
    use std::sync::Arc;

    fn edit_state() -> AppState {
        let mut model = DiagramModel::new(Diagram::default());
        for (id, pos) in [("a", Vec2::new(0.0, 0.0)), ("b", Vec2::new(0.0, 6.0))] {
            model
                .add_equipment(Equipment::new(id, id, EquipmentType::Disjuntor, pos))
                .unwrap();
        }
        let mut state = AppState::new();
        state.diagram = Some(Arc::new(model));
        state.editor.set_mode(EditorMode::Edit).unwrap();
        state
    }

    #[test]
    fn test_port_zu_port() {
        let mut state = edit_state();
        start_connecting(&mut state, "a", Port::Bottom).unwrap();
        assert_eq!(state.editor.mode(), EditorMode::Connecting);
        let id = finish_connecting(
            &mut state,
            ConnectTarget::Port {
                equipment_id: "b".into(),
                port: Port::Top,
            },
        )
        .unwrap();
        assert_eq!(state.editor.mode(), EditorMode::Edit);
        assert!(state.editor.connecting_from().is_none());
        assert!(state.layout.visual(&id).is_some());
        assert!(state.editor.is_dirty());
    }

    #[test]
    fn test_self_port_bleibt_im_connecting_modus() {
        let mut state = edit_state();
        start_connecting(&mut state, "a", Port::Bottom).unwrap();
        let err = finish_connecting(
            &mut state,
            ConnectTarget::Port {
                equipment_id: "a".into(),
                port: Port::Bottom,
            },
        )
        .expect_err("Self-Port");
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::SelfPortConnection { .. })
        ));
        assert_eq!(state.editor.mode(), EditorMode::Connecting);
        assert_eq!(state.connection_count(), 0);
        assert!(!state.editor.is_dirty());
    }

    #[test]
    fn test_klick_auf_flaeche_erzeugt_junction() {
        let mut state = edit_state();
        start_connecting(&mut state, "a", Port::Right).unwrap();
        finish_connecting(
            &mut state,
            ConnectTarget::Point {
                world_pos: Vec2::new(147.0, 13.0),
                on_connection: None,
            },
        )
        .unwrap();
        let diagram = state.diagram.as_ref().unwrap();
        let junction = diagram
            .equipamentos_iter()
            .find(|eq| eq.is_junction())
            .expect("Junction angelegt");
        assert_eq!(junction.grid_position(), Vec2::new(7.0, 1.0));
        assert_eq!(state.connection_count(), 1);
    }

    #[test]
    fn test_split_ersetzt_getroffene_verbindung() {
        let mut state = edit_state();
        state.options.split_connection_on_junction = true;
        Arc::make_mut(state.diagram.as_mut().unwrap())
            .add_connection(Connection::new("ab", "a", Port::Bottom, "b", Port::Top))
            .unwrap();
        Arc::make_mut(state.diagram.as_mut().unwrap())
            .add_equipment(Equipment::new(
                "c",
                "c",
                EquipmentType::Disjuntor,
                Vec2::new(6.0, 3.0),
            ))
            .unwrap();

        start_connecting(&mut state, "c", Port::Left).unwrap();
        finish_connecting(
            &mut state,
            ConnectTarget::Point {
                world_pos: Vec2::new(20.0, 80.0),
                on_connection: Some("ab".into()),
            },
        )
        .unwrap();

        let diagram = state.diagram.as_ref().unwrap();
        assert!(diagram.connection("ab").is_none());
        assert_eq!(diagram.connection_count(), 3);
    }

    #[test]
    fn test_cancel_kehrt_in_edit_zurueck() {
        let mut state = edit_state();
        start_connecting(&mut state, "a", Port::Top).unwrap();
        cancel_connecting(&mut state);
        assert_eq!(state.editor.mode(), EditorMode::Edit);
        assert_eq!(state.connection_count(), 0);
    }
}
