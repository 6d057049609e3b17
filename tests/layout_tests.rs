//! Eigenschaftstests für Raster, Routing und Sammelschienen-Erkennung
//! über viele Positionen und Port-Kombinationen.

use glam::Vec2;
use unifilar_editor::core::routing::{bend_count, is_axis_aligned};
use unifilar_editor::core::{
    detect_barramentos, route, route_connection, screen_to_world, world_to_screen,
    Connection, Diagram, DiagramLayout, DiagramModel, Endpoint, Equipment, EquipmentType, Grid,
    LayoutParams, Port, Viewport, VisualConnection,
};

#[test]
fn test_grid_round_trip_without_snap() {
    let grid = Grid::default();
    for i in -200..=200 {
        let units = i as f32 * 0.25;
        assert_eq!(grid.pixels_to_grid(grid.grid_to_pixels(units), false), units);
    }
}

#[test]
fn test_screen_world_inverse_under_pan_and_zoom() {
    let viewport = Viewport {
        x: -37.5,
        y: 120.0,
        scale: 2.5,
        is_dragging: false,
    };
    let origin = Vec2::new(14.0, 88.0);
    for &(x, y) in &[(0.0, 0.0), (123.4, -56.7), (-900.0, 410.0)] {
        let world = Vec2::new(x, y);
        let back = screen_to_world(world_to_screen(world, &viewport, origin), &viewport, origin);
        assert!((back - world).length() < 1e-3);
    }
}

#[test]
fn test_all_port_pairs_route_axis_aligned() {
    let grid = Grid::default();
    let offsets = [
        Vec2::new(0.0, 8.0),
        Vec2::new(8.0, 0.0),
        Vec2::new(-6.0, -6.0),
        Vec2::new(5.0, -9.0),
        Vec2::new(0.5, 3.25),
        Vec2::new(-7.0, 0.0),
    ];
    for offset in offsets {
        let mut model = DiagramModel::new(Diagram::default());
        model
            .add_equipment(Equipment::new(
                "a",
                "A",
                EquipmentType::Transformador,
                Vec2::new(10.0, 10.0),
            ))
            .expect("a");
        model
            .add_equipment(Equipment::new(
                "b",
                "B",
                EquipmentType::Disjuntor,
                Vec2::new(10.0, 10.0) + offset,
            ))
            .expect("b");

        for from in Port::ALL {
            for to in Port::ALL {
                let conn = Connection::new("c", "a", from, "b", to);
                let path = route_connection(&model, &conn, &grid, 20.0).expect("routbar");
                assert!(
                    is_axis_aligned(&path),
                    "{:?}->{:?} bei {:?}: {:?}",
                    from,
                    to,
                    offset,
                    path
                );
                let a = model.equipment("a").map(|e| e.anchor(from, &grid));
                let b = model.equipment("b").map(|e| e.anchor(to, &grid));
                assert_eq!(path.first().copied(), a);
                assert_eq!(path.last().copied(), b);
            }
        }
    }
}

#[test]
fn test_facing_ports_route_with_at_most_two_bends() {
    let a = Endpoint::port(Vec2::new(100.0, 100.0), Port::Bottom);
    let b = Endpoint::port(Vec2::new(260.0, 300.0), Port::Top);
    let path = route(a, b, 20.0);
    assert!(is_axis_aligned(&path));
    assert!(bend_count(&path) <= 2);
}

#[test]
fn test_coincident_anchors_give_single_point() {
    let p = Vec2::new(40.0, 40.0);
    let path = route(Endpoint::port(p, Port::Right), Endpoint::point(p), 20.0);
    assert_eq!(path, vec![p]);
}

#[test]
fn test_busbar_needs_three_shared_anchors() {
    let shared = Vec2::new(200.0, 100.0);
    let branch = |id: &str, x: f32| {
        VisualConnection::new(
            id,
            vec![
                shared,
                Vec2::new(200.0, 140.0),
                Vec2::new(x, 140.0),
                Vec2::new(x, 220.0),
            ],
        )
    };
    let other = VisualConnection::new(
        "c3",
        vec![Vec2::new(500.0, 100.0), Vec2::new(500.0, 220.0)],
    );

    let mut two = vec![branch("c1", 120.0), branch("c2", 280.0), other.clone()];
    assert!(detect_barramentos(&mut two, 0.5).is_empty());
    assert!(two.iter().all(|v| !v.is_barramento));

    let mut three = vec![
        branch("c1", 120.0),
        branch("c2", 280.0),
        other,
        branch("c3b", 200.0),
    ];
    let bars = detect_barramentos(&mut three, 0.5);
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].members, vec!["c1", "c2", "c3b"]);
    assert_eq!(bars[0].min_x, 120.0);
    assert_eq!(bars[0].max_x, 280.0);
    assert!(!three[2].is_barramento);
    for v in three.iter().filter(|v| v.is_barramento) {
        assert_eq!(v.points[0].y, shared.y);
        assert!(is_axis_aligned(&v.points));
    }
}

#[test]
fn test_busbar_membership_follows_equipment_moves() {
    let params = LayoutParams::default();
    let mut model = DiagramModel::new(Diagram::default());
    model
        .add_equipment(Equipment::new(
            "src",
            "SRC",
            EquipmentType::Painel,
            Vec2::new(10.0, 0.0),
        ))
        .expect("src");
    for (i, x) in [0.0_f32, 10.0, 20.0].iter().enumerate() {
        let id = format!("l{i}");
        model
            .add_equipment(Equipment::new(
                id.clone(),
                id.clone(),
                EquipmentType::Carga,
                Vec2::new(*x, 10.0),
            ))
            .expect("Abgang");
        model
            .add_connection(Connection::new(
                format!("k{i}"),
                "src",
                Port::Bottom,
                id,
                Port::Top,
            ))
            .expect("Verbindung");
    }
    assert_eq!(DiagramLayout::compute(&model, &params).barramentos.len(), 1);

    // Ein Abgang wechselt auf einen anderen Port → nur noch zwei teilen den Anker
    model.remove_connection("k2");
    model
        .add_connection(Connection::new("k2", "src", Port::Right, "l2", Port::Top))
        .expect("Verbindung");
    let layout = DiagramLayout::compute(&model, &params);
    assert!(layout.barramentos.is_empty());
    assert!(layout.visual_connections.iter().all(|v| !v.is_barramento));
}
