//! Orthogonales Routing zwischen Equipment-Ports.
//!
//! Liefert achsparallele Polylinien mit höchstens zwei Knicken. Alle
//! Zwischenpunkte übernehmen Koordinaten exakt von ihren Nachbarn, dadurch
//! unterscheiden sich aufeinanderfolgende Punkte in genau einer Koordinate.

use super::{Connection, DiagramModel, Grid, Port, ValidationError};
use glam::Vec2;

/// Standard-Abstand, mit dem ein Z-Pfad aus dem Ursprungs-Port herausführt.
pub const DEFAULT_CLEARANCE: f32 = 20.0;

/// Start- oder Endpunkt einer Route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    /// Ankerpunkt in Pixeln
    pub anchor: Vec2,
    /// Austrittsrichtung (None bei Junction-Points und freien Punkten)
    pub facing: Option<Port>,
}

impl Endpoint {
    /// Endpunkt an einem Port mit Richtung.
    pub fn port(anchor: Vec2, port: Port) -> Self {
        Self {
            anchor,
            facing: Some(port),
        }
    }

    /// Freier Punkt ohne Richtung.
    pub fn point(anchor: Vec2) -> Self {
        Self {
            anchor,
            facing: None,
        }
    }
}

/// Berechnet eine achsparallele Route von `origin` nach `destination`.
pub fn route(origin: Endpoint, destination: Endpoint, clearance: f32) -> Vec<Vec2> {
    let a = origin.anchor;
    let b = destination.anchor;
    if a == b {
        return vec![a];
    }

    let path = match (origin.facing, destination.facing) {
        (Some(fo), Some(fd)) => route_between_ports(a, fo, b, fd, clearance),
        (Some(fo), None) => l_path(a, b, fo.is_horizontal()),
        (None, Some(fd)) => {
            // Vom Ziel aus routen, damit der Pfad sauber in den Port einläuft
            let mut reversed = l_path(b, a, fd.is_horizontal());
            reversed.reverse();
            reversed
        }
        (None, None) => {
            let d = b - a;
            l_path(a, b, d.x.abs() >= d.y.abs())
        }
    };

    simplify_path(path)
}

/// Routet eine persistierte Verbindung anhand der aktuellen Equipment-Positionen.
pub fn route_connection(
    model: &DiagramModel,
    connection: &Connection,
    grid: &Grid,
    clearance: f32,
) -> Result<Vec<Vec2>, ValidationError> {
    if connection.is_self_port() {
        return Err(ValidationError::SelfPortConnection {
            equipment_id: connection.origem_id.clone(),
            port: connection.origem_porta,
        });
    }
    let origin = model
        .equipment(&connection.origem_id)
        .ok_or_else(|| ValidationError::UnknownEquipment(connection.origem_id.clone()))?;
    let destination = model
        .equipment(&connection.destino_id)
        .ok_or_else(|| ValidationError::UnknownEquipment(connection.destino_id.clone()))?;

    let endpoint = |eq: &super::Equipment, port: Port| {
        let anchor = eq.anchor(port, grid);
        if eq.is_junction() {
            Endpoint::point(anchor)
        } else {
            Endpoint::port(anchor, port)
        }
    };

    Ok(route(
        endpoint(origin, connection.origem_porta),
        endpoint(destination, connection.destino_porta),
        clearance,
    ))
}

fn route_between_ports(a: Vec2, fo: Port, b: Vec2, fd: Port, clearance: f32) -> Vec<Vec2> {
    let d = b - a;

    if fd == fo.opposite() {
        // Ziel liegt in Austrittsrichtung vor dem Ursprung
        if d.dot(fo.facing()) > 0.0 {
            return if fo.is_horizontal() {
                let mid_x = a.x + d.x / 2.0;
                vec![a, Vec2::new(mid_x, a.y), Vec2::new(mid_x, b.y), b]
            } else {
                let mid_y = a.y + d.y / 2.0;
                vec![a, Vec2::new(a.x, mid_y), Vec2::new(b.x, mid_y), b]
            };
        }
    } else if fd != fo {
        let corner = if fo.is_horizontal() {
            Vec2::new(b.x, a.y)
        } else {
            Vec2::new(a.x, b.y)
        };
        let ahead_of_origin = (corner - a).dot(fo.facing()) > 0.0;
        let ahead_of_destination = (corner - b).dot(fd.facing()) > 0.0;
        if ahead_of_origin && ahead_of_destination {
            return vec![a, corner, b];
        }
    }

    clearance_path(a, fo, b, clearance)
}

/// Einfacher Pfad mit höchstens einem Knick, zuerst entlang der gewählten Achse.
fn l_path(a: Vec2, b: Vec2, horizontal_first: bool) -> Vec<Vec2> {
    let corner = if horizontal_first {
        Vec2::new(b.x, a.y)
    } else {
        Vec2::new(a.x, b.y)
    };
    vec![a, corner, b]
}

/// Z-Pfad: erst `clearance` Pixel aus dem Port heraus, dann quer, dann zum Ziel.
fn clearance_path(a: Vec2, fo: Port, b: Vec2, clearance: f32) -> Vec<Vec2> {
    let out = a + fo.facing() * clearance;
    let turn = if fo.is_horizontal() {
        Vec2::new(out.x, b.y)
    } else {
        Vec2::new(b.x, out.y)
    };
    vec![a, out, turn, b]
}

/// Entfernt doppelte und kollineare Zwischenpunkte (exakter Vergleich).
pub fn simplify_path(points: Vec<Vec2>) -> Vec<Vec2> {
    let mut simplified: Vec<Vec2> = Vec::with_capacity(points.len());
    for point in points {
        if simplified.last() == Some(&point) {
            continue;
        }
        while simplified.len() >= 2 {
            let len = simplified.len();
            let a = simplified[len - 2];
            let b = simplified[len - 1];
            let collinear =
                (a.x == b.x && b.x == point.x) || (a.y == b.y && b.y == point.y);
            if collinear {
                simplified.pop();
            } else {
                break;
            }
        }
        simplified.push(point);
    }
    simplified
}

/// Anzahl der Knicke einer Polylinie.
pub fn bend_count(points: &[Vec2]) -> usize {
    points.len().saturating_sub(2)
}

/// Prüft ob jedes Punktpaar in genau einer Koordinate abweicht.
pub fn is_axis_aligned(points: &[Vec2]) -> bool {
    points
        .windows(2)
        .all(|pair| (pair[0].x == pair[1].x) != (pair[0].y == pair[1].y))
}

/// Abstand eines Punktes zur nächsten Strecke der Polylinie.
pub fn distance_to_polyline(point: Vec2, points: &[Vec2]) -> f32 {
    match points {
        [] => f32::INFINITY,
        [single] => point.distance(*single),
        _ => points
            .windows(2)
            .map(|pair| distance_to_segment(point, pair[0], pair[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
