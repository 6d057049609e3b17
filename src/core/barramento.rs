//! Erkennung virtueller Sammelschienen (Barramentos).
//!
//! Teilen sich drei oder mehr Verbindungen denselben Ursprungs-Anker, wird
//! daraus eine horizontale Schiene abgeleitet. Die Schiene wird nie
//! persistiert und bei jeder Änderung komplett neu berechnet.

use glam::Vec2;
use serde::Serialize;
use std::collections::HashMap;

use super::routing::simplify_path;

/// Mindestanzahl von Verbindungen mit gemeinsamem Anker für eine Schiene.
pub const MIN_BARRAMENTO_MEMBERS: usize = 3;

/// Standard-Toleranz für Anker-Gleichheit in Pixeln.
pub const DEFAULT_EPSILON: f32 = 0.5;

/// Geroutete Darstellung einer Verbindung.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualConnection {
    /// ID der zugrunde liegenden Verbindung
    pub id: String,
    /// Achsparallele Polylinie in Pixeln
    pub points: Vec<Vec2>,
    /// Startet die Linie an einer Sammelschiene?
    pub is_barramento: bool,
}

impl VisualConnection {
    /// Erstellt eine reguläre (nicht gebündelte) Darstellung.
    pub fn new(id: impl Into<String>, points: Vec<Vec2>) -> Self {
        Self {
            id: id.into(),
            points,
            is_barramento: false,
        }
    }
}

/// Achse einer Sammelschiene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusbarAxis {
    /// Horizontale Schiene auf Höhe des Ankers
    Horizontal,
}

/// Abgeleitete Sammelschiene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Barramento {
    /// `barramento:<erste Mitglieds-ID>`
    pub id: String,
    /// Gemeinsamer Ursprungs-Anker
    pub anchor: Vec2,
    /// Ausrichtung
    pub axis: BusbarAxis,
    /// Linkes Ende der Schiene
    pub min_x: f32,
    /// Rechtes Ende der Schiene
    pub max_x: f32,
    /// IDs der Mitglieder in Eingabe-Reihenfolge
    pub members: Vec<String>,
}

/// Zelle der Größe `epsilon`, in die ein Anker fällt.
fn anchor_cell(p: Vec2, epsilon: f32) -> (i64, i64) {
    if epsilon > 0.0 {
        ((p.x / epsilon).floor() as i64, (p.y / epsilon).floor() as i64)
    } else {
        (i64::from(p.x.to_bits()), i64::from(p.y.to_bits()))
    }
}

/// Gleichheit zweier Anker innerhalb `epsilon` je Achse.
fn anchors_match(a: Vec2, b: Vec2, epsilon: f32) -> bool {
    if epsilon > 0.0 {
        (a - b).abs().max_element() <= epsilon
    } else {
        a == b
    }
}

/// Gruppiert die Verbindungen nach Ursprungs-Anker.
///
/// Jede Gruppe wird durch ihren ersten Anker repräsentiert. Ein neuer Anker
/// tritt der ersten Gruppe bei, deren Repräsentant in einer der 3×3
/// Nachbarzellen liegt und höchstens `epsilon` entfernt ist.
fn group_by_anchor(visuals: &[VisualConnection], epsilon: f32) -> Vec<Vec<usize>> {
    let mut groups: Vec<(Vec2, Vec<usize>)> = Vec::new();
    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    let radius: i64 = if epsilon > 0.0 { 1 } else { 0 };

    for (idx, visual) in visuals.iter().enumerate() {
        if visual.points.len() < 2 {
            continue;
        }
        let anchor = visual.points[0];
        let (cx, cy) = anchor_cell(anchor, epsilon);

        let mut found: Option<usize> = None;
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let Some(candidates) = cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &g in candidates {
                    let earlier = found.map_or(true, |f| g < f);
                    if earlier && anchors_match(groups[g].0, anchor, epsilon) {
                        found = Some(g);
                    }
                }
            }
        }

        match found {
            Some(g) => groups[g].1.push(idx),
            None => {
                cells.entry((cx, cy)).or_default().push(groups.len());
                groups.push((anchor, vec![idx]));
            }
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}

/// Erkennt Sammelschienen und schreibt die betroffenen Verbindungen um.
///
/// Vorher gesetzte `is_barramento`-Flags werden zurückgesetzt, die Funktion
/// darf also auf einer bereits verarbeiteten Menge erneut laufen, sofern
/// die Punkte frisch geroutet sind.
pub fn detect_barramentos(visuals: &mut [VisualConnection], epsilon: f32) -> Vec<Barramento> {
    for visual in visuals.iter_mut() {
        visual.is_barramento = false;
    }
    let groups = group_by_anchor(visuals, epsilon);

    let mut barramentos = Vec::new();
    for members in groups {
        if members.len() < MIN_BARRAMENTO_MEMBERS {
            continue;
        }
        let anchor = visuals[members[0]].points[0];
        let mut min_x = anchor.x;
        let mut max_x = anchor.x;
        let mut ids = Vec::with_capacity(members.len());

        for &idx in &members {
            let visual = &mut visuals[idx];
            let (tap_x, rewritten) = tap_from_rail(&visual.points, anchor.y);
            min_x = min_x.min(tap_x);
            max_x = max_x.max(tap_x);
            visual.points = rewritten;
            visual.is_barramento = true;
            ids.push(visual.id.clone());
        }

        log::debug!(
            "Barramento an ({}, {}) mit {} Abgängen",
            anchor.x,
            anchor.y,
            ids.len()
        );
        barramentos.push(Barramento {
            id: format!("barramento:{}", ids[0]),
            anchor,
            axis: BusbarAxis::Horizontal,
            min_x,
            max_x,
            members: ids,
        });
    }
    barramentos
}

/// Bestimmt die Abgriffs-X-Position und den Pfad ab der Schiene.
///
/// Abgriff ist der erste Punkt, dessen X vom Startpunkt abweicht; bleibt der
/// Pfad vertikal, wird direkt unter dem Anker abgegriffen.
fn tap_from_rail(points: &[Vec2], rail_y: f32) -> (f32, Vec<Vec2>) {
    let start_x = points[0].x;
    let (tap_x, rest) = match points.iter().position(|p| p.x != start_x) {
        Some(k) => (points[k].x, &points[k..]),
        None => (start_x, &points[1..]),
    };
    let mut rewritten = Vec::with_capacity(rest.len() + 1);
    rewritten.push(Vec2::new(tap_x, rail_y));
    rewritten.extend_from_slice(rest);
    (tap_x, simplify_path(rewritten))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routing::is_axis_aligned;
    use approx::assert_relative_eq;

    fn fan(n: usize) -> Vec<VisualConnection> {
        let anchor = Vec2::new(100.0, 100.0);
        (0..n)
            .map(|i| {
                let x = 40.0 + 60.0 * i as f32;
                VisualConnection::new(
                    format!("c{}", i),
                    simplify_path(vec![
                        anchor,
                        Vec2::new(100.0, 140.0),
                        Vec2::new(x, 140.0),
                        Vec2::new(x, 200.0),
                    ]),
                )
            })
            .collect()
    }

    #[test]
    fn test_zwei_verbindungen_ergeben_keine_schiene() {
        let mut visuals = fan(2);
        let before = visuals.clone();
        assert!(detect_barramentos(&mut visuals, DEFAULT_EPSILON).is_empty());
        assert_eq!(visuals, before);
    }

    #[test]
    fn test_drei_verbindungen_ergeben_genau_eine_schiene() {
        let mut visuals = fan(3);
        let bars = detect_barramentos(&mut visuals, DEFAULT_EPSILON);
        assert_eq!(bars.len(), 1);
        let bar = &bars[0];
        assert_eq!(bar.members, vec!["c0", "c1", "c2"]);
        assert_eq!(bar.id, "barramento:c0");
        assert_relative_eq!(bar.min_x, 40.0);
        assert_relative_eq!(bar.max_x, 160.0);
        assert_relative_eq!(bar.anchor.y, 100.0);

        for visual in &visuals {
            assert!(visual.is_barramento);
            assert_relative_eq!(visual.points[0].y, 100.0);
            assert!(is_axis_aligned(&visual.points));
        }
        // Mitglied c1 liegt direkt unter dem Anker
        assert_eq!(
            visuals[1].points,
            vec![Vec2::new(100.0, 100.0), Vec2::new(100.0, 200.0)]
        );
    }

    #[test]
    fn test_epsilon_gruppiert_fast_gleiche_anker() {
        let mut visuals = fan(3);
        visuals[2].points[0].x += 0.1;
        visuals[2].points[1].x += 0.1;
        assert_eq!(detect_barramentos(&mut visuals, DEFAULT_EPSILON).len(), 1);
    }

    #[test]
    fn test_epsilon_gruppiert_anker_ueber_zellgrenze() {
        let mut visuals = fan(3);
        for (visual, x) in visuals.iter_mut().zip([100.24, 100.26, 100.25]) {
            visual.points[0].x = x;
            visual.points[1].x = x;
        }
        let bars = detect_barramentos(&mut visuals, DEFAULT_EPSILON);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].members.len(), 3);
        assert_relative_eq!(bars[0].anchor.x, 100.24);
    }

    #[test]
    fn test_weit_entfernte_anker_bleiben_getrennt() {
        let mut visuals = fan(3);
        visuals[2].points[0].x += 0.6;
        visuals[2].points[1].x += 0.6;
        assert!(detect_barramentos(&mut visuals, DEFAULT_EPSILON).is_empty());
    }

    #[test]
    fn test_einzelpunkte_werden_ignoriert() {
        let p = Vec2::new(10.0, 10.0);
        let mut visuals: Vec<_> = (0..3)
            .map(|i| VisualConnection::new(format!("d{}", i), vec![p]))
            .collect();
        assert!(detect_barramentos(&mut visuals, DEFAULT_EPSILON).is_empty());
    }
}
