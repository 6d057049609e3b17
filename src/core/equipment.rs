//! Equipment-Knoten des Schaltbilds inklusive Ports und Kategorien.

use super::Grid;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Anschlussrichtung an der Bounding-Box eines Equipments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    /// Oberkante
    Top,
    /// Unterkante
    Bottom,
    /// Linke Kante
    Left,
    /// Rechte Kante
    Right,
}

impl Port {
    /// Alle Ports in fester Reihenfolge.
    pub const ALL: [Port; 4] = [Port::Top, Port::Bottom, Port::Left, Port::Right];

    /// Relativer Ankerpunkt innerhalb der Bounding-Box (0..1 je Achse).
    pub fn anchor_ratio(self) -> Vec2 {
        match self {
            Port::Top => Vec2::new(0.5, 0.0),
            Port::Bottom => Vec2::new(0.5, 1.0),
            Port::Left => Vec2::new(0.0, 0.5),
            Port::Right => Vec2::new(1.0, 0.5),
        }
    }

    /// Richtung, in die der Port zeigt (Y wächst nach unten).
    pub fn facing(self) -> Vec2 {
        match self {
            Port::Top => Vec2::new(0.0, -1.0),
            Port::Bottom => Vec2::new(0.0, 1.0),
            Port::Left => Vec2::new(-1.0, 0.0),
            Port::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Liegt die Port-Richtung auf der X-Achse?
    pub fn is_horizontal(self) -> bool {
        matches!(self, Port::Left | Port::Right)
    }

    /// Gegenüberliegender Port.
    pub fn opposite(self) -> Port {
        match self {
            Port::Top => Port::Bottom,
            Port::Bottom => Port::Top,
            Port::Left => Port::Right,
            Port::Right => Port::Left,
        }
    }

    /// Name wie im Backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Port::Top => "top",
            Port::Bottom => "bottom",
            Port::Left => "left",
            Port::Right => "right",
        }
    }
}

/// Port, über den Junction-Points angeschlossen werden (alle Anker fallen zusammen).
pub const JUNCTION_PORT: Port = Port::Top;

/// Position des Beschriftungs-Labels relativ zum Equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    /// Über dem Symbol
    Top,
    /// Unter dem Symbol
    #[default]
    Bottom,
    /// Links vom Symbol
    Left,
    /// Rechts vom Symbol
    Right,
}

/// Geschlossene Menge der Equipment-Kategorien.
///
/// Tags aus dem Backend werden über eine explizite Tabelle zugeordnet,
/// unbekannte Tags fallen mit Warnung auf [`EquipmentType::Generico`] zurück.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EquipmentType {
    /// Transformator
    Transformador,
    /// Leistungsschalter
    Disjuntor,
    /// Trennschalter
    Chave,
    /// Zähler / Messgerät
    Medidor,
    /// Schutzrelais
    Rele,
    /// Wechselrichter
    Inversor,
    /// Generator
    Gerador,
    /// Motor
    Motor,
    /// Kondensatorbank
    Capacitor,
    /// Schaltschrank / Verteiler
    Painel,
    /// Verbraucher
    Carga,
    /// Unbekannte oder nicht zugeordnete Kategorie
    #[default]
    Generico,
    /// Synthetischer Routing-Knoten ohne Ausdehnung
    JunctionPoint,
}

/// Zuordnungstabelle Tag → Kategorie (inkl. Aliasse).
const TAG_TABLE: &[(&str, EquipmentType)] = &[
    ("TRANSFORMADOR", EquipmentType::Transformador),
    ("TRAFO", EquipmentType::Transformador),
    ("DISJUNTOR", EquipmentType::Disjuntor),
    ("CHAVE", EquipmentType::Chave),
    ("SECCIONADORA", EquipmentType::Chave),
    ("MEDIDOR", EquipmentType::Medidor),
    ("RELE", EquipmentType::Rele),
    ("INVERSOR", EquipmentType::Inversor),
    ("GERADOR", EquipmentType::Gerador),
    ("MOTOR", EquipmentType::Motor),
    ("CAPACITOR", EquipmentType::Capacitor),
    ("PAINEL", EquipmentType::Painel),
    ("QUADRO", EquipmentType::Painel),
    ("CARGA", EquipmentType::Carga),
    ("GENERICO", EquipmentType::Generico),
    ("JUNCTION_POINT", EquipmentType::JunctionPoint),
];

impl EquipmentType {
    /// Ordnet einen Tag (case-insensitiv) einer Kategorie zu.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = tag.trim().to_ascii_uppercase();
        TAG_TABLE
            .iter()
            .find(|(t, _)| *t == normalized)
            .map(|(_, kind)| *kind)
    }

    /// Wie [`from_tag`](Self::from_tag), unbekannte Tags werden zu `Generico`.
    pub fn from_tag_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_else(|| {
            log::warn!("Unbekannter Equipment-Tag '{}', verwende GENERICO", tag);
            Self::Generico
        })
    }

    /// Kanonischer Tag für das Backend.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Transformador => "TRANSFORMADOR",
            Self::Disjuntor => "DISJUNTOR",
            Self::Chave => "CHAVE",
            Self::Medidor => "MEDIDOR",
            Self::Rele => "RELE",
            Self::Inversor => "INVERSOR",
            Self::Gerador => "GERADOR",
            Self::Motor => "MOTOR",
            Self::Capacitor => "CAPACITOR",
            Self::Painel => "PAINEL",
            Self::Carga => "CARGA",
            Self::Generico => "GENERICO",
            Self::JunctionPoint => "JUNCTION_POINT",
        }
    }

    /// Bounding-Box-Größe in Pixeln.
    pub fn size(self) -> Vec2 {
        match self {
            Self::JunctionPoint => Vec2::ZERO,
            Self::Transformador => Vec2::new(60.0, 80.0),
            Self::Inversor | Self::Gerador | Self::Motor => Vec2::new(60.0, 60.0),
            Self::Painel => Vec2::new(80.0, 60.0),
            Self::Disjuntor
            | Self::Chave
            | Self::Medidor
            | Self::Rele
            | Self::Capacitor
            | Self::Carga
            | Self::Generico => Vec2::new(40.0, 40.0),
        }
    }
}

impl From<String> for EquipmentType {
    fn from(tag: String) -> Self {
        Self::from_tag_or_default(&tag)
    }
}

impl From<EquipmentType> for String {
    fn from(kind: EquipmentType) -> Self {
        kind.as_tag().to_string()
    }
}

/// Ein Knoten im Schaltbild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Eindeutige ID
    pub id: String,
    /// Anzeigename
    #[serde(default)]
    pub nome: String,
    /// Betriebsmittelkennzeichen
    #[serde(default)]
    pub tag: String,
    /// Kategorie
    #[serde(default)]
    pub tipo: EquipmentType,
    /// Zugehörige Unidade
    #[serde(default)]
    pub unidade_id: String,
    /// Zugehöriges Diagramm (None = noch nicht platziert)
    #[serde(default)]
    pub diagrama_id: Option<String>,
    /// X-Position in Grid-Einheiten
    #[serde(default)]
    pub posicao_x: f32,
    /// Y-Position in Grid-Einheiten
    #[serde(default)]
    pub posicao_y: f32,
    /// Rotation in Grad
    #[serde(default)]
    pub rotacao: f32,
    /// Label-Anker
    #[serde(default)]
    pub label_position: LabelPosition,
    /// Label-Versatz X in Pixeln
    #[serde(default)]
    pub label_offset_x: f32,
    /// Label-Versatz Y in Pixeln
    #[serde(default)]
    pub label_offset_y: f32,
    /// Betriebsstatus (Backend-Wert, wird nicht interpretiert)
    #[serde(default)]
    pub status: Option<String>,
    /// Erstellzeitpunkt (ISO-8601)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Änderungszeitpunkt (ISO-8601)
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Soft-Delete-Markierung
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Equipment {
    /// Erstellt ein Equipment an einer Grid-Position.
    pub fn new(
        id: impl Into<String>,
        nome: impl Into<String>,
        tipo: EquipmentType,
        grid_pos: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            nome: nome.into(),
            tag: String::new(),
            tipo,
            unidade_id: String::new(),
            diagrama_id: None,
            posicao_x: grid_pos.x,
            posicao_y: grid_pos.y,
            rotacao: 0.0,
            label_position: LabelPosition::default(),
            label_offset_x: 0.0,
            label_offset_y: 0.0,
            status: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Erstellt einen synthetischen Junction-Point.
    pub fn junction(id: impl Into<String>, grid_pos: Vec2) -> Self {
        Self::new(id, "", EquipmentType::JunctionPoint, grid_pos)
    }

    /// Position in Grid-Einheiten.
    pub fn grid_position(&self) -> Vec2 {
        Vec2::new(self.posicao_x, self.posicao_y)
    }

    /// Setzt die Position in Grid-Einheiten.
    pub fn set_grid_position(&mut self, grid_pos: Vec2) {
        self.posicao_x = grid_pos.x;
        self.posicao_y = grid_pos.y;
    }

    /// Linke obere Ecke in Pixeln.
    pub fn pixel_position(&self, grid: &Grid) -> Vec2 {
        grid.point_to_pixels(self.grid_position())
    }

    /// Label-Versatz als Vektor.
    pub fn label_offset(&self) -> Vec2 {
        Vec2::new(self.label_offset_x, self.label_offset_y)
    }

    /// Bounding-Box-Größe in Pixeln.
    pub fn size(&self) -> Vec2 {
        self.tipo.size()
    }

    /// Ankerpunkt eines Ports in Pixeln.
    pub fn anchor(&self, port: Port, grid: &Grid) -> Vec2 {
        self.pixel_position(grid) + port.anchor_ratio() * self.size()
    }

    /// Prüft ob ein Weltpunkt innerhalb der (um `padding` erweiterten) Bounding-Box liegt.
    pub fn contains(&self, world: Vec2, grid: &Grid, padding: f32) -> bool {
        let min = self.pixel_position(grid) - Vec2::splat(padding);
        let max = self.pixel_position(grid) + self.size() + Vec2::splat(padding);
        world.x >= min.x && world.x <= max.x && world.y >= min.y && world.y <= max.y
    }

    /// Synthetischer Routing-Knoten?
    pub fn is_junction(&self) -> bool {
        self.tipo == EquipmentType::JunctionPoint
    }

    /// Soft-gelöscht?
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Platzierbares Equipment aus der Host-Liste (noch nicht im Diagramm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableEquipment {
    /// Equipment-ID
    pub id: String,
    /// Anzeigename
    pub nome: String,
    /// Kennzeichen
    #[serde(default)]
    pub tag: String,
    /// Kategorie-Tag
    pub tipo: String,
    /// Hersteller (nur Anzeige)
    #[serde(default)]
    pub fabricante: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tag_tabelle_und_aliasse() {
        assert_eq!(EquipmentType::from_tag("disjuntor"), Some(EquipmentType::Disjuntor));
        assert_eq!(EquipmentType::from_tag(" TRAFO "), Some(EquipmentType::Transformador));
        assert_eq!(EquipmentType::from_tag("QUADRO"), Some(EquipmentType::Painel));
        assert_eq!(EquipmentType::from_tag("FOO"), None);
        assert_eq!(EquipmentType::from_tag_or_default("FOO"), EquipmentType::Generico);
    }

    #[test]
    fn test_tipo_serde_mit_fallback() {
        let kind: EquipmentType = serde_json::from_str("\"JUNCTION_POINT\"").expect("gültiger Tag");
        assert_eq!(kind, EquipmentType::JunctionPoint);
        let unknown: EquipmentType = serde_json::from_str("\"SUBESTACAO\"").expect("Fallback");
        assert_eq!(unknown, EquipmentType::Generico);
        let json = serde_json::to_string(&EquipmentType::Medidor).expect("serialisierbar");
        assert_eq!(json, "\"MEDIDOR\"");
    }

    #[test]
    fn test_port_anker() {
        let grid = Grid::default();
        let eq = Equipment::new("d1", "Disjuntor 1", EquipmentType::Disjuntor, Vec2::new(2.0, 3.0));
        // Pixel (40, 60), Größe 40x40
        assert_eq!(eq.anchor(Port::Top, &grid), Vec2::new(60.0, 60.0));
        assert_eq!(eq.anchor(Port::Bottom, &grid), Vec2::new(60.0, 100.0));
        assert_eq!(eq.anchor(Port::Left, &grid), Vec2::new(40.0, 80.0));
        assert_eq!(eq.anchor(Port::Right, &grid), Vec2::new(80.0, 80.0));
    }

    #[test]
    fn test_junction_hat_keine_ausdehnung() {
        let grid = Grid::default();
        let j = Equipment::junction("j1", Vec2::new(4.0, 4.0));
        assert!(j.is_junction());
        for port in Port::ALL {
            assert_eq!(j.anchor(port, &grid), Vec2::new(80.0, 80.0));
        }
    }

    #[test]
    fn test_equipment_json_camel_case() {
        let json = r#"{
            "id": "eq-1", "nome": "Trafo", "tag": "TR-01", "tipo": "TRANSFORMADOR",
            "unidadeId": "u1", "diagramaId": "d1", "posicaoX": 3, "posicaoY": 4.5,
            "rotacao": 90, "labelPosition": "left", "labelOffsetX": 5, "labelOffsetY": -2
        }"#;
        let eq: Equipment = serde_json::from_str(json).expect("Equipment parsebar");
        assert_eq!(eq.tipo, EquipmentType::Transformador);
        assert_eq!(eq.label_position, LabelPosition::Left);
        assert_relative_eq!(eq.posicao_y, 4.5);
        assert!(!eq.is_deleted());
    }

    #[test]
    fn test_contains_mit_padding() {
        let grid = Grid::default();
        let eq = Equipment::new("m", "Motor", EquipmentType::Motor, Vec2::new(1.0, 1.0));
        assert!(eq.contains(Vec2::new(50.0, 50.0), &grid, 0.0));
        assert!(!eq.contains(Vec2::new(85.0, 50.0), &grid, 0.0));
        assert!(eq.contains(Vec2::new(85.0, 50.0), &grid, 6.0));
    }
}
