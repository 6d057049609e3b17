//! Das zentrale Diagramm-Modell mit Equipments und Verbindungen.

use super::{Connection, Equipment, ValidationError};
use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metadaten eines Diagramms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    /// Diagramm-ID
    pub id: String,
    /// Name
    #[serde(default)]
    pub nome: String,
    /// Beschreibung (optional)
    #[serde(default)]
    pub descricao: Option<String>,
    /// Zugehörige Unidade
    #[serde(default)]
    pub unidade_id: String,
}

/// Bericht über Bereinigungen beim Hydrieren aus dem Backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrationReport {
    /// Soft-gelöschte Equipments, die übersprungen wurden
    pub skipped_deleted: usize,
    /// Doppelte IDs (Equipment oder Verbindung), die übersprungen wurden
    pub skipped_duplicates: usize,
    /// Verbindungen ohne gültige Endpunkte
    pub pruned_connections: usize,
    /// Verbindungen von einem Port auf denselben Port
    pub pruned_self_port: usize,
}

/// Equipment- und Verbindungsmenge eines Diagramms.
///
/// Einzige Stelle, an der Topologie mutiert wird. Das Entfernen eines
/// Equipments entfernt kaskadierend alle referenzierenden Verbindungen.
#[derive(Debug, Clone, Default)]
pub struct DiagramModel {
    /// Diagramm-Metadaten
    pub meta: Diagram,
    /// Equipments in Einfüge-Reihenfolge, indexiert nach ID
    equipamentos: IndexMap<String, Equipment>,
    /// Verbindungen in Einfüge-Reihenfolge, indexiert nach ID
    conexoes: IndexMap<String, Connection>,
    /// Zähler für generierte IDs
    id_counter: u64,
}

impl DiagramModel {
    /// Erstellt ein leeres Diagramm
    pub fn new(meta: Diagram) -> Self {
        Self {
            meta,
            equipamentos: IndexMap::new(),
            conexoes: IndexMap::new(),
            id_counter: 0,
        }
    }

    /// Baut ein Modell aus Backend-Daten auf.
    ///
    /// Soft-gelöschte Equipments und doppelte IDs werden übersprungen,
    /// Verbindungen ohne lebende Endpunkte entfernt.
    pub fn from_parts(
        meta: Diagram,
        equipamentos: Vec<Equipment>,
        conexoes: Vec<Connection>,
    ) -> (Self, HydrationReport) {
        let mut model = Self::new(meta);
        let mut report = HydrationReport::default();

        for eq in equipamentos {
            if eq.is_deleted() {
                report.skipped_deleted += 1;
                continue;
            }
            if model.equipamentos.contains_key(&eq.id) {
                log::warn!("Doppelte Equipment-ID {} beim Laden übersprungen", eq.id);
                report.skipped_duplicates += 1;
                continue;
            }
            model.equipamentos.insert(eq.id.clone(), eq);
        }

        for conn in conexoes {
            if conn.is_self_port() {
                log::warn!(
                    "Verbindung {} verbindet {}:{:?} mit sich selbst, verworfen",
                    conn.id,
                    conn.origem_id,
                    conn.origem_porta
                );
                report.pruned_self_port += 1;
                continue;
            }
            if model.conexoes.contains_key(&conn.id) {
                log::warn!("Doppelte Verbindungs-ID {} beim Laden übersprungen", conn.id);
                report.skipped_duplicates += 1;
                continue;
            }
            model.conexoes.insert(conn.id.clone(), conn);
        }

        report.pruned_connections = model.prune_dangling().len();
        (model, report)
    }

    /// Anzahl der Equipments
    pub fn equipment_count(&self) -> usize {
        self.equipamentos.len()
    }

    /// Anzahl der Verbindungen
    pub fn connection_count(&self) -> usize {
        self.conexoes.len()
    }

    /// Findet ein Equipment (O(1))
    pub fn equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipamentos.get(id)
    }

    /// Prüft ob ein lebendes Equipment existiert
    pub fn contains_equipment(&self, id: &str) -> bool {
        self.equipamentos.get(id).is_some_and(|eq| !eq.is_deleted())
    }

    /// Iterator über alle Equipments (Einfüge-Reihenfolge)
    pub fn equipamentos_iter(&self) -> impl Iterator<Item = &Equipment> {
        self.equipamentos.values()
    }

    /// Findet eine Verbindung (O(1))
    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.conexoes.get(id)
    }

    /// Iterator über alle Verbindungen (Einfüge-Reihenfolge)
    pub fn connections_iter(&self) -> impl Iterator<Item = &Connection> {
        self.conexoes.values()
    }

    /// Alle Verbindungen, die das Equipment an einem Ende referenzieren
    pub fn connections_touching<'a>(
        &'a self,
        equipment_id: &'a str,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.conexoes
            .values()
            .filter(move |c| c.references(equipment_id))
    }

    /// Fügt ein Equipment hinzu
    pub fn add_equipment(&mut self, equipment: Equipment) -> Result<(), ValidationError> {
        if self.equipamentos.contains_key(&equipment.id) {
            return Err(ValidationError::DuplicateEquipment(equipment.id));
        }
        self.equipamentos.insert(equipment.id.clone(), equipment);
        Ok(())
    }

    /// Entfernt ein Equipment inklusive aller referenzierenden Verbindungen.
    ///
    /// Gibt das Equipment und die mitentfernten Verbindungen zurück.
    pub fn remove_equipment(&mut self, equipment_id: &str) -> Option<(Equipment, Vec<Connection>)> {
        let removed = self.equipamentos.shift_remove(equipment_id)?;
        let mut cascaded = Vec::new();
        self.conexoes.retain(|_, c| {
            if c.references(equipment_id) {
                cascaded.push(c.clone());
                false
            } else {
                true
            }
        });
        Some((removed, cascaded))
    }

    /// Aktualisiert die Grid-Position. Gibt `true` zurück, wenn sich etwas geändert hat.
    pub fn set_equipment_position(&mut self, equipment_id: &str, grid_pos: Vec2) -> bool {
        let Some(eq) = self.equipamentos.get_mut(equipment_id) else {
            return false;
        };
        if eq.grid_position() == grid_pos {
            return false;
        }
        eq.set_grid_position(grid_pos);
        true
    }

    /// Aktualisiert den Label-Versatz (Pixel). Gibt `true` bei Änderung zurück.
    pub fn set_label_offset(&mut self, equipment_id: &str, offset: Vec2) -> bool {
        let Some(eq) = self.equipamentos.get_mut(equipment_id) else {
            return false;
        };
        if eq.label_offset() == offset {
            return false;
        }
        eq.label_offset_x = offset.x;
        eq.label_offset_y = offset.y;
        true
    }

    /// Setzt die Label-Position. Gibt `true` bei Änderung zurück.
    pub fn set_label_position(
        &mut self,
        equipment_id: &str,
        position: super::LabelPosition,
    ) -> bool {
        let Some(eq) = self.equipamentos.get_mut(equipment_id) else {
            return false;
        };
        if eq.label_position == position {
            return false;
        }
        eq.label_position = position;
        true
    }

    /// Fügt eine Verbindung hinzu.
    ///
    /// Validiert Self-Port, Existenz beider Endpunkte und ID-Eindeutigkeit
    /// bevor irgendetwas mutiert wird.
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), ValidationError> {
        if connection.is_self_port() {
            return Err(ValidationError::SelfPortConnection {
                equipment_id: connection.origem_id,
                port: connection.origem_porta,
            });
        }
        for endpoint in [&connection.origem_id, &connection.destino_id] {
            if !self.contains_equipment(endpoint) {
                return Err(ValidationError::UnknownEquipment(endpoint.clone()));
            }
        }
        if self.conexoes.contains_key(&connection.id) {
            return Err(ValidationError::DuplicateConnection(connection.id));
        }
        self.conexoes.insert(connection.id.clone(), connection);
        Ok(())
    }

    /// Entfernt eine Verbindung (O(n), Reihenfolge bleibt stabil)
    pub fn remove_connection(&mut self, connection_id: &str) -> Option<Connection> {
        self.conexoes.shift_remove(connection_id)
    }

    /// Entfernt Verbindungen, deren Endpunkte nicht (mehr) existieren.
    ///
    /// Durch das kaskadierende Löschen sollte das nie greifen; falls doch,
    /// wird die Verbindung verworfen statt gerendert.
    pub fn prune_dangling(&mut self) -> Vec<Connection> {
        let live: std::collections::HashSet<&str> = self
            .equipamentos
            .values()
            .filter(|eq| !eq.is_deleted())
            .map(|eq| eq.id.as_str())
            .collect();
        let dangling: Vec<String> = self
            .conexoes
            .values()
            .filter(|c| {
                !live.contains(c.origem_id.as_str()) || !live.contains(c.destino_id.as_str())
            })
            .map(|c| c.id.clone())
            .collect();

        let mut pruned = Vec::with_capacity(dangling.len());
        for id in dangling {
            if let Some(conn) = self.conexoes.shift_remove(&id) {
                log::warn!(
                    "Invariante verletzt: Verbindung {} ({} → {}) ohne Endpunkt entfernt",
                    conn.id,
                    conn.origem_id,
                    conn.destino_id
                );
                pruned.push(conn);
            }
        }
        pruned
    }

    /// Generiert eine freie Verbindungs-ID
    pub fn next_connection_id(&mut self) -> String {
        loop {
            self.id_counter += 1;
            let id = format!("conexao-{}", self.id_counter);
            if !self.conexoes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Generiert eine freie Junction-ID
    pub fn next_junction_id(&mut self) -> String {
        loop {
            self.id_counter += 1;
            let id = format!("junction-{}", self.id_counter);
            if !self.equipamentos.contains_key(&id) {
                return id;
            }
        }
    }
}
