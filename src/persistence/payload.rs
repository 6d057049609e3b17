//! Wire-Formate für Laden, Anlegen und Layout-Speichern.
//!
//! Feldnamen folgen dem Backend (camelCase, portugiesische Bezeichner).

use crate::core::{Connection, Diagram, DiagramModel, Equipment, EquipmentType, LabelPosition};
use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Vollständiger Diagramm-Stand, wie ihn der Diagramm-Service liefert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSnapshot {
    /// Metadaten
    pub diagrama: Diagram,
    /// Equipments (inkl. evtl. soft-gelöschter)
    #[serde(default)]
    pub equipamentos: Vec<Equipment>,
    /// Verbindungen
    #[serde(default)]
    pub conexoes: Vec<Connection>,
}

impl DiagramSnapshot {
    /// Leere Diagramm-Hülle.
    pub fn empty(diagrama: Diagram) -> Self {
        Self {
            diagrama,
            equipamentos: Vec::new(),
            conexoes: Vec::new(),
        }
    }
}

/// Anfrage zum Anlegen eines leeren Diagramms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiagramRequest {
    /// Gewünschte Diagramm-ID
    pub id: String,
    /// Name
    pub nome: String,
    /// Beschreibung
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    /// Zugehörige Unidade
    pub unidade_id: String,
}

impl CreateDiagramRequest {
    /// Metadaten des neuen Diagramms.
    pub fn to_diagram(&self) -> Diagram {
        Diagram {
            id: self.id.clone(),
            nome: self.nome.clone(),
            descricao: self.descricao.clone(),
            unidade_id: self.unidade_id.clone(),
        }
    }
}

/// Layout-relevante Felder eines Equipments.
///
/// `nome` und `tipo` werden mitgeschickt, damit das Backend im Editor
/// angelegte Junction-Points anlegen kann.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentLayout {
    pub id: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub tipo: EquipmentType,
    pub posicao_x: f32,
    pub posicao_y: f32,
    #[serde(default)]
    pub rotacao: f32,
    #[serde(default)]
    pub label_position: LabelPosition,
    #[serde(default)]
    pub label_offset_x: f32,
    #[serde(default)]
    pub label_offset_y: f32,
}

impl EquipmentLayout {
    /// Extrahiert die Layout-Felder.
    pub fn from_equipment(eq: &Equipment) -> Self {
        Self {
            id: eq.id.clone(),
            nome: eq.nome.clone(),
            tipo: eq.tipo,
            posicao_x: eq.posicao_x,
            posicao_y: eq.posicao_y,
            rotacao: eq.rotacao,
            label_position: eq.label_position,
            label_offset_x: eq.label_offset_x,
            label_offset_y: eq.label_offset_y,
        }
    }

    /// Überträgt die Layout-Felder auf ein Equipment.
    pub fn apply_to(&self, eq: &mut Equipment) {
        eq.posicao_x = self.posicao_x;
        eq.posicao_y = self.posicao_y;
        eq.rotacao = self.rotacao;
        eq.label_position = self.label_position;
        eq.label_offset_x = self.label_offset_x;
        eq.label_offset_y = self.label_offset_y;
    }
}

/// Vollständiges Layout für `PUT layout` (atomarer Ersatz).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPayload {
    /// Ziel-Diagramm
    pub diagrama_id: String,
    /// Alle Equipments des Diagramms
    pub equipamentos: Vec<EquipmentLayout>,
    /// Alle Verbindungen des Diagramms
    pub conexoes: Vec<Connection>,
}

/// Vorbereiteter Speichervorgang.
///
/// `revision` ist der Änderungszähler zum Zeitpunkt der Vorbereitung; nur
/// wenn er beim Abschluss noch gilt, wird das Dirty-Flag gelöscht.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    /// Zu sendendes Layout
    pub payload: LayoutPayload,
    /// Revision zum Zeitpunkt der Vorbereitung
    pub revision: u64,
}

/// Baut das Layout-Payload aus dem aktuellen Modell (reine Funktion).
pub fn build_layout_payload(model: &DiagramModel) -> LayoutPayload {
    LayoutPayload {
        diagrama_id: model.meta.id.clone(),
        equipamentos: model
            .equipamentos_iter()
            .map(EquipmentLayout::from_equipment)
            .collect(),
        conexoes: model.connections_iter().cloned().collect(),
    }
}

/// Wendet ein Layout als atomaren Ersatz auf einen gespeicherten Stand an.
///
/// Equipments, die im Layout fehlen, werden aus dem Diagramm entfernt;
/// unbekannte IDs werden aus `nome`/`tipo` neu angelegt.
pub fn apply_layout(snapshot: &mut DiagramSnapshot, payload: &LayoutPayload) {
    let mut existing: IndexMap<String, Equipment> = snapshot
        .equipamentos
        .drain(..)
        .map(|eq| (eq.id.clone(), eq))
        .collect();

    let mut next = Vec::with_capacity(payload.equipamentos.len());
    for layout in &payload.equipamentos {
        let mut eq = existing.shift_remove(&layout.id).unwrap_or_else(|| {
            let mut eq = Equipment::new(
                layout.id.clone(),
                layout.nome.clone(),
                layout.tipo,
                Vec2::ZERO,
            );
            eq.unidade_id = snapshot.diagrama.unidade_id.clone();
            eq
        });
        layout.apply_to(&mut eq);
        eq.diagrama_id = Some(snapshot.diagrama.id.clone());
        next.push(eq);
    }

    snapshot.equipamentos = next;
    snapshot.conexoes = payload.conexoes.clone();
}
