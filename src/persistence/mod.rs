//! Persistenz: Laden, Anlegen und Layout-Speichern über einen Diagramm-Service.
//!
//! - `payload`: Wire-Formate (camelCase)
//! - `gateway`: `DiagramService`-Trait und `PersistenceGateway`
//! - `memory`/`file`/`http`: austauschbare Backends

mod file;
mod gateway;
#[cfg(feature = "http")]
mod http;
mod memory;
pub mod payload;

pub use file::JsonDirectoryService;
pub use gateway::{DiagramService, PersistenceGateway};
#[cfg(feature = "http")]
pub use http::HttpDiagramService;
pub use memory::InMemoryDiagramService;
pub use payload::{
    apply_layout, build_layout_payload, CreateDiagramRequest, DiagramSnapshot, EquipmentLayout,
    LayoutPayload, SaveTicket,
};
