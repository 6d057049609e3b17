use std::time::Duration;

use super::payload::{CreateDiagramRequest, DiagramSnapshot, LayoutPayload};
use super::DiagramService;
use crate::core::{Diagram, EngineError};

/// Standard-Timeout für Backend-Anfragen.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// REST-Client für den Diagramm-Service.
///
/// Endpunkte relativ zu `base_url`:
/// - `GET  diagramas/{id}`
/// - `POST diagramas`
/// - `PUT  diagramas/{id}/layout`
pub struct HttpDiagramService {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpDiagramService {
    /// Client für die angegebene Basis-URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn map_error(err: ureq::Error, diagram_id: &str) -> EngineError {
    match err {
        ureq::Error::StatusCode(404) => EngineError::NotFound {
            id: diagram_id.to_string(),
        },
        other => EngineError::network(other),
    }
}

impl DiagramService for HttpDiagramService {
    fn fetch_diagram(&self, diagram_id: &str) -> Result<DiagramSnapshot, EngineError> {
        let url = self.url(&format!("diagramas/{}", diagram_id));
        log::debug!("GET {}", url);
        self.agent
            .get(&url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| map_error(e, diagram_id))?
            .body_mut()
            .read_json()
            .map_err(EngineError::network)
    }

    fn create_diagram(&self, request: &CreateDiagramRequest) -> Result<Diagram, EngineError> {
        let url = self.url("diagramas");
        log::debug!("POST {}", url);
        self.agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send_json(request)
            .map_err(EngineError::network)?
            .body_mut()
            .read_json()
            .map_err(EngineError::network)
    }

    fn put_layout(&self, payload: &LayoutPayload) -> Result<(), EngineError> {
        let url = self.url(&format!("diagramas/{}/layout", payload.diagrama_id));
        log::debug!("PUT {}", url);
        self.agent
            .put(&url)
            .header("Content-Type", "application/json")
            .send_json(payload)
            .map_err(|e| map_error(e, &payload.diagrama_id))?;
        Ok(())
    }
}
