//! Unifilar-Editor (headless).
//!
//! Lädt ein Diagramm aus einem JSON-Verzeichnis, routet alle Verbindungen,
//! erkennt Sammelschienen und gibt das Layout als JSON aus.

use serde::Serialize;
use unifilar_editor::{
    AppController, AppIntent, AppState, Barramento, EngineOptions, JsonDirectoryService,
    VisualConnection,
};

const USAGE: &str = "Aufruf: unifilar-editor <verzeichnis> <diagramm-id> [--save]";

/// JSON-Ausgabe für nachgelagerte Renderer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutReport<'a> {
    diagrama_id: &'a str,
    equipment_count: usize,
    visual_connections: &'a [VisualConnection],
    barramentos: &'a [Barramento],
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Unifilar-Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let (Some(dir), Some(diagram_id)) = (args.next(), args.next()) else {
        anyhow::bail!(USAGE);
    };
    let save = match args.next().as_deref() {
        None => false,
        Some("--save") => true,
        Some(other) => anyhow::bail!("Unbekanntes Argument '{}'\n{}", other, USAGE),
    };

    // Optionen aus TOML laden (oder Standardwerte)
    let options = EngineOptions::load_from_file(&EngineOptions::config_path());
    let mut state = AppState::with_options(options);
    let mut controller = AppController::with_service(JsonDirectoryService::new(dir));

    controller.handle_intent(
        &mut state,
        AppIntent::LoadDiagramRequested {
            diagram_id: diagram_id.clone(),
            mode: None,
        },
    )?;

    if save {
        controller.handle_intent(&mut state, AppIntent::SaveRequested)?;
    }

    for event in controller.drain_host_events(&mut state) {
        log::debug!("Host-Event: {:?}", event);
    }

    let report = LayoutReport {
        diagrama_id: &diagram_id,
        equipment_count: state.equipment_count(),
        visual_connections: &state.layout.visual_connections,
        barramentos: &state.layout.barramentos,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    log::info!(
        "{} Verbindungen geroutet, {} Sammelschienen erkannt",
        state.layout.visual_connections.len(),
        state.layout.barramentos.len()
    );
    Ok(())
}
