//! Marle Engine Runtime
//!
//! Sandbox binary: boots the engine with the winit platform and the Glass client.

mod sandbox;

use anyhow::{Context as _, Result};
use marle_core::{Engine, EngineConfig, EngineError};
use marle_render::WinitPlatform;
use sandbox::Sandbox;
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_CONFIG: &str = "marle.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    tracing::info!("Marle Engine v{}", marle_core::VERSION);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            let code = err
                .downcast_ref::<EngineError>()
                .map_or(1, EngineError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    let config = load_config()?;
    let mut engine = Engine::new(config, WinitPlatform::new(), Sandbox::new());
    engine.run().context("engine stopped with an error")?;

    let (_, app) = engine.into_parts();
    tracing::info!(position = %app.bouncer().position(), "clean exit");
    Ok(())
}

/// First CLI argument, then `marle.json`, then built-in sandbox defaults.
fn load_config() -> Result<EngineConfig> {
    if let Some(path) = std::env::args().nth(1) {
        return EngineConfig::load(&path).with_context(|| format!("loading config {path}"));
    }
    if Path::new(DEFAULT_CONFIG).exists() {
        return EngineConfig::load(DEFAULT_CONFIG).context("loading marle.json");
    }
    Ok(EngineConfig::default().with_window(sandbox::window_props()))
}
