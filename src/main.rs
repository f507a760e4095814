//! Vitrine - GLB model inspector
//!
//! Loads a binary glTF model and logs what the renderer would receive:
//! one line per mesh with its vertex count, base color and bounds.
//!
//! Usage: `vitrine [MODEL.glb]` or `vitrine --init-settings` to write the
//! current settings to the config directory.

mod report;
mod settings;

use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vitrine_assets::AssetServer;

use crate::settings::ViewerSettings;

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let settings = ViewerSettings::load();
    let arg = std::env::args_os().nth(1);
    if arg.as_deref() == Some(OsStr::new("--init-settings")) {
        return settings.save();
    }
    let model = arg
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.assets.default_model.clone());

    let mut server = AssetServer::with_options(&settings.assets.base_path, settings.parse.clone());
    let scene = server
        .load_scene(&model)
        .with_context(|| format!("Failed to load model {}", model.display()))?;

    if let Some(generator) = &scene.generator {
        info!("Generator: {}", generator);
    }
    if scene.root.is_empty() {
        warn!("Model {} has nothing to show", model.display());
    }
    for line in report::mesh_lines(&scene) {
        info!("{}", line);
    }
    info!(
        "{} meshes, {} vertices total",
        scene.root.len(),
        scene.root.vertex_count()
    );
    Ok(())
}
