pub mod config;
pub mod generate;
pub mod resolve;
pub mod tiers;

use std::path::Path;

use anyhow::{Context, Result};
use panorama_core::config::ViewerConfig;

/// Viewer config from `path`, or the built-in defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    match path {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ViewerConfig::default()),
    }
}
