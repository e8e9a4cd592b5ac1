use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use panorama_core::catalog::ResolutionCatalog;

use super::load_config;

#[derive(Args)]
pub struct TiersArgs {
    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &TiersArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    ResolutionCatalog::from_config(&config)?;
    crate::summary::print_catalog(&config);
    Ok(())
}
