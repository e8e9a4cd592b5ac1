use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use panorama_core::catalog::ResolutionCatalog;
use panorama_core::viewport::Viewport;

use super::load_config;

#[derive(Args)]
pub struct ResolveArgs {
    /// Zoom scale to resolve (clamped to the configured range)
    pub scale: f32,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ResolveArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let catalog = ResolutionCatalog::from_config(&config)?;

    let mut viewport = Viewport::new(&config.zoom, [0.0, 0.0]);
    viewport.set_scale(args.scale);
    let scale = viewport.scale();
    let tier = catalog.tier_for_scale(scale);

    println!("Scale:    {:.3}", scale);
    println!("Tier:     {}", tier);
    println!("Asset:    {}", catalog.locator(tier));

    Ok(())
}
