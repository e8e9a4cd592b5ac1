use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use panorama_core::catalog::{ResolutionCatalog, Tier};
use panorama_core::io::variants::{backup_master, generate_all, load_master, variant_specs};
use tracing::info;

use super::load_config;

#[derive(Args)]
pub struct GenerateArgs {
    /// Master image (the highest-resolution source)
    pub master: PathBuf,

    /// Viewer config file (TOML); tier widths, qualities and locators come from here
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the tier locators are resolved against
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Only generate these tiers (comma-separated, e.g. hd,4k)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<Tier>,

    /// Skip the one-time backup of the master
    #[arg(long)]
    pub no_backup: bool,

    /// Encoder threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the encoder thread pool")?;
    }

    let config = load_config(args.config.as_deref())?;
    ResolutionCatalog::from_config(&config)?;

    if !args.no_backup {
        match backup_master(&args.master)
            .with_context(|| format!("Failed to back up {}", args.master.display()))?
        {
            Some(path) => println!("Backed up master to {}", path.display()),
            None => info!("Backup already present, leaving it untouched"),
        }
    }

    let mut specs = variant_specs(&config, &args.out_dir);
    if !args.only.is_empty() {
        specs.retain(|spec| args.only.contains(&spec.tier));
    }

    println!("Loading {}...", args.master.display());
    let master = load_master(&args.master)
        .with_context(|| format!("Failed to read {}", args.master.display()))?;
    let master_bytes = std::fs::metadata(&args.master)
        .with_context(|| format!("Failed to stat {}", args.master.display()))?
        .len();
    println!(
        "  {}x{} master, {:.2} MB, {} tier(s) to encode",
        master.width(),
        master.height(),
        master_bytes as f64 / 1024.0 / 1024.0,
        specs.len()
    );

    let pb = ProgressBar::new(specs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Encoding");

    let reports = generate_all(&master, &specs, |report| {
        pb.set_message(format!("{} done", report.tier));
        pb.inc(1);
    })?;

    pb.finish_with_message("Done");
    crate::summary::print_reports(&reports);

    Ok(())
}
