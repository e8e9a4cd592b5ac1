mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panorama", about = "Resolution tier tooling for the panorama viewer")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every resolution tier from one master image
    Generate(commands::generate::GenerateArgs),
    /// Show the tier catalog
    Tiers(commands::tiers::TiersArgs),
    /// Show which tier a zoom scale resolves to
    Resolve(commands::resolve::ResolveArgs),
    /// Print or save the default viewer config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Tiers(args) => commands::tiers::run(args),
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
