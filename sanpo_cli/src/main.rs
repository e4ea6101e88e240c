use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::{Parser, Subcommand};
use sanpo_ors::OrsProfile;
use tracing::error;
use uuid::Uuid;

use crate::{compute::ComputeArgs, config::AppConfig};

mod compute;
mod config;
mod inspect;
mod parsers;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory the geometry and statement files are written to
    #[arg(short, long, global = true, default_value = ".")]
    out: PathBuf,

    /// Pause between two routing requests (e.g., "1s", "500ms", "PT2S")
    #[arg(long, global = true, value_parser = parsers::parse_duration, default_value = "1s")]
    delay: Duration,

    /// Routing profile (foot-walking, foot-hiking, cycling-regular, driving-car, wheelchair)
    #[arg(short, long, global = true, value_parser = OrsProfile::from_str, default_value = "foot-walking")]
    profile: OrsProfile,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the geometry of a single route
    Route { route_id: Uuid },

    /// Compute the geometry of every route
    All {
        /// Leave routes with a stored geometry untouched
        #[arg(long)]
        skip_computed: bool,
    },

    /// List routes and whether their geometry is stored
    #[command(visible_alias = "ls")]
    List,

    /// Describe the stored geometry of a route
    Check { route_id: Uuid },
}

#[tokio::main]
async fn main() {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    if let Err(err) = run(cli).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let config = AppConfig::from_env()?;
    let args = |skip_computed| ComputeArgs {
        out: cli.out.clone(),
        delay: cli.delay,
        profile: cli.profile,
        skip_computed,
    };

    match cli.command {
        Commands::Route { route_id } => compute::run_route(&config, args(false), route_id).await?,
        Commands::All { skip_computed } => compute::run_all(&config, args(skip_computed)).await?,
        Commands::List => inspect::list(&config).await?,
        Commands::Check { route_id } => inspect::check(&config, route_id).await?,
    }

    Ok(())
}
