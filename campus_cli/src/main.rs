use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use campus_tours::storage::TourStore;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tracing::debug;

use crate::{recompute::RecomputeArgs, route::RouteArgs, seed::SeedArgs};

mod file_utils;
mod parsers;
mod recompute;
mod route;
mod seed;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,

    /// SQLite database holding locations and tours
    #[arg(long, env = "CAMPUS_DATABASE_PATH", default_value = "campus.sqlite3")]
    database: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute walking directions between stops and print them as JSON
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Insert or update locations from JSON files, matched by slug
    Seed {
        #[command(flatten)]
        args: SeedArgs,
    },
    /// Recompute the cached route of a tour
    Recompute {
        #[command(flatten)]
        args: RecomputeArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
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

    match cli.command {
        Commands::Route { args } => route::run(args).await?,
        Commands::Seed { args } => {
            let store = open_store(&cli.database)?;
            seed::run(args, &store)?
        }
        Commands::Recompute { args } => {
            let store = open_store(&cli.database)?;
            recompute::run(args, Arc::new(store)).await?
        }
    }

    Ok(())
}

fn open_store(path: &Path) -> Result<TourStore, anyhow::Error> {
    debug!("Opening database {}", path.display());
    Ok(TourStore::open(path)?)
}
