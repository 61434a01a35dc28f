mod db;
mod intake;
mod locations;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;
use crate::locations::LocationsCommands;

#[derive(Debug, Parser)]
#[command(name = "anzeige")]
#[command(about = "Incident notification extraction and location resolution")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract date, time and location from a notification file
    Extract {
        /// Plain-text or HTML notification body
        file: PathBuf,
    },
    /// Extract a notification, resolve its location, and print the incident draft
    Intake {
        /// Plain-text or HTML notification body
        file: PathBuf,
        /// Resolve against the catalog file instead of the database
        #[arg(long)]
        offline: bool,
    },
    /// Manage the location catalog
    Locations {
        #[command(subcommand)]
        command: LocationsCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = anzeige_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Extract { file }) => intake::run_extract(&config, &file)?,
        Some(Commands::Intake { file, offline }) => {
            intake::run_intake(&config, &file, offline).await?;
        }
        Some(Commands::Locations { command }) => {
            let pool = db::connect(&config).await?;
            locations::run_locations(&pool, &config, command).await?;
        }
        Some(Commands::Db { command }) => db::run_db(&config, command).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
