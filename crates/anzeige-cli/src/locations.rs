//! Location catalog command handlers for the CLI.
//!
//! Called from `main` after the database pool and config are established.
//! `match` is read-only; `resolve` may insert a stub location.

use std::path::PathBuf;

use anzeige_core::{load_location_catalog, AppConfig, Location};
use anzeige_resolver::{resolve, Resolution, ResolveOutcome, ResolverConfig};
use clap::Subcommand;

/// Sub-commands available under `locations`.
#[derive(Debug, Subcommand)]
pub enum LocationsCommands {
    /// List stored locations
    List {
        /// Number of rows to skip
        #[arg(long, default_value = "0")]
        skip: u32,
        /// Maximum number of rows to show
        #[arg(long, default_value = "100")]
        limit: u32,
    },
    /// Show one location as JSON
    Show {
        /// Location id
        id: i64,
    },
    /// Find the catalog entry a name would resolve to, without creating anything
    Match {
        /// Free-text location name
        name: String,
        /// Minimum fuzzy score; defaults to ANZEIGE_FUZZY_THRESHOLD
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Resolve a name, creating a stub location when nothing matches
    Resolve {
        /// Free-text location name
        name: String,
    },
    /// Import the catalog file, skipping names that already exist
    Import {
        /// Catalog YAML; defaults to ANZEIGE_CATALOG_PATH
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub(crate) async fn run_locations(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    command: LocationsCommands,
) -> anyhow::Result<()> {
    match command {
        LocationsCommands::List { skip, limit } => run_locations_list(pool, skip, limit).await,
        LocationsCommands::Show { id } => run_locations_show(pool, id).await,
        LocationsCommands::Match { name, threshold } => {
            run_locations_match(pool, config, &name, threshold).await
        }
        LocationsCommands::Resolve { name } => run_locations_resolve(pool, config, &name).await,
        LocationsCommands::Import { path } => {
            let path = path.unwrap_or_else(|| config.catalog_path.clone());
            run_locations_import(pool, &path).await
        }
    }
}

async fn run_locations_list(pool: &sqlx::PgPool, skip: u32, limit: u32) -> anyhow::Result<()> {
    let rows = anzeige_db::list_locations(pool, skip, limit).await?;
    if rows.is_empty() {
        println!("no locations found; run `locations import` first");
        return Ok(());
    }

    println!("{:<7}{:<26}{:<20}{:<8}STATE", "ID", "NAME", "CITY", "PLZ");
    for row in &rows {
        println!(
            "{:<7}{:<26}{:<20}{:<8}{}",
            row.id,
            row.name,
            row.city,
            row.postal_code.as_deref().unwrap_or("-"),
            row.state
        );
    }
    Ok(())
}

async fn run_locations_show(pool: &sqlx::PgPool, id: i64) -> anyhow::Result<()> {
    let row = anzeige_db::get_location(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("location {id} not found"))?;
    println!("{}", serde_json::to_string_pretty(&Location::from(row))?);
    Ok(())
}

async fn run_locations_match(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    name: &str,
    threshold: Option<f64>,
) -> anyhow::Result<()> {
    let mut resolver_config = ResolverConfig::from_app_config(config);
    if let Some(threshold) = threshold {
        resolver_config = resolver_config.with_threshold(threshold);
    }

    let catalog: Vec<Location> = anzeige_db::list_all_locations(pool)
        .await?
        .into_iter()
        .map(Location::from)
        .collect();

    match resolve(&catalog, name, &resolver_config)? {
        Resolution::Exact(location) => {
            println!("exact: {} (id {})", location.name, location.id);
        }
        Resolution::Fuzzy { location, score } => {
            println!(
                "fuzzy: {} (id {}), score {score:.3}",
                location.name, location.id
            );
        }
        Resolution::NotFound => {
            println!(
                "no match for '{name}' at threshold {:.2}",
                resolver_config.threshold
            );
        }
    }
    Ok(())
}

async fn run_locations_resolve(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    name: &str,
) -> anyhow::Result<()> {
    let resolved =
        anzeige_db::get_or_create_location(pool, name, &ResolverConfig::from_app_config(config))
            .await?;
    let how = match resolved.outcome {
        ResolveOutcome::Exact => "exact".to_string(),
        ResolveOutcome::Fuzzy { score } => format!("fuzzy, score {score:.3}"),
        ResolveOutcome::Created => "created stub".to_string(),
    };
    println!(
        "{} (id {}): {how}",
        resolved.location.name, resolved.location.id
    );
    Ok(())
}

async fn run_locations_import(pool: &sqlx::PgPool, path: &std::path::Path) -> anyhow::Result<()> {
    let file = load_location_catalog(path)?;
    let summary = anzeige_db::import_locations(pool, &file.locations).await?;
    println!(
        "imported {} location(s), skipped {} existing",
        summary.inserted, summary.skipped
    );
    Ok(())
}
