//! spellbook-seed - Spell catalog loader
//!
//! Loads a spell catalog JSON file into the spellbook store, normalizing the
//! classes and subclasses each spell names, then seeds the caster progression
//! tables. Runs once per catalog version; the first error ends the process.

use anyhow::{Context, Result};
use clap::Parser;
use spellbook_common::config::{
    resolve_database_url_with, TomlConfig, DATABASE_URL_ENV, DEFAULT_CATALOG_PATH,
};
use spellbook_common::db::init_database;
use spellbook_seed::{ingest, load_catalog, seed_caster_progression};
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for spellbook-seed
#[derive(Parser, Debug)]
#[command(name = "spellbook-seed")]
#[command(about = "Load a spell catalog into the spellbook database")]
#[command(version)]
struct Args {
    /// sqlx database URL (falls back to SPELLBOOK_DBURL, then config.toml)
    #[arg(short, long)]
    database_url: Option<String>,

    /// Spell catalog JSON file
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spellbook_seed=info,spellbook_common=info".into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting spellbook-seed v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = TomlConfig::load();
    let database_url =
        resolve_database_url_with(args.database_url.as_deref(), DATABASE_URL_ENV, &toml_config)
            .context("Failed to resolve database URL")?;
    let catalog_path = args
        .catalog
        .or(toml_config.catalog_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

    let pool = init_database(&database_url)
        .await
        .context("Failed to open database")?;
    let mut conn = pool
        .acquire()
        .await
        .context("Failed to acquire database connection")?;

    let records = load_catalog(&catalog_path)?;

    let ingested = match ingest(&mut conn, &records).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let seeded = match seed_caster_progression(&mut conn).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    println!("Added {} entries to database", ingested.spells);
    println!("Added {} slots to table", seeded.full);
    println!("Added {} pact slots", seeded.pact);

    Ok(())
}
