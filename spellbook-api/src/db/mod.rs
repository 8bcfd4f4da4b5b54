//! Database access layer for spellbook-api
//!
//! All connections are read-only; the store is written only by spellbook-seed.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub mod spells;
mod tables;

pub use tables::{table_counts, TableCount};

/// Connect to an existing store in read-only mode
pub async fn connect_readonly(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("Invalid database URL")?
        .read_only(true)
        .create_if_missing(false);

    if !options.get_filename().exists() {
        anyhow::bail!(
            "Database not found: {}\nRun spellbook-seed first to load the spell catalog.",
            options.get_filename().display()
        );
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("Failed to connect to database in read-only mode")?;

    Ok(pool)
}
