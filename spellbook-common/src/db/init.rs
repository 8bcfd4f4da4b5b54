//! Database initialization
//!
//! Opens (creating if missing) the spellbook store and brings its schema up to
//! date. Table creation is idempotent, so every binary calls
//! [`init_database`] on startup regardless of whether the store already
//! exists.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let db_path = options.get_filename().to_path_buf();
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory store with the full schema
///
/// The pool is pinned to a single connection that never expires, so every
/// query sees the same database for the lifetime of the pool.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create every table, then apply pending migrations
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;
    create_spells_table(pool).await?;
    create_classes_table(pool).await?;
    create_subclasses_table(pool).await?;

    // Linking tables
    create_spell_classes_table(pool).await?;
    create_spell_subclasses_table(pool).await?;

    create_caster_progression_table(pool).await?;

    crate::db::migrations::run_migrations(pool).await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the spells table
///
/// List columns (`description`, `higher_level`, `components`) and the opaque
/// `school`/`damage` payloads are stored as JSON text.
pub async fn create_spells_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS spells (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            spell_index TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            "range" TEXT NOT NULL DEFAULT '',
            material TEXT NOT NULL DEFAULT '',
            ritual INTEGER NOT NULL DEFAULT 0,
            duration TEXT NOT NULL DEFAULT '',
            concentration INTEGER NOT NULL DEFAULT 0,
            casting_time TEXT NOT NULL DEFAULT '',
            level INTEGER NOT NULL,
            attack_type TEXT NOT NULL DEFAULT '',
            school TEXT,
            description TEXT NOT NULL DEFAULT '[]',
            higher_level TEXT NOT NULL DEFAULT '[]',
            components TEXT NOT NULL DEFAULT '[]',
            damage TEXT,
            url TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(spell_index) > 0),
            CHECK (level >= 0 AND level <= 9)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the classes table, keyed by lowercased display name
pub async fn create_classes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            natural_key TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            url TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(natural_key) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the subclasses table, keyed by lowercased display name
pub async fn create_subclasses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subclasses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            natural_key TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            url TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(natural_key) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_spell_classes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS spell_classes (
            spell_id INTEGER NOT NULL REFERENCES spells(id) ON DELETE CASCADE,
            class_id INTEGER NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
            PRIMARY KEY (spell_id, class_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_spell_classes_class ON spell_classes(class_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_spell_subclasses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS spell_subclasses (
            spell_id INTEGER NOT NULL REFERENCES spells(id) ON DELETE CASCADE,
            subclass_id INTEGER NOT NULL REFERENCES subclasses(id) ON DELETE CASCADE,
            PRIMARY KEY (spell_id, subclass_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_spell_subclasses_subclass ON spell_subclasses(subclass_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the caster_progression table
///
/// One row per (caster_type, caster_level); `slots` is a JSON object mapping
/// spell-slot level to slot count.
pub async fn create_caster_progression_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS caster_progression (
            caster_type TEXT NOT NULL CHECK (caster_type IN ('full', 'pact')),
            caster_level INTEGER NOT NULL CHECK (caster_level >= 1 AND caster_level <= 20),
            slots TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (caster_type, caster_level)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
