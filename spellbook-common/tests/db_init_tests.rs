//! Tests for database initialization and schema constraints

use spellbook_common::db::{
    get_schema_version, init_database, init_memory_database, CURRENT_SCHEMA_VERSION,
};
use tempfile::TempDir;

async fn table_names(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("spellbook.db");
    let url = format!("sqlite://{}", db_path.display());

    let pool = init_database(&url).await;
    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("spellbook.db").display());

    let pool1 = init_database(&url).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&url).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_all_tables_created() {
    let pool = init_memory_database().await.unwrap();

    let tables = table_names(&pool).await;
    for expected in [
        "caster_progression",
        "classes",
        "schema_version",
        "spell_classes",
        "spell_subclasses",
        "spells",
        "subclasses",
    ] {
        assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
    }
}

#[tokio::test]
async fn test_migrations_record_current_version() {
    let pool = init_memory_database().await.unwrap();

    assert_eq!(get_schema_version(&pool).await.unwrap(), CURRENT_SCHEMA_VERSION);

    // Re-running the bootstrap must not add another version row
    spellbook_common::db::create_schema(&pool).await.unwrap();
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_spell_level_out_of_range_rejected() {
    let pool = init_memory_database().await.unwrap();

    let result = sqlx::query("INSERT INTO spells (spell_index, name, level) VALUES ('x', 'X', 10)")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_caster_progression_natural_key_unique() {
    let pool = init_memory_database().await.unwrap();

    let insert = "INSERT INTO caster_progression (caster_type, caster_level, slots) VALUES ('full', 1, '{\"1\":2}')";
    sqlx::query(insert).execute(&pool).await.unwrap();

    let duplicate = sqlx::query(insert).execute(&pool).await;
    assert!(duplicate.is_err(), "plain insert of an existing (type, level) must fail");
}

#[tokio::test]
async fn test_link_requires_existing_spell() {
    let pool = init_memory_database().await.unwrap();

    sqlx::query("INSERT INTO classes (natural_key, name, url) VALUES ('wizard', 'Wizard', 'api/classes/wizard')")
        .execute(&pool)
        .await
        .unwrap();

    let result = sqlx::query("INSERT INTO spell_classes (spell_id, class_id) VALUES (999, 1)")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "foreign keys must be enforced");
}
