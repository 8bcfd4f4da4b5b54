//! Class and subclass writes

use spellbook_common::db::{ClassId, SubclassId};
use sqlx::SqliteConnection;

/// Insert a class keyed by `natural_key`, or return the id of the existing row
pub async fn upsert_class(
    conn: &mut SqliteConnection,
    natural_key: &str,
    name: &str,
    url: &str,
) -> sqlx::Result<ClassId> {
    // The no-op update makes RETURNING yield the id of an existing row too
    sqlx::query_scalar(
        r#"
        INSERT INTO classes (natural_key, name, url) VALUES (?, ?, ?)
        ON CONFLICT(natural_key) DO UPDATE SET natural_key = excluded.natural_key
        RETURNING id
        "#,
    )
    .bind(natural_key)
    .bind(name)
    .bind(url)
    .fetch_one(conn)
    .await
}

/// Insert a subclass keyed by `natural_key`, or return the id of the existing row
pub async fn upsert_subclass(
    conn: &mut SqliteConnection,
    natural_key: &str,
    name: &str,
    url: &str,
) -> sqlx::Result<SubclassId> {
    sqlx::query_scalar(
        r#"
        INSERT INTO subclasses (natural_key, name, url) VALUES (?, ?, ?)
        ON CONFLICT(natural_key) DO UPDATE SET natural_key = excluded.natural_key
        RETURNING id
        "#,
    )
    .bind(natural_key)
    .bind(name)
    .bind(url)
    .fetch_one(conn)
    .await
}
