//! Integration tests for caster progression seeding

use spellbook_common::db::{init_memory_database, CasterProgressionRow};
use spellbook_common::SpellSlots;
use spellbook_seed::{seed_caster_progression, EntityKind, IngestError, SeedSummary};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};

async fn setup() -> (SqlitePool, PoolConnection<Sqlite>) {
    let pool = init_memory_database()
        .await
        .expect("Schema initialization failed");
    let conn = pool.acquire().await.expect("Should acquire connection");
    (pool, conn)
}

async fn rows_for(conn: &mut PoolConnection<Sqlite>, caster_type: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM caster_progression WHERE caster_type = ?")
        .bind(caster_type)
        .fetch_one(&mut **conn)
        .await
        .unwrap()
}

async fn slots(conn: &mut PoolConnection<Sqlite>, caster_type: &str, level: i64) -> SpellSlots {
    let row: CasterProgressionRow = sqlx::query_as(
        "SELECT caster_type, caster_level, slots FROM caster_progression
         WHERE caster_type = ? AND caster_level = ?",
    )
    .bind(caster_type)
    .bind(level)
    .fetch_one(&mut **conn)
    .await
    .unwrap();
    row.slots.0
}

#[tokio::test]
async fn test_seed_writes_twenty_rows_per_archetype() {
    let (_pool, mut conn) = setup().await;

    let summary = seed_caster_progression(&mut conn).await.unwrap();

    assert_eq!(summary, SeedSummary { full: 20, pact: 20 });
    assert_eq!(rows_for(&mut conn, "full").await, 20);
    assert_eq!(rows_for(&mut conn, "pact").await, 20);
}

#[tokio::test]
async fn test_seeded_slot_values() {
    let (_pool, mut conn) = setup().await;
    seed_caster_progression(&mut conn).await.unwrap();

    assert_eq!(slots(&mut conn, "full", 5).await.get(&1), Some(&4));
    assert_eq!(slots(&mut conn, "pact", 3).await.get(&2), Some(&2));

    let top = slots(&mut conn, "full", 20).await;
    assert_eq!(top.len(), 9);
    assert_eq!(top.get(&7), Some(&2));

    let raw: String = sqlx::query_scalar(
        "SELECT slots FROM caster_progression WHERE caster_type = 'pact' AND caster_level = 1",
    )
    .fetch_one(&mut *conn)
    .await
    .unwrap();
    assert_eq!(raw, r#"{"1":1}"#);
}

#[tokio::test]
async fn test_reseeding_does_not_duplicate_rows() {
    let (_pool, mut conn) = setup().await;

    seed_caster_progression(&mut conn).await.unwrap();
    let second = seed_caster_progression(&mut conn).await.unwrap();

    // Every row was rewritten, none were added
    assert_eq!(second, SeedSummary { full: 20, pact: 20 });
    assert_eq!(rows_for(&mut conn, "full").await, 20);
    assert_eq!(rows_for(&mut conn, "pact").await, 20);
}

#[tokio::test]
async fn test_seed_failure_keeps_prior_rows() {
    let (_pool, mut conn) = setup().await;

    // Reject pact level 4 so seeding stops part way through the pact table
    sqlx::query(
        "CREATE TRIGGER reject_pact_4 BEFORE INSERT ON caster_progression
         WHEN NEW.caster_type = 'pact' AND NEW.caster_level = 4
         BEGIN SELECT RAISE(ABORT, 'rejected'); END",
    )
    .execute(&mut *conn)
    .await
    .unwrap();

    let abort = seed_caster_progression(&mut conn).await.unwrap_err();

    assert_eq!(abort.full, 20);
    assert_eq!(abort.pact, 3);
    match abort.source {
        IngestError::StoreWrite { entity, key, .. } => {
            assert_eq!(entity, EntityKind::CasterProgression);
            assert_eq!(key, "pact/4");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(rows_for(&mut conn, "full").await, 20);
    assert_eq!(rows_for(&mut conn, "pact").await, 3);
}
