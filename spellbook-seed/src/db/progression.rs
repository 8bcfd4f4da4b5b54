//! Caster progression writes

use spellbook_common::{CasterType, SpellSlots};
use sqlx::types::Json;
use sqlx::SqliteConnection;

/// Write the slot map for one (caster_type, caster_level)
///
/// Replaces the slots of an existing row, so seeding the same store twice
/// leaves exactly one row per natural key.
pub async fn upsert_caster_progression(
    conn: &mut SqliteConnection,
    caster_type: CasterType,
    caster_level: u8,
    slots: &SpellSlots,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO caster_progression (caster_type, caster_level, slots)
        VALUES (?, ?, ?)
        ON CONFLICT(caster_type, caster_level) DO UPDATE SET
            slots = excluded.slots,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(caster_type.as_str())
    .bind(i64::from(caster_level))
    .bind(Json(slots))
    .execute(conn)
    .await?;

    Ok(())
}
