//! Spell row and spell link writes

use spellbook_common::db::{ClassId, SpellId, SubclassId};
use sqlx::types::Json;
use sqlx::SqliteConnection;

use crate::catalog::SpellRecord;

/// Insert or refresh the spell row for `record`, returning its id
///
/// `school` and `damage` are stored as the JSON they arrived as; a missing
/// payload is stored as NULL.
pub async fn upsert_spell(conn: &mut SqliteConnection, record: &SpellRecord) -> sqlx::Result<SpellId> {
    sqlx::query_scalar(
        r#"
        INSERT INTO spells (
            spell_index, name, "range", material, ritual, duration, concentration,
            casting_time, level, attack_type, school, description, higher_level,
            components, damage, url
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(spell_index) DO UPDATE SET
            name = excluded.name,
            "range" = excluded."range",
            material = excluded.material,
            ritual = excluded.ritual,
            duration = excluded.duration,
            concentration = excluded.concentration,
            casting_time = excluded.casting_time,
            level = excluded.level,
            attack_type = excluded.attack_type,
            school = excluded.school,
            description = excluded.description,
            higher_level = excluded.higher_level,
            components = excluded.components,
            damage = excluded.damage,
            url = excluded.url,
            updated_at = CURRENT_TIMESTAMP
        RETURNING id
        "#,
    )
    .bind(&record.index)
    .bind(&record.name)
    .bind(&record.range)
    .bind(&record.material)
    .bind(record.ritual)
    .bind(&record.duration)
    .bind(record.concentration)
    .bind(&record.casting_time)
    .bind(record.level)
    .bind(&record.attack_type)
    .bind(opaque_payload(&record.school))
    .bind(Json(&record.desc))
    .bind(Json(&record.higher_level))
    .bind(Json(&record.components))
    .bind(opaque_payload(&record.damage))
    .bind(&record.url)
    .fetch_one(conn)
    .await
}

fn opaque_payload(value: &serde_json::Value) -> Option<Json<&serde_json::Value>> {
    (!value.is_null()).then_some(Json(value))
}

/// Link spell to class
///
/// Returns `false` if the link already existed.
pub async fn link_spell_to_class(
    conn: &mut SqliteConnection,
    spell_id: SpellId,
    class_id: ClassId,
) -> sqlx::Result<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO spell_classes (spell_id, class_id) VALUES (?, ?)")
        .bind(spell_id)
        .bind(class_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Link spell to subclass
///
/// Returns `false` if the link already existed.
pub async fn link_spell_to_subclass(
    conn: &mut SqliteConnection,
    spell_id: SpellId,
    subclass_id: SubclassId,
) -> sqlx::Result<bool> {
    let result =
        sqlx::query("INSERT OR IGNORE INTO spell_subclasses (spell_id, subclass_id) VALUES (?, ?)")
            .bind(spell_id)
            .bind(subclass_id)
            .execute(conn)
            .await?;

    Ok(result.rows_affected() == 1)
}

/// Remove class links of `spell_id` whose class is not in `keep`
///
/// Returns the number of links removed.
pub async fn prune_spell_class_links(
    conn: &mut SqliteConnection,
    spell_id: SpellId,
    keep: &[ClassId],
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM spell_classes
        WHERE spell_id = ?
          AND class_id NOT IN (SELECT value FROM json_each(?))
        "#,
    )
    .bind(spell_id)
    .bind(Json(keep))
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Remove subclass links of `spell_id` whose subclass is not in `keep`
pub async fn prune_spell_subclass_links(
    conn: &mut SqliteConnection,
    spell_id: SpellId,
    keep: &[SubclassId],
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM spell_subclasses
        WHERE spell_id = ?
          AND subclass_id NOT IN (SELECT value FROM json_each(?))
        "#,
    )
    .bind(spell_id)
    .bind(Json(keep))
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}
