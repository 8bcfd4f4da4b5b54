//! Spell and progression lookups

use spellbook_common::db::{CasterProgressionRow, SpellId, SpellRow, SpellSummary};
use spellbook_common::CasterType;
use sqlx::SqlitePool;

/// Spell by natural key
pub async fn find_spell(pool: &SqlitePool, spell_index: &str) -> sqlx::Result<Option<SpellRow>> {
    sqlx::query_as(
        r#"
        SELECT id, spell_index, name, "range", material, ritual, duration, concentration,
               casting_time, level, attack_type, school, description, higher_level,
               components, damage, url
        FROM spells
        WHERE spell_index = ?
        "#,
    )
    .bind(spell_index)
    .fetch_optional(pool)
    .await
}

/// Display names of the classes a spell is linked to
pub async fn class_names_for_spell(pool: &SqlitePool, spell_id: SpellId) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar(
        r#"
        SELECT c.name
        FROM classes c
        JOIN spell_classes sc ON sc.class_id = c.id
        WHERE sc.spell_id = ?
        ORDER BY c.name
        "#,
    )
    .bind(spell_id)
    .fetch_all(pool)
    .await
}

/// Display names of the subclasses a spell is linked to
pub async fn subclass_names_for_spell(
    pool: &SqlitePool,
    spell_id: SpellId,
) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar(
        r#"
        SELECT s.name
        FROM subclasses s
        JOIN spell_subclasses ss ON ss.subclass_id = s.id
        WHERE ss.spell_id = ?
        ORDER BY s.name
        "#,
    )
    .bind(spell_id)
    .fetch_all(pool)
    .await
}

/// Spells of one level, by name
pub async fn spells_by_level(pool: &SqlitePool, level: i64) -> sqlx::Result<Vec<SpellSummary>> {
    sqlx::query_as("SELECT name, url FROM spells WHERE level = ? ORDER BY name")
        .bind(level)
        .fetch_all(pool)
        .await
}

/// Spells requiring concentration, by name
pub async fn concentration_spells(pool: &SqlitePool) -> sqlx::Result<Vec<SpellSummary>> {
    sqlx::query_as("SELECT name, url FROM spells WHERE concentration = 1 ORDER BY name")
        .fetch_all(pool)
        .await
}

/// Spells linked to the class with `natural_key`, by name
pub async fn spells_by_class(pool: &SqlitePool, natural_key: &str) -> sqlx::Result<Vec<SpellSummary>> {
    sqlx::query_as(
        r#"
        SELECT s.name, s.url
        FROM spells s
        JOIN spell_classes sc ON sc.spell_id = s.id
        JOIN classes c ON c.id = sc.class_id
        WHERE c.natural_key = ?
        ORDER BY s.name
        "#,
    )
    .bind(natural_key)
    .fetch_all(pool)
    .await
}

/// Spells linked to the subclass with `natural_key`, by name
pub async fn spells_by_subclass(
    pool: &SqlitePool,
    natural_key: &str,
) -> sqlx::Result<Vec<SpellSummary>> {
    sqlx::query_as(
        r#"
        SELECT s.name, s.url
        FROM spells s
        JOIN spell_subclasses ss ON ss.spell_id = s.id
        JOIN subclasses sub ON sub.id = ss.subclass_id
        WHERE sub.natural_key = ?
        ORDER BY s.name
        "#,
    )
    .bind(natural_key)
    .fetch_all(pool)
    .await
}

/// Slot row for one caster level
pub async fn find_caster_progression(
    pool: &SqlitePool,
    caster_type: CasterType,
    caster_level: u8,
) -> sqlx::Result<Option<CasterProgressionRow>> {
    sqlx::query_as(
        r#"
        SELECT caster_type, caster_level, slots
        FROM caster_progression
        WHERE caster_type = ? AND caster_level = ?
        "#,
    )
    .bind(caster_type.as_str())
    .bind(i64::from(caster_level))
    .fetch_optional(pool)
    .await
}
