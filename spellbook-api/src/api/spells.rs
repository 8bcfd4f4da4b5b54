//! Spell lookups
//!
//! A spell is looked up by its catalog index exactly as stored; unlike class
//! and subclass keys, the index is not case-folded.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use spellbook_common::db::{SpellRow, SpellSummary};

use crate::db::spells as queries;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Highest spell level a lookup accepts
const MAX_SPELL_LEVEL: u8 = 9;

/// Spell detail with its class and subclass names
#[derive(Debug, Serialize)]
pub struct SpellResponse {
    pub index: String,
    pub name: String,
    pub desc: Vec<String>,
    pub higher_level: Vec<String>,
    pub range: String,
    pub components: Vec<String>,
    pub material: String,
    pub ritual: bool,
    pub duration: String,
    pub concentration: bool,
    pub casting_time: String,
    pub level: i64,
    pub attack_type: String,
    pub damage: Value,
    pub school: Value,
    pub classes: Vec<String>,
    pub subclasses: Vec<String>,
    pub url: String,
}

impl SpellResponse {
    fn from_row(row: SpellRow, classes: Vec<String>, subclasses: Vec<String>) -> Self {
        Self {
            index: row.spell_index,
            name: row.name,
            desc: row.description.0,
            higher_level: row.higher_level.0,
            range: row.range,
            components: row.components.0,
            material: row.material,
            ritual: row.ritual,
            duration: row.duration,
            concentration: row.concentration,
            casting_time: row.casting_time,
            level: row.level,
            attack_type: row.attack_type,
            damage: row.damage.map(|d| d.0).unwrap_or(Value::Null),
            school: row.school.map(|s| s.0).unwrap_or(Value::Null),
            classes,
            subclasses,
            url: row.url,
        }
    }
}

/// Empty listings are reported as missing rather than as `[]`
pub(crate) fn non_empty(spells: Vec<SpellSummary>) -> ApiResult<Json<Vec<SpellSummary>>> {
    if spells.is_empty() {
        return Err(ApiError::NotFound("Spells not found".to_string()));
    }
    Ok(Json(spells))
}

/// GET /spells/:index
pub async fn get_spell(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> ApiResult<Json<SpellResponse>> {
    let row = queries::find_spell(&state.db, &index)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Spell not found: {}", index)))?;

    let classes = queries::class_names_for_spell(&state.db, row.id).await?;
    let subclasses = queries::subclass_names_for_spell(&state.db, row.id).await?;

    Ok(Json(SpellResponse::from_row(row, classes, subclasses)))
}

/// GET /spells/levels/:level
pub async fn spells_by_level(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> ApiResult<Json<Vec<SpellSummary>>> {
    let level = level
        .parse::<u8>()
        .ok()
        .filter(|l| *l <= MAX_SPELL_LEVEL)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Invalid spell level '{}': expected 0-{}",
                level, MAX_SPELL_LEVEL
            ))
        })?;

    non_empty(queries::spells_by_level(&state.db, i64::from(level)).await?)
}

/// GET /spells/concentration
pub async fn concentration_spells(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SpellSummary>>> {
    non_empty(queries::concentration_spells(&state.db).await?)
}
