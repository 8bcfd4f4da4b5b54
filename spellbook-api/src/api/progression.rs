//! Caster progression lookup

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use spellbook_common::progression::{CasterType, SpellSlots, MAX_CASTER_LEVEL};

use crate::db::spells as queries;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Spell slots available at one caster level
#[derive(Debug, Serialize)]
pub struct CasterProgressionResponse {
    pub caster_type: CasterType,
    pub caster_level: u8,
    /// Slot level → slot count
    pub slots: SpellSlots,
}

/// GET /caster-progression/:caster_type/:level
pub async fn get_caster_progression(
    State(state): State<AppState>,
    Path((caster_type, level)): Path<(String, String)>,
) -> ApiResult<Json<CasterProgressionResponse>> {
    let caster_type: CasterType = caster_type
        .parse()
        .map_err(|e: spellbook_common::Error| ApiError::BadRequest(e.to_string()))?;

    let caster_level = level
        .parse::<u8>()
        .ok()
        .filter(|l| (1..=MAX_CASTER_LEVEL).contains(l))
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Invalid caster level '{}': expected 1-{}",
                level, MAX_CASTER_LEVEL
            ))
        })?;

    let row = queries::find_caster_progression(&state.db, caster_type, caster_level)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No {} progression for level {}",
                caster_type, caster_level
            ))
        })?;

    Ok(Json(CasterProgressionResponse {
        caster_type,
        caster_level,
        slots: row.slots.0,
    }))
}
