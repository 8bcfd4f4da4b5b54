//! Spell listings by class and subclass
//!
//! Path keys are case-folded before lookup, matching how spellbook-seed
//! stores class and subclass natural keys.

use axum::{
    extract::{Path, State},
    Json,
};
use spellbook_common::db::SpellSummary;

use super::spells::non_empty;
use crate::db::spells as queries;
use crate::error::ApiResult;
use crate::AppState;

/// GET /classes/:class
pub async fn spells_by_class(
    State(state): State<AppState>,
    Path(class): Path<String>,
) -> ApiResult<Json<Vec<SpellSummary>>> {
    non_empty(queries::spells_by_class(&state.db, &class.to_lowercase()).await?)
}

/// GET /subclasses/:subclass
pub async fn spells_by_subclass(
    State(state): State<AppState>,
    Path(subclass): Path<String>,
) -> ApiResult<Json<Vec<SpellSummary>>> {
    non_empty(queries::spells_by_subclass(&state.db, &subclass.to_lowercase()).await?)
}
