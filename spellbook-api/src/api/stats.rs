//! Store statistics

use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::{table_counts, TableCount};
use crate::error::ApiResult;
use crate::AppState;

/// Row counts of every catalog table
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub tables: Vec<TableCount>,
}

/// GET /stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let tables = table_counts(&state.db).await?;
    Ok(Json(StatsResponse { tables }))
}
