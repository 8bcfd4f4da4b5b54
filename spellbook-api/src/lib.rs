//! spellbook-api library - read-only spell lookups
//!
//! Serves JSON lookups over a store loaded by spellbook-seed. No route
//! writes to the database. CORS is open so the browser front end can call
//! the service from any origin.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
    /// Service startup timestamp for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            started_at: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/spells/concentration", get(api::concentration_spells))
        .route("/spells/levels/:level", get(api::spells_by_level))
        .route("/spells/:index", get(api::get_spell))
        .route("/classes/:class", get(api::spells_by_class))
        .route("/subclasses/:subclass", get(api::spells_by_subclass))
        .route(
            "/caster-progression/:caster_type/:level",
            get(api::get_caster_progression),
        )
        .route("/stats", get(api::get_stats))
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
