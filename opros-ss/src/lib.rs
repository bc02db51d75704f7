//! opros-ss library - Survey Storage service
//!
//! Accepts survey submissions over HTTP (two wire encodings), persists
//! them to an append-only SQLite log, and serves raw results, aggregated
//! summaries, the question catalogue, and the two static survey pages.

use axum::Router;
use opros_common::QuestionCatalog;
use sqlx::SqlitePool;
use std::sync::Arc;

pub mod api;
pub mod db;
pub mod seed;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Immutable question catalogue, loaded once at startup
    pub catalog: Arc<QuestionCatalog>,
    /// Admin token for destructive endpoints; None disables the admin API
    pub admin_token: Option<String>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, catalog: Arc<QuestionCatalog>, admin_token: Option<String>) -> Self {
        Self {
            db,
            catalog,
            admin_token,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    // Admin routes (token-guarded, disabled when no token is configured)
    let admin = Router::new()
        .route("/api/admin/responses", delete(api::clear_responses))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_auth_middleware,
        ));

    // Public API and embedded UI pages. CORS stays permissive: the survey
    // form and dashboard have historically been hosted on a different
    // origin than the storage endpoint.
    let public = Router::new()
        .route("/api/submit", post(api::submit_response))
        .route("/api/results", get(api::get_results))
        .route("/api/summary", get(api::get_summary))
        .route("/api/questions", get(api::get_questions))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/", get(api::serve_survey_page))
        .route("/results", get(api::serve_results_page))
        .route("/static/survey.js", get(api::serve_survey_js))
        .route("/static/results.js", get(api::serve_results_js))
        .route("/static/style.css", get(api::serve_style_css))
        .merge(api::health_routes());

    Router::new()
        .merge(admin)
        .merge(public)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
