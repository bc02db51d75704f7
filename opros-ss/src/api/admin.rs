//! Admin endpoints (token-guarded)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::db::responses::clear;
use crate::AppState;

/// Clear-path response
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub cleared: u64,
}

/// DELETE /api/admin/responses
///
/// Wipes the response log. Guarded by the admin token middleware.
pub async fn clear_responses(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, AdminError> {
    let cleared = clear(&state.db)
        .await
        .map_err(|e| AdminError::Database(e.to_string()))?;

    info!(cleared, "response log cleared by admin request");

    Ok(Json(ClearResponse {
        success: true,
        cleared,
    }))
}

/// Admin endpoint errors
#[derive(Debug)]
pub enum AdminError {
    Database(String),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let AdminError::Database(msg) = self;
        let body = Json(json!({
            "error": format!("Database error: {}", msg),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
