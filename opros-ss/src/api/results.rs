//! Raw results read path

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::responses::fetch_all;
use crate::AppState;
use opros_common::model::ResultsEnvelope;

/// Query parameters for the results endpoint
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub action: Option<String>,
}

/// GET /api/results?action=getResults
///
/// Returns every stored response in insertion order. Any other (or
/// missing) `action` value is rejected with a JSON error object.
pub async fn get_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ResultsEnvelope>, ResultsError> {
    if query.action.as_deref() != Some("getResults") {
        return Err(ResultsError::InvalidAction);
    }

    let responses = fetch_all(&state.db)
        .await
        .map_err(|e| ResultsError::Database(e.to_string()))?;
    let total_count = responses.len() as u64;

    Ok(Json(ResultsEnvelope {
        responses,
        total_count,
    }))
}

/// Read-path errors
#[derive(Debug)]
pub enum ResultsError {
    InvalidAction,
    Database(String),
}

impl IntoResponse for ResultsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ResultsError::InvalidAction => (StatusCode::BAD_REQUEST, "Invalid action".to_string()),
            ResultsError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
