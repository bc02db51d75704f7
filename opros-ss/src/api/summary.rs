//! Aggregated summary read path

use axum::{extract::State, Json};

use crate::api::results::ResultsError;
use crate::db::responses::fetch_all;
use crate::AppState;
use opros_common::aggregate::aggregate;
use opros_common::model::SurveySummary;

/// GET /api/summary
///
/// Per-question yes/no counts and percentages plus the filtered feedback
/// list, recomputed from the full log on every request.
pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<SurveySummary>, ResultsError> {
    let responses = fetch_all(&state.db)
        .await
        .map_err(|e| ResultsError::Database(e.to_string()))?;

    Ok(Json(aggregate(&responses, &state.catalog)))
}
