//! Question catalogue endpoint

use axum::{extract::State, Json};

use crate::AppState;
use opros_common::QuestionCatalog;

/// GET /api/questions
///
/// The catalogue the pages render from; immutable for the process lifetime.
pub async fn get_questions(State(state): State<AppState>) -> Json<QuestionCatalog> {
    Json(state.catalog.as_ref().clone())
}
