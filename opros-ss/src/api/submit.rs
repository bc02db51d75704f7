//! Submission write path
//!
//! Accepts both wire encodings the survey clients use: a multipart form
//! whose `data` field holds the JSON document (primary transport), and a
//! raw JSON text body (alternate transport, sent when the submitter cannot
//! read responses). Either way the payload is validated, filtered to the
//! catalogued questions, and appended to the log.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use opros_common::model::SubmitAck;
use opros_common::validate::{validate, ValidationError};
use tracing::info;

use crate::db::responses::{insert_response, InsertError};
use crate::AppState;

/// Submission body size cap
const MAX_BODY_BYTES: usize = 64 * 1024;

/// POST /api/submit
pub async fn submit_response(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<SubmitAck>, SubmitError> {
    let payload = extract_payload(request).await?;

    let raw: serde_json::Value =
        serde_json::from_str(&payload).map_err(|e| SubmitError::Malformed(e.to_string()))?;
    let mut response = validate(raw)?;

    // Keep only catalogued question keys; unknown keys are dropped
    response.answers.retain(|key, _| state.catalog.contains_key(key));

    match insert_response(&state.db, &response).await {
        Ok(row_id) => {
            info!(
                row = row_id,
                answers = response.answers.len(),
                "survey response saved"
            );
            Ok(Json(SubmitAck::ok("Data saved successfully")))
        }
        Err(InsertError::Duplicate) => Err(SubmitError::Duplicate),
        Err(e) => Err(SubmitError::Storage(e.to_string())),
    }
}

/// Pull the JSON document out of whichever encoding the client used
async fn extract_payload(request: Request) -> Result<String, SubmitError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| SubmitError::Malformed(e.to_string()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| SubmitError::Malformed(e.to_string()))?
        {
            if field.name() == Some("data") {
                return field
                    .text()
                    .await
                    .map_err(|e| SubmitError::Malformed(e.to_string()));
            }
        }

        Err(SubmitError::Malformed(
            "multipart body has no `data` field".to_string(),
        ))
    } else {
        // Alternate encoding: the body is the JSON document itself,
        // regardless of the declared content type
        let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| SubmitError::Malformed(e.to_string()))?;
        String::from_utf8(bytes.to_vec()).map_err(|e| SubmitError::Malformed(e.to_string()))
    }
}

/// Write-path errors
#[derive(Debug)]
pub enum SubmitError {
    Validation(ValidationError),
    Malformed(String),
    Duplicate,
    Storage(String),
}

impl From<ValidationError> for SubmitError {
    fn from(e: ValidationError) -> Self {
        SubmitError::Validation(e)
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SubmitError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            SubmitError::Malformed(msg) => {
                (StatusCode::BAD_REQUEST, format!("malformed payload: {}", msg))
            }
            SubmitError::Duplicate => (StatusCode::CONFLICT, "duplicate submission".to_string()),
            SubmitError::Storage(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("storage error: {}", msg))
            }
        };

        (status, Json(SubmitAck::err(message))).into_response()
    }
}
