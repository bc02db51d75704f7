//! Admin authentication middleware
//!
//! Destructive endpoints require the `X-Admin-Token` header to match the
//! configured token. With no token configured the admin API is disabled
//! outright; there is no unauthenticated destructive surface.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Header carrying the admin token
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin authentication middleware
///
/// Applied to admin routes only; the public API and the pages never pass
/// through here.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err(AuthError::Disabled);
    };

    match request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(provided) if provided == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!("admin request with invalid token rejected");
            Err(AuthError::InvalidToken)
        }
        None => Err(AuthError::MissingToken),
    }
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    Disabled,
    InvalidToken,
    MissingToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Disabled => (StatusCode::FORBIDDEN, "Admin API disabled".to_string()),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid admin token".to_string()),
            AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "Missing admin token".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
