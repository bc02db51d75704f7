//! UI serving routes
//!
//! Serves the embedded survey form and results dashboard pages

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const SURVEY_HTML: &str = include_str!("../ui/index.html");
const RESULTS_HTML: &str = include_str!("../ui/results.html");
const SURVEY_JS: &str = include_str!("../ui/survey.js");
const RESULTS_JS: &str = include_str!("../ui/results.js");
const STYLE_CSS: &str = include_str!("../ui/style.css");

/// GET /
///
/// Serves the survey form page
pub async fn serve_survey_page() -> Html<&'static str> {
    Html(SURVEY_HTML)
}

/// GET /results
///
/// Serves the results dashboard page
pub async fn serve_results_page() -> Html<&'static str> {
    Html(RESULTS_HTML)
}

/// GET /static/survey.js
pub async fn serve_survey_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        SURVEY_JS,
    )
        .into_response()
}

/// GET /static/results.js
pub async fn serve_results_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        RESULTS_JS,
    )
        .into_response()
}

/// GET /static/style.css
pub async fn serve_style_css() -> Response {
    (StatusCode::OK, [("content-type", "text/css")], STYLE_CSS).into_response()
}
