//! HTTP API handlers for opros-ss

pub mod admin;
pub mod auth;
pub mod buildinfo;
pub mod health;
pub mod questions;
pub mod results;
pub mod submit;
pub mod summary;
pub mod ui;

pub use admin::clear_responses;
pub use auth::admin_auth_middleware;
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use questions::get_questions;
pub use results::get_results;
pub use submit::submit_response;
pub use summary::get_summary;
pub use ui::{
    serve_results_js, serve_results_page, serve_style_css, serve_survey_js, serve_survey_page,
};
