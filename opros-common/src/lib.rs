//! # OPROS Common Library
//!
//! Shared code for the OPROS survey services including:
//! - Survey data model (responses, stats, wire envelopes)
//! - Question catalogue loading
//! - Submission validation and normalization
//! - Result aggregation
//! - Configuration resolution
//! - Utility functions

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod time;
pub mod validate;

pub use catalog::QuestionCatalog;
pub use error::{Error, Result};
pub use model::{QuestionStats, ResultsEnvelope, SurveyResponse, SurveySummary};
pub use validate::{validate, ValidationError};
