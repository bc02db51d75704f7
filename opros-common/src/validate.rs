//! Submission validation and normalization
//!
//! Checks the shape of an incoming submission, fills a default timestamp,
//! and bounds/sanitizes the free-text feedback. Pure: rejected submissions
//! never reach storage, accepted ones come out normalized.

use crate::model::SurveyResponse;
use crate::time;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Maximum feedback length in characters; longer text is truncated, not rejected
pub const MAX_FEEDBACK_LENGTH: usize = 200;

/// Submission validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Payload is not a JSON object
    #[error("invalid data format")]
    InvalidFormat,

    /// Payload has no `answers` object
    #[error("missing or invalid answers")]
    MissingAnswers,
}

/// Validate and normalize a raw submission.
///
/// - the payload must be a JSON object containing an `answers` object;
/// - a missing timestamp defaults to the current time (RFC 3339);
/// - feedback is coerced to text, truncated to [`MAX_FEEDBACK_LENGTH`]
///   characters, then stripped of `<` and `>` (markup denylist; the
///   dashboard additionally escapes at render time).
pub fn validate(raw: Value) -> Result<SurveyResponse, ValidationError> {
    let Value::Object(mut fields) = raw else {
        return Err(ValidationError::InvalidFormat);
    };

    let answers: BTreeMap<String, Value> = match fields.remove("answers") {
        Some(Value::Object(map)) => map.into_iter().collect(),
        _ => return Err(ValidationError::MissingAnswers),
    };

    let timestamp = match fields.remove("timestamp") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => time::now_iso8601(),
    };

    let submission_id = match fields.remove("submissionId") {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    };

    let feedback = normalize_feedback(fields.remove("feedback"));

    Ok(SurveyResponse {
        submission_id,
        timestamp,
        answers,
        feedback: Value::String(feedback),
    })
}

/// Truncate to the length bound, then drop angle brackets
pub fn sanitize_feedback(text: &str) -> String {
    text.chars()
        .take(MAX_FEEDBACK_LENGTH)
        .filter(|c| *c != '<' && *c != '>')
        .collect()
}

fn normalize_feedback(value: Option<Value>) -> String {
    let text = match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => return String::new(),
    };
    sanitize_feedback(&text)
}
