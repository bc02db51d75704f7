//! Survey data model and wire types
//!
//! Field names serialize in the camelCase form the survey clients have
//! always exchanged (`submissionId`, `totalCount`, `yesPercentage`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One completed submission of answers plus optional feedback.
///
/// Answer values are kept as raw JSON values rather than a closed enum:
/// historical rows may carry values other than the `"yes"`/`"no"` literals,
/// and aggregation must tolerate them instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// Client-generated idempotency key; storage rejects duplicates.
    /// Absent for legacy submitters.
    #[serde(
        rename = "submissionId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub submission_id: Option<String>,

    /// RFC 3339 submission time
    pub timestamp: String,

    /// Question key (`question_<id>`) to answer value
    #[serde(default)]
    pub answers: BTreeMap<String, Value>,

    /// Free-text feedback; validation normalizes this to a string
    #[serde(default)]
    pub feedback: Value,
}

/// Per-question yes/no tallies, recomputed fresh on every request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    pub total_answers: u32,
    pub yes_count: u32,
    pub no_count: u32,
    /// Integer percent in [0, 100], rounded half away from zero
    pub yes_percentage: u8,
    pub no_percentage: u8,
}

/// Aggregated view over the whole response log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    pub total_count: u64,
    /// Keyed by question key (`question_<id>`)
    pub per_question: BTreeMap<String, QuestionStats>,
    /// Non-empty trimmed feedback texts in response order
    pub feedback: Vec<String>,
}

/// Raw results envelope returned by `GET ?action=getResults`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsEnvelope {
    pub responses: Vec<SurveyResponse>,
    pub total_count: u64,
}

/// Write-path acknowledgement envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitAck {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// JSON truthiness, matching the filter the dashboards have always applied:
/// null, false, 0 and "" do not count as an answer; anything else does.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a feedback value to display text.
///
/// Strings pass through, numbers and booleans are stringified (spreadsheet
/// rows sometimes come back numeric); null and structured values yield None.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
