//! Response log queries

use opros_common::model::SurveyResponse;
use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;

/// Write-path failures surfaced to the API layer
#[derive(Debug, Error)]
pub enum InsertError {
    /// A row with the same submission id already exists
    #[error("duplicate submission")]
    Duplicate,

    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append one validated response to the log.
///
/// The UNIQUE constraint on `submission_id` rejects a retried submission
/// that already landed; rows without an id (legacy submitters) are always
/// accepted.
pub async fn insert_response(
    pool: &SqlitePool,
    response: &SurveyResponse,
) -> Result<i64, InsertError> {
    let answers_json = serde_json::to_string(&response.answers)?;
    let feedback = response.feedback.as_str().unwrap_or_default();

    let result = sqlx::query(
        "INSERT INTO responses (submission_id, timestamp, answers, feedback) VALUES (?, ?, ?, ?)",
    )
    .bind(&response.submission_id)
    .bind(&response.timestamp)
    .bind(&answers_json)
    .bind(feedback)
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(InsertError::Duplicate)
        }
        Err(e) => Err(e.into()),
    }
}

/// All responses in insertion order.
///
/// A row whose answers column fails to decode yields an empty answer map
/// instead of failing the whole read; aggregation then simply skips it.
pub async fn fetch_all(pool: &SqlitePool) -> sqlx::Result<Vec<SurveyResponse>> {
    let rows = sqlx::query_as::<_, (Option<String>, String, String, String)>(
        "SELECT submission_id, timestamp, answers, feedback FROM responses ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(submission_id, timestamp, answers, feedback)| SurveyResponse {
            submission_id,
            timestamp,
            answers: serde_json::from_str(&answers).unwrap_or_default(),
            feedback: Value::String(feedback),
        })
        .collect())
}

/// Number of stored responses
pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM responses")
        .fetch_one(pool)
        .await
}

/// Delete every response; returns the number of removed rows
pub async fn clear(pool: &SqlitePool) -> sqlx::Result<u64> {
    let done = sqlx::query("DELETE FROM responses").execute(pool).await?;
    Ok(done.rows_affected())
}
