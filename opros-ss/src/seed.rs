//! Demo dataset generation
//!
//! Fills the log with randomized responses so the dashboard has something
//! to show during development and demos. Never runs implicitly; only the
//! explicit `--seed-demo` flag reaches this.

use anyhow::Result;
use chrono::{Duration, SecondsFormat};
use opros_common::model::SurveyResponse;
use opros_common::{time, QuestionCatalog};
use rand::Rng;
use serde_json::json;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::db::responses::insert_response;

/// Insert `count` randomized responses: yes/no at even odds per question,
/// roughly a third of them with feedback, timestamps spread over the last
/// 24 hours.
pub async fn seed_demo(pool: &SqlitePool, catalog: &QuestionCatalog, count: u32) -> Result<u32> {
    let mut rng = rand::thread_rng();
    let mut inserted = 0;

    for i in 0..count {
        let age_seconds: i64 = rng.gen_range(0..86_400);
        let timestamp = (time::now() - Duration::seconds(age_seconds))
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut answers = BTreeMap::new();
        for question in &catalog.questions {
            let value = if rng.gen_bool(0.5) { "yes" } else { "no" };
            answers.insert(question.key(), json!(value));
        }

        let feedback = if rng.gen_bool(0.3) {
            format!("Тестовый отзыв {}", i + 1)
        } else {
            String::new()
        };

        let response = SurveyResponse {
            submission_id: None,
            timestamp,
            answers,
            feedback: json!(feedback),
        };

        insert_response(pool, &response).await?;
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect_memory, responses};
    use opros_common::aggregate::aggregate;

    #[tokio::test]
    async fn test_seed_inserts_requested_count() {
        let pool = connect_memory().await.unwrap();
        let catalog = QuestionCatalog::embedded_default();

        let inserted = seed_demo(&pool, catalog, 25).await.unwrap();
        assert_eq!(inserted, 25);
        assert_eq!(responses::count(&pool).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_seeded_rows_aggregate_cleanly() {
        let pool = connect_memory().await.unwrap();
        let catalog = QuestionCatalog::embedded_default();

        seed_demo(&pool, catalog, 10).await.unwrap();
        let stored = responses::fetch_all(&pool).await.unwrap();
        let summary = aggregate(&stored, catalog);

        assert_eq!(summary.total_count, 10);
        for stats in summary.per_question.values() {
            assert_eq!(stats.total_answers, 10);
            assert_eq!(stats.yes_count + stats.no_count, stats.total_answers);
        }
    }
}
