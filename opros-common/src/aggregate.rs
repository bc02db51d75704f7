//! Result aggregation
//!
//! Single pass over the stored responses computing per-question yes/no
//! tallies and percentages plus the filtered feedback list. Recomputed
//! fresh on every request; identical input produces identical output
//! (ordered maps, no interior randomness).

use crate::catalog::QuestionCatalog;
use crate::model::{coerce_text, is_truthy, QuestionStats, SurveyResponse, SurveySummary};
use std::collections::BTreeMap;

/// Literal answer values counted toward the yes/no tallies
const ANSWER_YES: &str = "yes";
const ANSWER_NO: &str = "no";

/// Aggregate the full response log against the question catalogue.
///
/// A response counts toward a question's `totalAnswers` iff its value at
/// that key is truthy (null/false/0/"" are not answers); only the literal
/// `"yes"`/`"no"` strings move the yes/no counts, so stray values can make
/// the percentages sum below 100. Malformed entries skip that question's
/// tally rather than failing the aggregation.
pub fn aggregate(responses: &[SurveyResponse], catalog: &QuestionCatalog) -> SurveySummary {
    let mut per_question = BTreeMap::new();

    for question in &catalog.questions {
        let key = question.key();
        let mut stats = QuestionStats::default();

        for response in responses {
            let Some(value) = response.answers.get(&key) else {
                continue;
            };
            if !is_truthy(value) {
                continue;
            }
            stats.total_answers += 1;
            match value.as_str() {
                Some(ANSWER_YES) => stats.yes_count += 1,
                Some(ANSWER_NO) => stats.no_count += 1,
                _ => {}
            }
        }

        stats.yes_percentage = percentage(stats.yes_count, stats.total_answers);
        stats.no_percentage = percentage(stats.no_count, stats.total_answers);
        per_question.insert(key, stats);
    }

    let feedback = responses
        .iter()
        .filter_map(|r| coerce_text(&r.feedback))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    SurveySummary {
        total_count: responses.len() as u64,
        per_question,
        feedback,
    }
}

/// Whole percent in [0, 100], rounded half away from zero; 0 for an empty total
fn percentage(count: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionCatalog;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    fn response(answers: &[(&str, Value)], feedback: &str) -> SurveyResponse {
        SurveyResponse {
            submission_id: None,
            timestamp: "2025-06-01T12:00:00.000Z".to_string(),
            answers: answers
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            feedback: json!(feedback),
        }
    }

    fn catalog() -> &'static QuestionCatalog {
        QuestionCatalog::embedded_default()
    }

    #[test]
    fn test_empty_dataset_is_all_zero() {
        let summary = aggregate(&[], catalog());
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.per_question.len(), catalog().questions.len());
        for stats in summary.per_question.values() {
            assert_eq!(*stats, QuestionStats::default());
        }
        assert!(summary.feedback.is_empty());
    }

    #[test]
    fn test_single_response_yields_whole_percentages() {
        let responses = vec![response(
            &[("question_1", json!("yes")), ("question_2", json!("no"))],
            "",
        )];
        let summary = aggregate(&responses, catalog());

        let q1 = &summary.per_question["question_1"];
        assert_eq!((q1.total_answers, q1.yes_percentage, q1.no_percentage), (1, 100, 0));

        let q2 = &summary.per_question["question_2"];
        assert_eq!((q2.total_answers, q2.yes_percentage, q2.no_percentage), (1, 0, 100));

        // Unanswered questions stay uncounted
        assert_eq!(summary.per_question["question_3"].total_answers, 0);
    }

    #[test]
    fn test_percentages_sum_to_100_without_stray_values() {
        let responses = vec![
            response(&[("question_1", json!("yes"))], ""),
            response(&[("question_1", json!("yes"))], ""),
            response(&[("question_1", json!("no"))], ""),
        ];
        let summary = aggregate(&responses, catalog());
        let q1 = &summary.per_question["question_1"];
        assert_eq!(q1.yes_count + q1.no_count, q1.total_answers);
        assert_eq!(q1.yes_percentage as u32 + q1.no_percentage as u32, 100);
        assert_eq!(q1.yes_percentage, 67); // 2/3 rounds up
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 1 of 8 = 12.5% -> 13
        let mut responses = vec![response(&[("question_1", json!("yes"))], "")];
        for _ in 0..7 {
            responses.push(response(&[("question_1", json!("no"))], ""));
        }
        let summary = aggregate(&responses, catalog());
        assert_eq!(summary.per_question["question_1"].yes_percentage, 13);
        assert_eq!(summary.per_question["question_1"].no_percentage, 88);
    }

    #[test]
    fn test_stray_truthy_values_count_only_toward_total() {
        let responses = vec![
            response(&[("question_1", json!("yes"))], ""),
            response(&[("question_1", json!("maybe"))], ""),
        ];
        let summary = aggregate(&responses, catalog());
        let q1 = &summary.per_question["question_1"];
        assert_eq!(q1.total_answers, 2);
        assert_eq!(q1.yes_count, 1);
        assert_eq!(q1.no_count, 0);
        // 1/2 yes, stray value drags the sum below 100
        assert_eq!(q1.yes_percentage as u32 + q1.no_percentage as u32, 50);
    }

    #[test]
    fn test_falsy_values_are_not_answers() {
        let responses = vec![
            response(&[("question_1", json!(""))], ""),
            response(&[("question_1", Value::Null)], ""),
            response(&[("question_1", json!(0))], ""),
            response(&[("question_1", json!(false))], ""),
        ];
        let summary = aggregate(&responses, catalog());
        assert_eq!(summary.per_question["question_1"].total_answers, 0);
        assert_eq!(summary.per_question["question_1"].yes_percentage, 0);
    }

    #[test]
    fn test_unknown_answer_keys_are_ignored() {
        let responses = vec![response(&[("question_999", json!("yes"))], "")];
        let summary = aggregate(&responses, catalog());
        assert!(!summary.per_question.contains_key("question_999"));
        assert_eq!(summary.total_count, 1);
    }

    #[test]
    fn test_feedback_filtered_and_ordered() {
        let responses = vec![
            response(&[], "  first  "),
            response(&[], ""),
            response(&[], "   "),
            response(&[], "second"),
        ];
        let summary = aggregate(&responses, catalog());
        assert_eq!(summary.feedback, vec!["first", "second"]);
    }

    #[test]
    fn test_numeric_feedback_is_stringified() {
        let mut r = response(&[], "");
        r.feedback = json!(42);
        let summary = aggregate(&[r], catalog());
        assert_eq!(summary.feedback, vec!["42"]);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let responses = vec![
            response(&[("question_1", json!("yes")), ("question_2", json!("no"))], "a"),
            response(&[("question_1", json!("no"))], "b"),
        ];
        let first = aggregate(&responses, catalog());
        let second = aggregate(&responses, catalog());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
