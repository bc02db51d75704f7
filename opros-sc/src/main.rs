//! opros-sc (Survey Client) - command-line submission and results tool
//!
//! Submits a survey response to the storage service (with the same bounded
//! retry and encoding fallback the web form relies on) and prints the
//! aggregated results. Doubles as the end-to-end smoke check.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use opros_common::aggregate::aggregate;
use opros_common::model::SurveySummary;
use opros_common::{config, time, validate, QuestionCatalog};
use opros_sc::{RetryPolicy, SubmitClient};
use serde_json::json;
use std::path::PathBuf;

/// OPROS survey submission client
#[derive(Parser, Debug)]
#[command(name = "opros-sc", version)]
struct Args {
    /// Storage-service endpoint URL
    #[arg(long, env = "OPROS_ENDPOINT")]
    endpoint: Option<String>,

    /// Total delivery attempts across both strategies
    #[arg(long, default_value_t = opros_sc::retry::DEFAULT_MAX_RETRIES)]
    max_retries: u32,

    /// Delay between attempts in milliseconds
    #[arg(long, default_value_t = opros_sc::retry::DEFAULT_RETRY_DELAY_MS)]
    retry_delay_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a response from a JSON file, or the built-in demo payload
    Submit {
        /// JSON file holding { answers, feedback? }
        file: Option<PathBuf>,

        /// Submit the built-in demo payload instead of reading a file
        #[arg(long)]
        demo: bool,
    },
    /// Fetch all responses and print the aggregated summary
    Results,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let endpoint = config::resolve_endpoint(args.endpoint.as_deref());
    let policy = RetryPolicy::new(
        args.max_retries,
        time::millis_to_duration(args.retry_delay_ms),
    );
    let client = SubmitClient::new(&endpoint, policy)?;

    match args.command {
        Command::Submit { file, demo } => {
            let raw = if demo {
                demo_payload()
            } else if let Some(path) = file {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            } else {
                bail!("provide a submission file or pass --demo");
            };

            let response =
                validate(raw).map_err(|e| anyhow::anyhow!("invalid submission: {}", e))?;
            client.submit(response).await?;
            println!("Response submitted to {}", endpoint);
        }
        Command::Results => {
            let catalog = client.fetch_questions().await?;
            let envelope = client.fetch_results().await?;
            let summary = aggregate(&envelope.responses, &catalog);
            print_summary(&catalog, &summary);
        }
    }

    Ok(())
}

/// Demo payload covering all ten default questions
fn demo_payload() -> serde_json::Value {
    json!({
        "answers": {
            "question_1": "yes",
            "question_2": "no",
            "question_3": "yes",
            "question_4": "yes",
            "question_5": "no",
            "question_6": "yes",
            "question_7": "no",
            "question_8": "yes",
            "question_9": "yes",
            "question_10": "no"
        },
        "feedback": "This is a test feedback message"
    })
}

fn print_summary(catalog: &QuestionCatalog, summary: &SurveySummary) {
    println!("Total responses: {}", summary.total_count);
    println!();

    for question in &catalog.questions {
        let stats = summary
            .per_question
            .get(&question.key())
            .copied()
            .unwrap_or_default();
        println!("{}. {}", question.id, question.text_en);
        println!(
            "   yes {:>3}% ({})   no {:>3}% ({})   answers {}",
            stats.yes_percentage,
            stats.yes_count,
            stats.no_percentage,
            stats.no_count,
            stats.total_answers
        );
    }

    if !summary.feedback.is_empty() {
        println!();
        println!("Feedback ({}):", summary.feedback.len());
        for text in &summary.feedback {
            println!("  - {}", text);
        }
    }
}
