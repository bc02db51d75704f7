//! Storage-service HTTP client
//!
//! Delivers responses with the primary multipart encoding, falling back to
//! the raw-JSON alternate encoding per the retry policy, and fetches the
//! results envelope and question catalogue back.

use opros_common::model::{ResultsEnvelope, SurveyResponse};
use opros_common::QuestionCatalog;
use reqwest::multipart;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::retry::{RetryPolicy, RetryState, RetryStep, Strategy};

const USER_AGENT: &str = concat!("opros-sc/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

/// Survey submission client
pub struct SubmitClient {
    http_client: reqwest::Client,
    endpoint: String,
    policy: RetryPolicy,
}

impl SubmitClient {
    pub fn new(
        endpoint: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// Deliver one response, retrying per the policy.
    ///
    /// A submission id is attached before the first attempt and reused
    /// verbatim across retries, so a retried delivery that already landed
    /// server-side is rejected as a duplicate instead of stored twice.
    pub async fn submit(&self, mut response: SurveyResponse) -> Result<(), TransportError> {
        if response.submission_id.is_none() {
            response.submission_id = Some(Uuid::new_v4().to_string());
        }
        let payload =
            serde_json::to_string(&response).map_err(|e| TransportError::Parse(e.to_string()))?;

        let mut state = RetryState::new(self.policy);
        let mut last_error = String::from("no attempts configured");

        loop {
            match state.next() {
                RetryStep::Exhausted => {
                    return Err(TransportError::Exhausted {
                        attempts: state.attempts_made(),
                        last_error,
                    });
                }
                RetryStep::Attempt {
                    number,
                    strategy,
                    delay_before,
                } => {
                    if !delay_before.is_zero() {
                        tokio::time::sleep(delay_before).await;
                    }
                    match self.attempt(strategy, &payload).await {
                        Ok(()) => {
                            tracing::info!(
                                attempt = number,
                                ?strategy,
                                "survey response delivered"
                            );
                            return Ok(());
                        }
                        Err(e) => {
                            tracing::warn!(
                                attempt = number,
                                ?strategy,
                                error = %e,
                                "delivery attempt failed"
                            );
                            last_error = e.to_string();
                        }
                    }
                }
            }
        }
    }

    /// One delivery attempt with the given wire strategy
    async fn attempt(&self, strategy: Strategy, payload: &str) -> Result<(), TransportError> {
        match strategy {
            Strategy::Primary => {
                let form = multipart::Form::new().text("data", payload.to_string());
                let response = self
                    .http_client
                    .post(self.submit_url())
                    .multipart(form)
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(TransportError::Status(status.as_u16(), text));
                }
                Ok(())
            }
            Strategy::Alternate => {
                // Opaque-response mode: the call completing is the success
                // signal; status and body are not consulted
                self.http_client
                    .post(self.submit_url())
                    .header(reqwest::header::CONTENT_TYPE, "text/plain")
                    .body(payload.to_string())
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                Ok(())
            }
        }
    }

    /// Fetch the raw results envelope, retrying per the policy
    pub async fn fetch_results(&self) -> Result<ResultsEnvelope, TransportError> {
        let mut state = RetryState::new(self.policy);
        let mut last_error = String::from("no attempts configured");

        loop {
            match state.next() {
                RetryStep::Exhausted => {
                    return Err(TransportError::Exhausted {
                        attempts: state.attempts_made(),
                        last_error,
                    });
                }
                RetryStep::Attempt { delay_before, .. } => {
                    if !delay_before.is_zero() {
                        tokio::time::sleep(delay_before).await;
                    }
                    match self.try_fetch_results().await {
                        Ok(envelope) => return Ok(envelope),
                        Err(e) => last_error = e.to_string(),
                    }
                }
            }
        }
    }

    async fn try_fetch_results(&self) -> Result<ResultsEnvelope, TransportError> {
        let response = self
            .http_client
            .get(self.results_url())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status(status.as_u16(), text));
        }

        response
            .json::<ResultsEnvelope>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }

    /// Fetch the question catalogue the service renders from
    pub async fn fetch_questions(&self) -> Result<QuestionCatalog, TransportError> {
        let response = self
            .http_client
            .get(format!("{}/api/questions", self.endpoint))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status(status.as_u16(), text));
        }

        response
            .json::<QuestionCatalog>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }

    fn submit_url(&self) -> String {
        format!("{}/api/submit", self.endpoint)
    }

    fn results_url(&self) -> String {
        format!("{}/api/results?action=getResults", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_normalized() {
        let client =
            SubmitClient::new("http://127.0.0.1:5780/", RetryPolicy::default()).unwrap();
        assert_eq!(client.submit_url(), "http://127.0.0.1:5780/api/submit");
        assert_eq!(
            client.results_url(),
            "http://127.0.0.1:5780/api/results?action=getResults"
        );
    }
}
