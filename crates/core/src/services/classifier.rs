//! HTTP client for the external sentiment classifier.
//!
//! Every call carries a per-attempt timeout derived from the journal length,
//! and only timeouts are retried (with a growing budget). Everything else
//! fails fast so callers can decide whether the failure is fatal.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use notemood_common::config::ClassifierConfig;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Total attempts per request, including the first one.
pub const MAX_ATTEMPTS: u32 = 3;

const BASE_TIMEOUT_SECS: f64 = 300.0;
const TIMEOUT_PER_CHAR_SECS: f64 = 0.1;
const RETRY_TIMEOUT_GROWTH: f64 = 1.5;

/// Request body understood by the classifier endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest {
    pub input_journal: String,
}

/// Per-aspect map of subjects to their sentiment label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AspectEntities {
    pub entities: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AspectAnalysisResponse {
    pub aspects: HashMap<String, AspectEntities>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TopicAnalysisResponse {
    pub topics: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverallSentimentResponse {
    // The classifier misspells this field on the wire.
    #[serde(rename = "overall_seniment")]
    pub overall_sentiment: String,
}

/// Typed failure of a classification call. Never folded into `AppError`
/// directly; each pipeline decides how severe the failure is.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationError {
    #[error("classifier rejected the request with status {status_code}")]
    Rejected { status_code: u16 },
    #[error("classifier timed out after {retries} attempts: {detail}")]
    TimedOut { retries: u32, detail: String },
    #[error("classifier request failed: {detail}")]
    Transport { detail: String },
    #[error("could not decode classifier response: {detail}")]
    Decode { detail: String },
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
}

/// Seam between the retry policy and the actual HTTP stack, so the
/// client can be exercised with a scripted transport in tests.
#[async_trait]
pub trait ClassifierTransport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        bearer_token: &str,
        body: &ClassifyRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[async_trait]
impl ClassifierTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        bearer_token: &str,
        body: &ClassifyRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(bearer_token)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(e.to_string())
                } else {
                    TransportError::Other(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// Timeout for one attempt, scaled by journal length and attempt number
/// (zero-based). Longer journals get more time; retries get 1.5x more
/// than the attempt before.
#[must_use]
pub fn attempt_timeout(content_len: usize, attempt: u32) -> Duration {
    let base = BASE_TIMEOUT_SECS + content_len as f64 * TIMEOUT_PER_CHAR_SECS;
    Duration::from_secs_f64(base * RETRY_TIMEOUT_GROWTH.powi(attempt as i32))
}

#[derive(Clone)]
pub struct ClassifierClient {
    config: ClassifierConfig,
    transport: Arc<dyn ClassifierTransport>,
}

impl ClassifierClient {
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::default()))
    }

    #[must_use]
    pub fn with_transport(config: ClassifierConfig, transport: Arc<dyn ClassifierTransport>) -> Self {
        Self { config, transport }
    }

    pub async fn aspects(&self, content: &str) -> Result<AspectAnalysisResponse, ClassificationError> {
        let path = self.config.aspect_path.clone();
        self.classify(content, &path).await
    }

    pub async fn topics(&self, content: &str) -> Result<TopicAnalysisResponse, ClassificationError> {
        let path = self.config.topic_path.clone();
        self.classify(content, &path).await
    }

    pub async fn overall_sentiment(
        &self,
        content: &str,
    ) -> Result<OverallSentimentResponse, ClassificationError> {
        let path = self.config.overall_path.clone();
        self.classify(content, &path).await
    }

    /// POST the journal to the given classifier path and decode the body.
    pub async fn classify<T: DeserializeOwned>(
        &self,
        content: &str,
        path: &str,
    ) -> Result<T, ClassificationError> {
        let url = format!("{}/{}", self.config.url.trim_end_matches('/'), path);
        let request = ClassifyRequest {
            input_journal: content.to_owned(),
        };

        let mut attempt = 0;
        loop {
            let timeout = attempt_timeout(content.len(), attempt);
            let result = self
                .transport
                .post(&url, &self.config.bearer_token, &request, timeout)
                .await;

            match result {
                Ok(response) if response.status == 200 => {
                    return serde_json::from_str(&response.body)
                        .map_err(|e| ClassificationError::Decode { detail: e.to_string() });
                }
                Ok(response) => {
                    warn!(url = %url, status = response.status, "classifier rejected request");
                    return Err(ClassificationError::Rejected {
                        status_code: response.status,
                    });
                }
                Err(TransportError::Timeout(detail)) => {
                    attempt += 1;
                    if attempt >= MAX_ATTEMPTS {
                        warn!(url = %url, retries = attempt, "classifier timed out on final attempt");
                        return Err(ClassificationError::TimedOut {
                            retries: attempt,
                            detail,
                        });
                    }
                    debug!(url = %url, attempt, "classifier timed out, retrying with larger budget");
                }
                Err(TransportError::Other(detail)) => {
                    warn!(url = %url, error = %detail, "classifier request failed");
                    return Err(ClassificationError::Transport { detail });
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct ScriptedTransport {
        responses: Mutex<Vec<Result<TransportResponse, TransportError>>>,
        calls: Mutex<Vec<Duration>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<TransportResponse, TransportError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn timeouts(&self) -> Vec<Duration> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ClassifierTransport for ScriptedTransport {
        async fn post(
            &self,
            _url: &str,
            _bearer_token: &str,
            _body: &ClassifyRequest,
            timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.lock().unwrap().push(timeout);
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn client(transport: Arc<ScriptedTransport>) -> ClassifierClient {
        let config = ClassifierConfig {
            url: "http://classifier.test".to_owned(),
            bearer_token: "secret".to_owned(),
            ..ClassifierConfig::default()
        };
        ClassifierClient::with_transport(config, transport)
    }

    fn ok(body: &str) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse {
            status: 200,
            body: body.to_owned(),
        })
    }

    #[test]
    fn timeouts_scale_with_length_and_attempt() {
        assert_eq!(attempt_timeout(0, 0), Duration::from_secs_f64(300.0));
        assert_eq!(attempt_timeout(100, 0), Duration::from_secs_f64(310.0));
        assert_eq!(attempt_timeout(0, 1), Duration::from_secs_f64(450.0));
        assert_eq!(attempt_timeout(0, 2), Duration::from_secs_f64(675.0));
    }

    #[tokio::test]
    async fn decodes_successful_response() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(
            r#"{"overall_seniment":"Positive"}"#,
        )]));
        let client = client(Arc::clone(&transport));

        let response = client.overall_sentiment("a fine day").await.unwrap();

        assert_eq!(response.overall_sentiment, "Positive");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn retries_timeouts_with_growing_budget() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(TransportError::Timeout("slow".to_owned())),
            Err(TransportError::Timeout("slow".to_owned())),
            ok(r#"{"topics":{"Work":"Negative"}}"#),
        ]));
        let client = client(Arc::clone(&transport));

        let response = client.topics("").await.unwrap();

        assert_eq!(response.topics["Work"], "Negative");
        let timeouts = transport.timeouts();
        assert_eq!(timeouts.len(), 3);
        assert!(timeouts[1] > timeouts[0]);
        assert!(timeouts[2] > timeouts[1]);
    }

    #[tokio::test]
    async fn gives_up_after_three_timeouts() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(TransportError::Timeout("slow".to_owned())),
            Err(TransportError::Timeout("slow".to_owned())),
            Err(TransportError::Timeout("slow".to_owned())),
        ]));
        let client = client(Arc::clone(&transport));

        let err = client.topics("").await.unwrap_err();

        assert_eq!(
            err,
            ClassificationError::TimedOut {
                retries: 3,
                detail: "slow".to_owned()
            }
        );
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn rejection_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(TransportResponse {
            status: 503,
            body: String::new(),
        })]));
        let client = client(Arc::clone(&transport));

        let err = client.topics("").await.unwrap_err();

        assert_eq!(err, ClassificationError::Rejected { status_code: 503 });
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn connection_failure_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(TransportError::Other(
            "connection refused".to_owned(),
        ))]));
        let client = client(Arc::clone(&transport));

        let err = client.topics("").await.unwrap_err();

        assert!(matches!(err, ClassificationError::Transport { .. }));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("not json")]));
        let client = client(transport);

        let err = client.topics("").await.unwrap_err();

        assert!(matches!(err, ClassificationError::Decode { .. }));
    }
}
