//! MyMemory public translation API client.
//! Single GET per attempt (at-most-once, no retry), connection pooling via
//! reqwest. The translated text lives at `responseData.translatedText`; a
//! response without that shape is a soft failure, not a crash.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ServiceFault, TranslateRequest, TranslationBackend, TranslationOutcome};

const DEFAULT_BASE_URL: &str = "https://api.mymemory.translated.net";

/// HTTP client for the MyMemory `/get` endpoint.
pub struct MyMemoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl MyMemoryClient {
    /// Create a client with pooled connections and a request timeout.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.into(),
        })
    }

    /// Override the endpoint base URL (local stub servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TranslationBackend for MyMemoryClient {
    async fn translate(&self, request: &TranslateRequest) -> TranslationOutcome {
        if request.text.trim().is_empty() {
            return TranslationOutcome::EmptyInput;
        }

        let pair = request.pair_code();
        let result = self
            .http
            .get(format!("{}/get", self.base_url))
            .query(&[("q", request.text.as_str()), ("langpair", pair.as_str())])
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) => {
                warn!(request_id = %request.request_id, error = %e, "translation transport failed");
                return TranslationOutcome::ServiceError {
                    fault: ServiceFault::Connection,
                };
            }
        };

        match response.json::<MyMemoryResponse>().await {
            Ok(payload) => {
                let outcome = outcome_from_payload(payload);
                debug!(
                    request_id = %request.request_id,
                    pair = %pair,
                    ok = matches!(outcome, TranslationOutcome::Success { .. }),
                    "translation response"
                );
                outcome
            }
            Err(e) => {
                warn!(request_id = %request.request_id, error = %e, "malformed translation response");
                TranslationOutcome::ServiceError {
                    fault: ServiceFault::Connection,
                }
            }
        }
    }
}

/// Map a decoded payload to an outcome. Missing `responseData.translatedText`
/// means the service is overloaded or rejected the request.
fn outcome_from_payload(payload: MyMemoryResponse) -> TranslationOutcome {
    match payload.response_data.and_then(|d| d.translated_text) {
        Some(text) if !text.is_empty() => TranslationOutcome::Success { text },
        _ => TranslationOutcome::ServiceError {
            fault: ServiceFault::Busy,
        },
    }
}

// --- Response shape ---

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    #[tokio::test]
    async fn empty_input_short_circuits_without_network() {
        // Unroutable base URL proves no request is issued.
        let client = MyMemoryClient::new()
            .expect("client build")
            .with_base_url("http://127.0.0.1:0");
        let request = TranslateRequest::new("   ", Language::English, Language::Tamil);
        assert_eq!(client.translate(&request).await, TranslationOutcome::EmptyInput);
    }

    #[test]
    fn payload_with_translated_text_is_success() {
        let payload: MyMemoryResponse = serde_json::from_str(
            r#"{"responseData":{"translatedText":"வணக்கம்"},"responseStatus":200}"#,
        )
        .expect("decode");
        assert_eq!(
            outcome_from_payload(payload),
            TranslationOutcome::Success {
                text: "வணக்கம்".into()
            }
        );
    }

    #[test]
    fn payload_missing_shape_is_busy() {
        for body in [
            r#"{}"#,
            r#"{"responseData":null}"#,
            r#"{"responseData":{}}"#,
            r#"{"responseData":{"translatedText":""}}"#,
        ] {
            let payload: MyMemoryResponse = serde_json::from_str(body).expect("decode");
            assert_eq!(
                outcome_from_payload(payload),
                TranslationOutcome::ServiceError {
                    fault: ServiceFault::Busy
                },
                "body: {body}"
            );
        }
    }
}
