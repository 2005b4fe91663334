//! HTTP client for the multicast push endpoint.

use std::time::Duration;

use serde::Deserialize;
use teampulse_core::push::PushMessage;
use uuid::Uuid;

use crate::payload;

/// HTTP request timeout for a single multicast send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for the push provider.
///
/// | Variable          | Default                                 |
/// |-------------------|-----------------------------------------|
/// | `PUSH_API_URL`    | `https://fcm.googleapis.com/fcm/send`   |
/// | `PUSH_SERVER_KEY` | required                                |
#[derive(Debug, Clone)]
pub struct PushConfig {
    pub api_url: String,
    pub server_key: String,
}

impl PushConfig {
    /// Load the configuration from environment variables.
    ///
    /// Panics when `PUSH_SERVER_KEY` is missing.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("PUSH_API_URL")
                .unwrap_or_else(|_| "https://fcm.googleapis.com/fcm/send".into()),
            server_key: std::env::var("PUSH_SERVER_KEY").expect("PUSH_SERVER_KEY must be set"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Provider response for a multicast send.
#[derive(Debug, Deserialize)]
struct MulticastResponse {
    #[serde(default)]
    success: usize,
    #[serde(default)]
    failure: usize,
    #[serde(default)]
    results: Vec<TokenResult>,
}

/// Per-token delivery result inside a [`MulticastResponse`].
#[derive(Debug, Deserialize)]
struct TokenResult {
    #[serde(default)]
    error: Option<String>,
}

/// Counts from one multicast send.
#[derive(Debug, Clone, Copy, Default)]
pub struct MulticastOutcome {
    pub success: usize,
    pub failure: usize,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the push provider boundary.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("push provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the push provider's multicast endpoint.
pub struct PushClient {
    client: reqwest::Client,
    config: PushConfig,
}

impl PushClient {
    /// Create a client with a pre-configured HTTP client.
    pub fn new(config: PushConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Send one payload to every token in a single provider call.
    ///
    /// Per-token failures reported by the provider are logged and counted
    /// but not retried; dead tokens stay registered.
    pub async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<MulticastOutcome, PushError> {
        let dispatch_id = Uuid::new_v4();
        let body = payload::build(tokens, message);

        tracing::debug!(
            %dispatch_id,
            tokens = tokens.len(),
            title = %message.title,
            "sending multicast push"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("key={}", self.config.server_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PushError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MulticastResponse = response.json().await?;
        for (token, result) in tokens.iter().zip(parsed.results.iter()) {
            if let Some(error) = &result.error {
                tracing::warn!(%dispatch_id, token, error, "push delivery failed for token");
            }
        }

        Ok(MulticastOutcome {
            success: parsed.success,
            failure: parsed.failure,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PushConfig {
        PushConfig {
            api_url: "http://localhost:1".to_string(),
            server_key: "test-key".to_string(),
        }
    }

    #[test]
    fn new_does_not_panic() {
        let _client = PushClient::new(test_config());
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = PushError::Api {
            status: 401,
            body: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "push provider error (401): bad key");
    }

    #[test]
    fn multicast_response_parses_partial_failures() {
        let json = r#"{"success":1,"failure":1,"results":[{"message_id":"m1"},{"error":"NotRegistered"}]}"#;
        let parsed: MulticastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.success, 1);
        assert_eq!(parsed.failure, 1);
        assert_eq!(parsed.results[1].error.as_deref(), Some("NotRegistered"));
    }

    #[test]
    fn multicast_response_tolerates_missing_fields() {
        let parsed: MulticastResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.success, 0);
        assert_eq!(parsed.failure, 0);
        assert!(parsed.results.is_empty());
    }
}
