//! HTTP client for the OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use teampulse_core::aggregate::{PlayerScores, TeamAverages};
use teampulse_core::alert::AlertType;
use teampulse_core::update::InsightScope;

use crate::parse::{self, Insight};
use crate::prompt::{self, TeamSnapshot};

/// HTTP request timeout for a single generation call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for the generation service.
///
/// | Variable           | Default                     |
/// |--------------------|-----------------------------|
/// | `INSIGHTS_API_URL` | `https://api.openai.com/v1` |
/// | `INSIGHTS_API_KEY` | required                    |
/// | `INSIGHTS_MODEL`   | `gpt-4o-mini`               |
#[derive(Debug, Clone)]
pub struct InsightsConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl InsightsConfig {
    /// Load the configuration from environment variables.
    ///
    /// Panics when `INSIGHTS_API_KEY` is missing; generation is not an
    /// optional subsystem.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("INSIGHTS_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            api_key: std::env::var("INSIGHTS_API_KEY").expect("INSIGHTS_API_KEY must be set"),
            model: std::env::var("INSIGHTS_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the generation service boundary.
#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("generation service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered but with no usable message content.
    #[error("generation service returned an empty response")]
    EmptyResponse,

    /// The message content failed validation.
    #[error(transparent)]
    Parse(#[from] parse::ParseError),
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the external insight-generation service.
///
/// All public generation methods are fail-soft: any error is logged at
/// warn level and collapses to `None` so a bad generation call never
/// fails the surrounding job or request.
pub struct InsightsClient {
    client: reqwest::Client,
    config: InsightsConfig,
}

impl InsightsClient {
    /// Create a client with a pre-configured HTTP client.
    pub fn new(config: InsightsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Generate a team-scope insight from the day's aggregates.
    pub async fn team_insight(
        &self,
        team_name: &str,
        averages: &TeamAverages,
        player_count: usize,
    ) -> Option<Insight> {
        let user = prompt::team_user_prompt(team_name, averages, player_count);
        match self.generate(InsightScope::Team, &user).await {
            Ok(insight) => Some(insight),
            Err(e) => {
                tracing::warn!(team = team_name, error = %e, "team insight generation failed");
                None
            }
        }
    }

    /// Generate a club-scope insight from the club's team summaries.
    pub async fn club_insight(&self, club_name: &str, teams: &[TeamSnapshot]) -> Option<Insight> {
        let user = prompt::club_user_prompt(club_name, teams);
        match self.generate(InsightScope::Club, &user).await {
            Ok(insight) => Some(insight),
            Err(e) => {
                tracing::warn!(club = club_name, error = %e, "club insight generation failed");
                None
            }
        }
    }

    /// Generate a personal insight comparing a player to their team.
    pub async fn player_insight(
        &self,
        player_name: &str,
        scores: &PlayerScores,
        team_averages: &TeamAverages,
    ) -> Option<Insight> {
        let user = prompt::player_user_prompt(player_name, scores, team_averages);
        match self.generate(InsightScope::Player, &user).await {
            Ok(insight) => Some(insight),
            Err(e) => {
                tracing::warn!(player = player_name, error = %e, "player insight generation failed");
                None
            }
        }
    }

    /// Classify a check-in message; `Some` means an alert should be raised.
    ///
    /// Errors are logged and mean "no alert", the same as a clean answer.
    pub async fn screen_message(&self, message: &str) -> Option<AlertType> {
        match self
            .chat(prompt::SCREENING_SYSTEM, &prompt::screening_user(message))
            .await
        {
            Ok(raw) => parse::parse_screening(&raw),
            Err(e) => {
                tracing::warn!(error = %e, "check-in screening failed");
                None
            }
        }
    }

    /// Run one generation call and validate the structured answer.
    async fn generate(
        &self,
        scope: InsightScope,
        user_prompt: &str,
    ) -> Result<Insight, InsightsError> {
        let raw = self.chat(&prompt::system_prompt(scope), user_prompt).await?;
        Ok(parse::parse_insight(&raw, scope)?)
    }

    /// Send one chat-completions request and return the answer text.
    async fn chat(&self, system: &str, user: &str) -> Result<String, InsightsError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InsightsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(InsightsError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> InsightsConfig {
        InsightsConfig {
            api_url: "http://localhost:1".to_string(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
        }
    }

    #[test]
    fn new_does_not_panic() {
        let _client = InsightsClient::new(test_config());
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = InsightsError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "generation service error (429): rate limited"
        );
    }

    #[test]
    fn empty_response_error_display() {
        assert_eq!(
            InsightsError::EmptyResponse.to_string(),
            "generation service returned an empty response"
        );
    }

    #[test]
    fn chat_request_serializes_role_and_content() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "system",
                content: "hello",
            }],
            temperature: 0.7,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn chat_response_parses_first_choice_content() {
        let json = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"hi"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hi"));
    }
}
