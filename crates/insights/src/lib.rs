//! Client for the external insight-generation service.
//!
//! Wraps an OpenAI-compatible chat-completions API to produce structured
//! `{title, content, category}` insights from aggregated wellness data,
//! plus a screening call that classifies alarming check-in messages.
//!
//! Every public generation method is fail-soft: errors are logged at
//! warn level and surface as `None`, never as a failure of the caller.

pub mod client;
pub mod parse;
pub mod prompt;

pub use client::{InsightsClient, InsightsConfig, InsightsError};
pub use parse::Insight;
pub use prompt::TeamSnapshot;
