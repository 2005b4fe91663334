//! Weekly team summary model.

use serde::Serialize;
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};
use ts_rs::TS;

/// A row from the `team_summaries` table.
///
/// Averages are `None` when no player rated that field during the run.
/// `common_topics` is a JSON array of lowercased topic words.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct TeamSummary {
    pub id: DbId,
    pub team_id: DbId,
    pub week_key: String,
    pub average_mood: Option<f64>,
    pub average_stress: Option<f64>,
    pub average_sleep: Option<f64>,
    pub average_motivation: Option<f64>,
    pub average_energy: Option<f64>,
    pub injury_count: i32,
    pub common_topics: serde_json::Value,
    pub player_count: i32,
    pub generated_at: Timestamp,
}
