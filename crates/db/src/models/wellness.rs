//! Wellness check-in models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};
use ts_rs::TS;

/// A row from the `wellness_scores` table. One per player per day.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct WellnessScore {
    pub id: DbId,
    pub user_id: DbId,
    pub score_date: NaiveDate,
    pub mood: Option<i16>,
    pub stress: Option<i16>,
    pub sleep: Option<i16>,
    pub motivation: Option<i16>,
    pub energy: Option<i16>,
    pub free_text: Option<String>,
    pub injured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a daily check-in. All ratings are optional 1-5.
#[derive(Debug, Deserialize)]
pub struct SubmitCheckin {
    pub mood: Option<i16>,
    pub stress: Option<i16>,
    pub sleep: Option<i16>,
    pub motivation: Option<i16>,
    pub energy: Option<i16>,
    pub free_text: Option<String>,
    pub injured: Option<bool>,
    /// Must be today's date (UTC) when present; clients send it so a
    /// submission racing midnight fails loudly instead of landing on the
    /// wrong day.
    pub score_date: Option<NaiveDate>,
}

/// A player's check-in for a given day, joined with their display name.
///
/// Produced by the aggregation query; feeds the weekly summary math.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerDayScore {
    pub user_id: DbId,
    pub display_name: String,
    pub mood: Option<i16>,
    pub stress: Option<i16>,
    pub sleep: Option<i16>,
    pub motivation: Option<i16>,
    pub energy: Option<i16>,
    pub free_text: Option<String>,
    pub injured: bool,
}
