//! Generated insight feed models.

use serde::Serialize;
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};
use ts_rs::TS;

/// A row from the `staff_updates` table. Visible to a team's staff.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct StaffUpdate {
    pub id: DbId,
    pub team_id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: Timestamp,
}

/// A row from the `club_updates` table. Visible to the club responsible.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct ClubUpdate {
    pub id: DbId,
    pub club_id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: Timestamp,
}

/// A row from the `player_updates` table. Visible to the player it targets.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct PlayerUpdate {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: Timestamp,
}
