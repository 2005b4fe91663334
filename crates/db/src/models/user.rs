//! User entity model.

use serde::Serialize;
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `role` holds one of the constants in `teampulse_core::roles`. Players
/// belong to a team, staff to a team, club responsibles to a club.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    pub role: String,
    pub club_id: Option<DbId>,
    pub team_id: Option<DbId>,
    pub created_at: Timestamp,
}
