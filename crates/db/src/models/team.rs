//! Team entity model.

use serde::Serialize;
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub club_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
