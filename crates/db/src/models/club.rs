//! Club entity model.

use serde::Serialize;
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};

/// A row from the `clubs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Club {
    pub id: DbId,
    pub name: String,
    pub responsible_user_id: Option<DbId>,
    pub created_at: Timestamp,
}
