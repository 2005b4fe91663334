//! Background job lock model.

use serde::Serialize;
use sqlx::FromRow;
use teampulse_core::types::Timestamp;

/// A row from the `job_locks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobLock {
    pub name: String,
    pub locked_at: Timestamp,
}
