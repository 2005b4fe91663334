//! Wellbeing alert models.

use serde::Serialize;
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};
use ts_rs::TS;

/// A row from the `alerts` table.
///
/// `status` is one of the constants in `teampulse_core::alert`;
/// `notification_status` is `None` until the alert notification has been
/// claimed and dispatched.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Alert {
    pub id: DbId,
    pub user_id: DbId,
    pub team_id: DbId,
    pub club_id: DbId,
    pub alert_type: String,
    pub triggering_message: String,
    pub status: String,
    pub notification_status: Option<String>,
    pub created_at: Timestamp,
    pub acknowledged_at: Option<Timestamp>,
    pub resolved_at: Option<Timestamp>,
}

/// Fields for inserting a screening-raised alert.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub user_id: DbId,
    pub team_id: DbId,
    pub club_id: DbId,
    pub alert_type: String,
    pub triggering_message: String,
}
