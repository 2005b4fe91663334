//! Push registration token models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teampulse_core::types::{DbId, Timestamp};

/// A row from the `device_tokens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceToken {
    pub user_id: DbId,
    pub token: String,
    pub created_at: Timestamp,
    pub refreshed_at: Timestamp,
}

/// DTO for registering (or refreshing) a device token.
#[derive(Debug, Deserialize)]
pub struct RegisterDeviceToken {
    pub token: String,
}
