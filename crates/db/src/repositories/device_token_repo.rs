//! Repository for the `device_tokens` table.

use sqlx::PgPool;
use teampulse_core::types::DbId;

use crate::models::device_token::DeviceToken;

/// Column list for `device_tokens` queries.
const COLUMNS: &str = "user_id, token, created_at, refreshed_at";

/// Provides CRUD operations for push registration tokens.
pub struct DeviceTokenRepo;

impl DeviceTokenRepo {
    /// Register a device token for a user, refreshing it if already known.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        token: &str,
    ) -> Result<DeviceToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO device_tokens (user_id, token) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, token) DO UPDATE \
             SET refreshed_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceToken>(&query)
            .bind(user_id)
            .bind(token)
            .fetch_one(pool)
            .await
    }

    /// List the token strings registered for a user.
    pub async fn tokens_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT token FROM device_tokens \
             WHERE user_id = $1 \
             ORDER BY refreshed_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
