//! Repository for the `alerts` table.

use sqlx::PgPool;
use teampulse_core::alert::{self, NOTIFICATION_SENT};
use teampulse_core::types::DbId;

use crate::models::alert::{Alert, NewAlert};

/// Column list for `alerts` queries.
const COLUMNS: &str = "id, user_id, team_id, club_id, alert_type, triggering_message, \
    status, notification_status, created_at, acknowledged_at, resolved_at";

/// Outcome of attempting to claim an alert for notification dispatch.
#[derive(Debug)]
pub enum ClaimOutcome {
    /// This caller won the claim and must deliver the notification.
    Claimed(Alert),
    /// Another caller already claimed the alert.
    AlreadySent,
    /// No alert exists with the given ID.
    NotFound,
}

/// Provides CRUD operations for wellbeing alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new alert raised by check-in screening.
    pub async fn create(pool: &PgPool, input: &NewAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (user_id, team_id, club_id, alert_type, triggering_message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(input.user_id)
            .bind(input.team_id)
            .bind(input.club_id)
            .bind(&input.alert_type)
            .bind(&input.triggering_message)
            .fetch_one(pool)
            .await
    }

    /// Fetch an alert by ID.
    pub async fn get(pool: &PgPool, alert_id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .fetch_optional(pool)
            .await
    }

    /// List a team's alerts, newest first.
    pub async fn list_for_team(
        pool: &PgPool,
        team_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE team_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(team_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a club's alerts across all its teams, newest first.
    pub async fn list_for_club(
        pool: &PgPool,
        club_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE club_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(club_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Move an alert from `from_status` to `new_status`.
    ///
    /// The update is conditional on the row still being in `from_status`,
    /// so a concurrent transition loses cleanly and gets `None` back.
    /// Stamps `acknowledged_at` / `resolved_at` to match the new status.
    pub async fn set_status(
        pool: &PgPool,
        alert_id: DbId,
        from_status: &str,
        new_status: &str,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts \
             SET status = $3, \
                 acknowledged_at = CASE WHEN $3 = '{ack}' THEN NOW() ELSE acknowledged_at END, \
                 resolved_at = CASE WHEN $3 = '{res}' THEN NOW() ELSE resolved_at END \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}",
            ack = alert::STATUS_ACKNOWLEDGED,
            res = alert::STATUS_RESOLVED,
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .bind(from_status)
            .bind(new_status)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim an alert for notification dispatch.
    ///
    /// The conditional `UPDATE ... WHERE notification_status IS NULL`
    /// guarantees exactly one caller per alert gets `Claimed` back, no
    /// matter how many workers race on it.
    pub async fn claim_notification(
        pool: &PgPool,
        alert_id: DbId,
    ) -> Result<ClaimOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE alerts \
             SET notification_status = $2 \
             WHERE id = $1 AND notification_status IS NULL \
             RETURNING {COLUMNS}"
        );
        if let Some(alert) = sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .bind(NOTIFICATION_SENT)
            .fetch_optional(pool)
            .await?
        {
            return Ok(ClaimOutcome::Claimed(alert));
        }
        // Lost the claim or the alert never existed; tell the caller which.
        let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM alerts WHERE id = $1")
            .bind(alert_id)
            .fetch_optional(pool)
            .await?;
        Ok(if exists.is_some() {
            ClaimOutcome::AlreadySent
        } else {
            ClaimOutcome::NotFound
        })
    }

    /// List alerts whose notification was never claimed, oldest first.
    ///
    /// Only returns alerts older than `min_age_secs` so the sweep does not
    /// race the in-process notifier on freshly created rows.
    pub async fn list_unsent_older_than(
        pool: &PgPool,
        min_age_secs: f64,
        limit: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE notification_status IS NULL \
               AND created_at < NOW() - make_interval(secs => $1) \
             ORDER BY created_at ASC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(min_age_secs)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Delete every alert. Returns the number of rows removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alerts").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
