//! Repository for the `job_locks` table.

use chrono::Utc;
use sqlx::PgPool;
use teampulse_core::lock::{self, LockDecision};
use teampulse_core::types::Timestamp;

use crate::models::job_lock::JobLock;

/// Provides acquire/release operations for singleton job locks.
pub struct JobLockRepo;

impl JobLockRepo {
    /// Try to take the named lock. Returns `true` when this caller now
    /// holds it.
    ///
    /// The existing row is read under `FOR UPDATE` and judged with
    /// [`lock::evaluate`]: a missing row is acquired, a stale row is
    /// stolen, a fresh row is refused. Two instances racing on a missing
    /// row are serialized by the `ON CONFLICT DO NOTHING` insert, so at
    /// most one of them wins.
    pub async fn try_acquire(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let existing: Option<Timestamp> =
            sqlx::query_scalar("SELECT locked_at FROM job_locks WHERE name = $1 FOR UPDATE")
                .bind(name)
                .fetch_optional(&mut *tx)
                .await?;

        match lock::evaluate(existing, Utc::now()) {
            LockDecision::Refuse => {
                tracing::debug!(lock = name, locked_at = ?existing, "lock held and fresh, refusing");
                tx.rollback().await?;
                Ok(false)
            }
            LockDecision::Acquire => {
                let inserted: Option<String> = sqlx::query_scalar(
                    "INSERT INTO job_locks (name) VALUES ($1) \
                     ON CONFLICT (name) DO NOTHING \
                     RETURNING name",
                )
                .bind(name)
                .fetch_optional(&mut *tx)
                .await?;
                tx.commit().await?;
                Ok(inserted.is_some())
            }
            LockDecision::Steal => {
                tracing::warn!(lock = name, locked_at = ?existing, "stealing stale lock");
                sqlx::query("UPDATE job_locks SET locked_at = NOW() WHERE name = $1")
                    .bind(name)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(true)
            }
        }
    }

    /// Release the named lock. Returns `true` if a row was removed.
    pub async fn release(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM job_locks WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all held locks.
    pub async fn list(pool: &PgPool) -> Result<Vec<JobLock>, sqlx::Error> {
        sqlx::query_as::<_, JobLock>(
            "SELECT name, locked_at FROM job_locks ORDER BY locked_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}
