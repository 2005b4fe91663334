//! Fail-closed wrappers around the job-lock repository.
//!
//! A scheduled job must never run twice concurrently, so any doubt about
//! the lock's state is resolved by *not* running: a database error during
//! acquisition reads as "lock held". Release failures only cost up to the
//! staleness window (the next run steals the abandoned row), so they are
//! logged and swallowed.

use sqlx::PgPool;
use teampulse_db::repositories::JobLockRepo;

/// Lock name guarding the nightly analysis job.
pub const NIGHTLY_ANALYSIS: &str = "nightly-analysis";

/// Try to take the named lock, treating any error as "not acquired".
pub async fn acquire(pool: &PgPool, name: &str) -> bool {
    match JobLockRepo::try_acquire(pool, name).await {
        Ok(acquired) => acquired,
        Err(e) => {
            tracing::warn!(lock = name, error = %e, "lock acquisition failed, treating as held");
            false
        }
    }
}

/// Release the named lock after a successful run.
///
/// A run that crashed before this point leaves its row behind; the
/// staleness takeover in the repository covers that case.
pub async fn release(pool: &PgPool, name: &str) {
    match JobLockRepo::release(pool, name).await {
        Ok(true) => tracing::debug!(lock = name, "lock released"),
        Ok(false) => tracing::warn!(lock = name, "lock row already gone at release"),
        Err(e) => tracing::warn!(lock = name, error = %e, "lock release failed"),
    }
}
