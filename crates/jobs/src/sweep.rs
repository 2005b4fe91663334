//! Periodic sweep for unsent alert notifications.
//!
//! The in-process notifier misses alerts when the API restarts between
//! insert and delivery, or when the broadcast channel lags. This loop
//! re-drives those through the same claim-then-send path, so delivery
//! stays at-most-once even with the sweep and the notifier racing.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use teampulse_db::repositories::AlertRepo;
use teampulse_push::PushClient;

use crate::alert_notifier::{notify_alert, NotifyOutcome};

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Alerts younger than this are left to the in-process notifier.
const MIN_ALERT_AGE_SECS: f64 = 60.0;

/// Upper bound on alerts handled per pass.
const SWEEP_BATCH_SIZE: i64 = 50;

/// Background loop that delivers alerts the event path missed.
pub struct AlertSweep {
    pool: PgPool,
    push: Arc<PushClient>,
}

impl AlertSweep {
    pub fn new(pool: PgPool, push: Arc<PushClient>) -> Self {
        Self { pool, push }
    }

    /// Run the sweep loop until `cancel` is triggered.
    ///
    /// The first pass fires immediately, catching alerts stranded by a
    /// restart.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = SWEEP_INTERVAL.as_secs(),
            min_age_secs = MIN_ALERT_AGE_SECS,
            "unsent alert sweep started"
        );

        let mut interval = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("unsent alert sweep stopping");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::error!(error = %e, "unsent alert sweep pass failed");
                    }
                }
            }
        }
    }

    /// One sweep pass over the unsent backlog.
    async fn sweep_once(&self) -> Result<(), sqlx::Error> {
        let stale =
            AlertRepo::list_unsent_older_than(&self.pool, MIN_ALERT_AGE_SECS, SWEEP_BATCH_SIZE)
                .await?;
        if stale.is_empty() {
            tracing::debug!("no unsent alerts to sweep");
            return Ok(());
        }

        let mut sent = 0usize;
        for alert in &stale {
            match notify_alert(&self.pool, &self.push, alert.id).await {
                Ok(NotifyOutcome::Sent { .. }) => sent += 1,
                // Someone else got there first between the list and the claim.
                Ok(NotifyOutcome::AlreadySent) | Ok(NotifyOutcome::Missing) => {}
                Err(e) => {
                    tracing::error!(alert_id = alert.id, error = %e, "sweep delivery failed");
                }
            }
        }
        tracing::info!(backlog = stale.len(), sent, "unsent alert sweep pass done");
        Ok(())
    }
}
