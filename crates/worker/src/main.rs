//! Scheduled background worker.
//!
//! Runs the nightly wellness analysis at a fixed local time and the
//! alert-notification sweep on an interval. Deploys alongside the API
//! binary; the shared job lock keeps a manual trigger and the schedule
//! from running the analysis concurrently.

mod config;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teampulse_insights::{InsightsClient, InsightsConfig};
use teampulse_jobs::{AlertSweep, AnalysisJob, DailySchedule};
use teampulse_push::{PushClient, PushConfig};

use config::WorkerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teampulse_worker=debug,teampulse_jobs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env();
    tracing::info!(
        hour = config.analysis_hour,
        minute = config.analysis_minute,
        tz = %config.schedule_tz,
        "Loaded worker configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = teampulse_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    teampulse_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    // Migrations are applied by the API binary; the worker assumes an
    // up-to-date schema.

    // --- External service clients ---
    let insights = Arc::new(InsightsClient::new(InsightsConfig::from_env()));
    let push = Arc::new(PushClient::new(PushConfig::from_env()));

    // --- Background loops ---
    let cancel = CancellationToken::new();

    let schedule = DailySchedule {
        hour: config.analysis_hour,
        minute: config.analysis_minute,
        tz: config.schedule_tz,
    };
    let analysis = AnalysisJob::new(pool.clone(), Arc::clone(&insights), Arc::clone(&push));
    let analysis_handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { analysis.run_on_schedule(schedule, cancel).await }
    });
    tracing::info!("Nightly analysis scheduler started");

    let sweep = AlertSweep::new(pool.clone(), Arc::clone(&push));
    let sweep_handle = tokio::spawn(sweep.run(cancel.clone()));
    tracing::info!("Alert notification sweep started");

    // --- Wait for termination ---
    shutdown_signal().await;

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), analysis_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the worker
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
