//! Handlers for the `/admin` tooling surface.
//!
//! The manual job trigger surfaces failures verbatim: an admin running
//! the analysis by hand is debugging, not browsing.

use axum::extract::State;
use axum::Json;

use teampulse_core::error::CoreError;
use teampulse_db::models::job_lock::JobLock;
use teampulse_db::repositories::JobLockRepo;
use teampulse_events::{kinds, DomainEvent};
use teampulse_jobs::cleanup::{self, UpdatePurge};
use teampulse_jobs::{AnalysisJob, AnalysisOutcome};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/jobs/nightly-analysis/run
///
/// Run the nightly analysis now, guarded by the same job lock the
/// scheduled run uses. Returns the run's report counts, or a `skipped`
/// outcome when another run holds the lock.
pub async fn run_nightly_analysis(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AnalysisOutcome>>> {
    tracing::info!(admin_id = auth.user_id, "manual nightly analysis triggered");

    let job = AnalysisJob::new(
        state.pool.clone(),
        state.insights.clone(),
        state.push.clone(),
    );
    let outcome = job.run().await.map_err(|e| AppError::Job(e.to_string()))?;

    if let AnalysisOutcome::Completed { report } = &outcome {
        state.event_bus.publish(
            DomainEvent::new(kinds::ANALYSIS_COMPLETED)
                .with_actor(auth.user_id)
                .with_payload(serde_json::to_value(report).unwrap_or_default()),
        );
    }

    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/admin/jobs/locks
///
/// List currently held job locks with their acquisition times.
pub async fn list_job_locks(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<JobLock>>>> {
    let locks = JobLockRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: locks }))
}

/// POST /api/v1/admin/cleanup/alerts
///
/// Delete every alert. Refused in production.
pub async fn cleanup_alerts(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    ensure_not_production(&state)?;
    tracing::warn!(admin_id = auth.user_id, "admin requested alert purge");

    let deleted = cleanup::purge_alerts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": deleted }),
    }))
}

/// POST /api/v1/admin/cleanup/updates
///
/// Delete every generated update across all three feeds. Refused in
/// production.
pub async fn cleanup_updates(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UpdatePurge>>> {
    ensure_not_production(&state)?;
    tracing::warn!(admin_id = auth.user_id, "admin requested update purge");

    let purge = cleanup::purge_updates(&state.pool).await?;
    Ok(Json(DataResponse { data: purge }))
}

/// The cleanup routes exist for demo and test environments only.
///
/// This is an environment gate, not an authorization boundary; the routes
/// already require the admin role.
fn ensure_not_production(state: &AppState) -> Result<(), AppError> {
    if state.config.is_production() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cleanup endpoints are disabled in production".into(),
        )));
    }
    Ok(())
}
