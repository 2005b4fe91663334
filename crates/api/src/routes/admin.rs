//! Route definitions for the `/admin` tooling surface.
//!
//! All endpoints require the admin role. The cleanup endpoints are
//! additionally refused in the production environment.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /jobs/nightly-analysis/run    -> run_nightly_analysis
/// GET    /jobs/locks                   -> list_job_locks
/// POST   /cleanup/alerts               -> cleanup_alerts
/// POST   /cleanup/updates              -> cleanup_updates
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs/nightly-analysis/run",
            post(admin::run_nightly_analysis),
        )
        .route("/jobs/locks", get(admin::list_job_locks))
        .route("/cleanup/alerts", post(admin::cleanup_alerts))
        .route("/cleanup/updates", post(admin::cleanup_updates))
}
