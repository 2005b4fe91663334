//! Route definitions for the `/alerts` resource.
//!
//! All endpoints require authentication; scope is enforced per handler
//! against the caller's team or club.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET    /                      -> list_alerts
/// POST   /{id}/acknowledge      -> acknowledge_alert
/// POST   /{id}/resolve          -> resolve_alert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alert::list_alerts))
        .route("/{id}/acknowledge", post(alert::acknowledge_alert))
        .route("/{id}/resolve", post(alert::resolve_alert))
}
