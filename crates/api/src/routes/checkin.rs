//! Route definitions for the `/checkins` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::checkin;
use crate::state::AppState;

/// Routes mounted at `/checkins`.
///
/// ```text
/// POST   /    -> submit_checkin (player only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(checkin::submit_checkin))
}
