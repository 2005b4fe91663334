pub mod admin;
pub mod alert;
pub mod checkin;
pub mod device_token;
pub mod feed;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /checkins                                    submit today's check-in (player)
///
/// /users/{id}/device-tokens                    register push token (self or admin)
///
/// /alerts                                      list alerts in the caller's scope
/// /alerts/{id}/acknowledge                     acknowledge (staff scope)
/// /alerts/{id}/resolve                         resolve (staff scope)
///
/// /teams/{id}/summaries                        recent weekly summaries
/// /teams/{id}/summaries/{week_key}             one week's summary
/// /teams/{id}/staff-updates                    staff insight feed
/// /clubs/{id}/updates                          club insight feed
/// /me/updates                                  caller's personal insight feed
///
/// /admin/jobs/nightly-analysis/run             trigger the analysis (admin)
/// /admin/jobs/locks                            inspect job locks (admin)
/// /admin/cleanup/alerts                        purge alerts (admin, non-prod)
/// /admin/cleanup/updates                       purge update feeds (admin, non-prod)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Daily wellness check-ins.
        .nest("/checkins", checkin::router())
        // Push registration tokens, nested under the user resource.
        .nest("/users", device_token::router())
        // Wellbeing alerts and their workflow.
        .nest("/alerts", alert::router())
        // Generated summaries and insight feeds.
        .nest("/teams", feed::team_router())
        .nest("/clubs", feed::club_router())
        .nest("/me", feed::me_router())
        // Admin tooling: job trigger, lock inspection, cleanup.
        .nest("/admin", admin::router())
}
