//! Route definitions for generated summaries and insight feeds.

use axum::routing::get;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET    /{id}/summaries              -> list_team_summaries
/// GET    /{id}/summaries/{week_key}   -> team_summary_for_week
/// GET    /{id}/staff-updates          -> list_staff_updates
/// ```
pub fn team_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/summaries", get(feed::list_team_summaries))
        .route("/{id}/summaries/{week_key}", get(feed::team_summary_for_week))
        .route("/{id}/staff-updates", get(feed::list_staff_updates))
}

/// Routes mounted at `/clubs`.
///
/// ```text
/// GET    /{id}/updates    -> list_club_updates
/// ```
pub fn club_router() -> Router<AppState> {
    Router::new().route("/{id}/updates", get(feed::list_club_updates))
}

/// Routes mounted at `/me`.
///
/// ```text
/// GET    /updates    -> list_my_updates
/// ```
pub fn me_router() -> Router<AppState> {
    Router::new().route("/updates", get(feed::list_my_updates))
}
