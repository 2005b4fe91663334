//! Route definitions for device-token registration under `/users`.

use axum::routing::post;
use axum::Router;

use crate::handlers::device_token;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /{id}/device-tokens    -> register_device_token (self or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/device-tokens",
        post(device_token::register_device_token),
    )
}
