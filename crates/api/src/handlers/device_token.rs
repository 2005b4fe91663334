//! Handlers for device-token registration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use teampulse_core::error::CoreError;
use teampulse_core::roles::ROLE_ADMIN;
use teampulse_core::types::DbId;
use teampulse_db::models::device_token::{DeviceToken, RegisterDeviceToken};
use teampulse_db::repositories::DeviceTokenRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users/{id}/device-tokens
///
/// Register (or refresh) a push token for a user. Users may only register
/// tokens for themselves; admins may register for anyone.
pub async fn register_device_token(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<RegisterDeviceToken>,
) -> AppResult<(StatusCode, Json<DataResponse<DeviceToken>>)> {
    if auth.user_id != user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot register device tokens for another user".into(),
        )));
    }

    let token = input.token.trim();
    if token.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "token must not be empty".into(),
        )));
    }

    let registered = DeviceTokenRepo::upsert(&state.pool, user_id, token).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: registered })))
}
