//! HTTP handler implementations, one module per resource.

pub mod admin;
pub mod alert;
pub mod checkin;
pub mod device_token;
pub mod feed;

use teampulse_core::error::CoreError;
use teampulse_core::types::DbId;
use teampulse_db::models::user::User;
use teampulse_db::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Load the caller's user row, or 404 if the token references a user
/// that no longer exists.
pub(crate) async fn load_user(state: &AppState, user_id: DbId) -> Result<User, AppError> {
    UserRepo::get(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}
