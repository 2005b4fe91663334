//! Per-user dispatch: resolve registered tokens, then multicast.

use sqlx::PgPool;
use teampulse_core::push::PushMessage;
use teampulse_core::types::DbId;
use teampulse_db::repositories::DeviceTokenRepo;

use crate::client::{MulticastOutcome, PushClient, PushError};

/// Errors from resolving tokens or sending the push.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Loading the user's tokens failed.
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    /// The provider call failed.
    #[error(transparent)]
    Push(#[from] PushError),
}

/// Sends one message to all of a user's registered devices.
pub struct Dispatcher;

impl Dispatcher {
    /// Multicast `message` to every device token registered for `user_id`.
    ///
    /// A user with no registered tokens is not an error; the send is
    /// skipped with a debug log and a zero outcome.
    pub async fn send_to_user(
        pool: &PgPool,
        push: &PushClient,
        user_id: DbId,
        message: &PushMessage,
    ) -> Result<MulticastOutcome, DispatchError> {
        let tokens = DeviceTokenRepo::tokens_for_user(pool, user_id).await?;
        if tokens.is_empty() {
            tracing::debug!(user_id, "no device tokens registered, skipping push");
            return Ok(MulticastOutcome::default());
        }
        Ok(push.send_multicast(&tokens, message).await?)
    }
}
