//! Destructive admin cleanup operations.
//!
//! Wholesale purges used to reset demo and test environments. The API
//! layer refuses to expose these in production.

use serde::Serialize;
use sqlx::PgPool;

use teampulse_db::repositories::{AlertRepo, UpdateRepo};

/// Row counts removed by an update purge.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePurge {
    pub staff_updates: u64,
    pub club_updates: u64,
    pub player_updates: u64,
}

/// Delete every alert. Returns the number of rows removed.
pub async fn purge_alerts(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let deleted = AlertRepo::delete_all(pool).await?;
    tracing::warn!(deleted, "purged all alerts");
    Ok(deleted)
}

/// Delete every generated update across all three feeds.
pub async fn purge_updates(pool: &PgPool) -> Result<UpdatePurge, sqlx::Error> {
    let purge = UpdatePurge {
        staff_updates: UpdateRepo::delete_all_staff(pool).await?,
        club_updates: UpdateRepo::delete_all_club(pool).await?,
        player_updates: UpdateRepo::delete_all_player(pool).await?,
    };
    tracing::warn!(
        staff_updates = purge.staff_updates,
        club_updates = purge.club_updates,
        player_updates = purge.player_updates,
        "purged all generated updates"
    );
    Ok(purge)
}
