//! Repository for the generated insight feed tables.

use sqlx::PgPool;
use teampulse_core::types::DbId;

use crate::models::update::{ClubUpdate, PlayerUpdate, StaffUpdate};

/// Column list for `staff_updates` queries.
const STAFF_COLUMNS: &str = "id, team_id, title, content, category, created_at";

/// Column list for `club_updates` queries.
const CLUB_COLUMNS: &str = "id, club_id, title, content, category, created_at";

/// Column list for `player_updates` queries.
const PLAYER_COLUMNS: &str = "id, user_id, title, content, category, created_at";

/// Provides insert and list operations for the three insight feeds.
pub struct UpdateRepo;

impl UpdateRepo {
    /// Insert a staff update for a team, returning the generated ID.
    pub async fn insert_staff(
        pool: &PgPool,
        team_id: DbId,
        title: &str,
        content: &str,
        category: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO staff_updates (team_id, title, content, category) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(team_id)
        .bind(title)
        .bind(content)
        .bind(category)
        .fetch_one(pool)
        .await
    }

    /// Insert a club update, returning the generated ID.
    pub async fn insert_club(
        pool: &PgPool,
        club_id: DbId,
        title: &str,
        content: &str,
        category: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO club_updates (club_id, title, content, category) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(club_id)
        .bind(title)
        .bind(content)
        .bind(category)
        .fetch_one(pool)
        .await
    }

    /// Insert a player update, returning the generated ID.
    pub async fn insert_player(
        pool: &PgPool,
        user_id: DbId,
        title: &str,
        content: &str,
        category: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO player_updates (user_id, title, content, category) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(category)
        .fetch_one(pool)
        .await
    }

    /// List staff updates for a team, newest first.
    pub async fn list_staff_for_team(
        pool: &PgPool,
        team_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StaffUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {STAFF_COLUMNS} FROM staff_updates \
             WHERE team_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, StaffUpdate>(&query)
            .bind(team_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List club updates, newest first.
    pub async fn list_club_for_club(
        pool: &PgPool,
        club_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ClubUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {CLUB_COLUMNS} FROM club_updates \
             WHERE club_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ClubUpdate>(&query)
            .bind(club_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a player's personal updates, newest first.
    pub async fn list_player_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PlayerUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {PLAYER_COLUMNS} FROM player_updates \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PlayerUpdate>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete every staff update. Returns the number of rows removed.
    pub async fn delete_all_staff(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM staff_updates").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete every club update. Returns the number of rows removed.
    pub async fn delete_all_club(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM club_updates").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete every player update. Returns the number of rows removed.
    pub async fn delete_all_player(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM player_updates").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
