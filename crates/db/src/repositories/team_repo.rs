//! Repository for the `teams` table.

use sqlx::PgPool;
use teampulse_core::types::DbId;

use crate::models::team::Team;

/// Column list for `teams` queries.
const COLUMNS: &str = "id, club_id, name, created_at";

/// Read operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Fetch a team by ID.
    pub async fn get(pool: &PgPool, team_id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// List all teams in a club, oldest first.
    pub async fn list_for_club(pool: &PgPool, club_id: DbId) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE club_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Team>(&query)
            .bind(club_id)
            .fetch_all(pool)
            .await
    }
}
