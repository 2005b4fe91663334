//! Repository for the `users` table.

use sqlx::PgPool;
use teampulse_core::roles;
use teampulse_core::types::DbId;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str = "id, display_name, role, club_id, team_id, created_at";

/// Column list for `users` in JOIN queries.
const PREFIXED_COLUMNS: &str = "u.id, u.display_name, u.role, u.club_id, u.team_id, u.created_at";

/// Read operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Fetch a user by ID.
    pub async fn get(pool: &PgPool, user_id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the staff members attached to a team.
    pub async fn list_staff_for_team(
        pool: &PgPool,
        team_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE team_id = $1 AND role = $2 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(team_id)
            .bind(roles::ROLE_STAFF)
            .fetch_all(pool)
            .await
    }

    /// Fetch the user designated as a club's responsible person, if any.
    pub async fn responsible_for_club(
        pool: &PgPool,
        club_id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS} FROM users u \
             JOIN clubs c ON c.responsible_user_id = u.id \
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(club_id)
            .fetch_optional(pool)
            .await
    }
}
