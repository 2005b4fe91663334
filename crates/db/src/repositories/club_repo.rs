//! Repository for the `clubs` table.

use sqlx::PgPool;

use crate::models::club::Club;

/// Column list for `clubs` queries.
const COLUMNS: &str = "id, name, responsible_user_id, created_at";

/// Read operations for clubs.
pub struct ClubRepo;

impl ClubRepo {
    /// List every club, oldest first. The nightly analysis walks this.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Club>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clubs ORDER BY id ASC");
        sqlx::query_as::<_, Club>(&query).fetch_all(pool).await
    }
}
