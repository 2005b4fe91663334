//! Repository for the `wellness_scores` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use teampulse_core::roles;
use teampulse_core::types::DbId;

use crate::models::wellness::{PlayerDayScore, SubmitCheckin, WellnessScore};

/// Column list for `wellness_scores` queries.
const COLUMNS: &str = "id, user_id, score_date, mood, stress, sleep, motivation, energy, \
    free_text, injured, created_at, updated_at";

/// Provides CRUD operations for daily wellness check-ins.
pub struct WellnessScoreRepo;

impl WellnessScoreRepo {
    /// Insert or replace a player's check-in for a date.
    ///
    /// Uses `ON CONFLICT (user_id, score_date) DO UPDATE` so a player who
    /// checks in twice on the same day overwrites their earlier entry.
    pub async fn upsert_for_date(
        pool: &PgPool,
        user_id: DbId,
        score_date: NaiveDate,
        input: &SubmitCheckin,
    ) -> Result<WellnessScore, sqlx::Error> {
        let query = format!(
            "INSERT INTO wellness_scores \
                (user_id, score_date, mood, stress, sleep, motivation, energy, free_text, injured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (user_id, score_date) DO UPDATE \
             SET mood = EXCLUDED.mood, \
                 stress = EXCLUDED.stress, \
                 sleep = EXCLUDED.sleep, \
                 motivation = EXCLUDED.motivation, \
                 energy = EXCLUDED.energy, \
                 free_text = EXCLUDED.free_text, \
                 injured = EXCLUDED.injured, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WellnessScore>(&query)
            .bind(user_id)
            .bind(score_date)
            .bind(input.mood)
            .bind(input.stress)
            .bind(input.sleep)
            .bind(input.motivation)
            .bind(input.energy)
            .bind(&input.free_text)
            .bind(input.injured.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Fetch a player's check-in for a date, if they submitted one.
    pub async fn get_for_user_on(
        pool: &PgPool,
        user_id: DbId,
        score_date: NaiveDate,
    ) -> Result<Option<WellnessScore>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wellness_scores \
             WHERE user_id = $1 AND score_date = $2"
        );
        sqlx::query_as::<_, WellnessScore>(&query)
            .bind(user_id)
            .bind(score_date)
            .fetch_optional(pool)
            .await
    }

    /// List every player check-in on a team for a given date.
    ///
    /// Inner join, so only players who actually submitted that day appear.
    pub async fn list_team_scores_on(
        pool: &PgPool,
        team_id: DbId,
        score_date: NaiveDate,
    ) -> Result<Vec<PlayerDayScore>, sqlx::Error> {
        sqlx::query_as::<_, PlayerDayScore>(
            "SELECT u.id AS user_id, u.display_name, \
                    w.mood, w.stress, w.sleep, w.motivation, w.energy, \
                    w.free_text, w.injured \
             FROM users u \
             JOIN wellness_scores w ON w.user_id = u.id AND w.score_date = $2 \
             WHERE u.team_id = $1 AND u.role = $3 \
             ORDER BY u.id ASC",
        )
        .bind(team_id)
        .bind(score_date)
        .bind(roles::ROLE_PLAYER)
        .fetch_all(pool)
        .await
    }
}
