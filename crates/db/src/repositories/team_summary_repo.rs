//! Repository for the `team_summaries` table.

use sqlx::PgPool;
use teampulse_core::aggregate::TeamAverages;
use teampulse_core::types::DbId;

use crate::models::summary::TeamSummary;

/// Column list for `team_summaries` queries.
const COLUMNS: &str = "id, team_id, week_key, average_mood, average_stress, average_sleep, \
    average_motivation, average_energy, injury_count, common_topics, player_count, generated_at";

/// Provides CRUD operations for weekly team summaries.
pub struct TeamSummaryRepo;

impl TeamSummaryRepo {
    /// Insert or merge the summary for a team's week.
    ///
    /// The `(team_id, week_key)` pair is unique; a re-run of the analysis
    /// for the same week overwrites the aggregate fields in place rather
    /// than growing a second row.
    pub async fn upsert(
        pool: &PgPool,
        team_id: DbId,
        week_key: &str,
        averages: &TeamAverages,
        player_count: i32,
    ) -> Result<TeamSummary, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_summaries \
                (team_id, week_key, average_mood, average_stress, average_sleep, \
                 average_motivation, average_energy, injury_count, common_topics, player_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (team_id, week_key) DO UPDATE \
             SET average_mood = EXCLUDED.average_mood, \
                 average_stress = EXCLUDED.average_stress, \
                 average_sleep = EXCLUDED.average_sleep, \
                 average_motivation = EXCLUDED.average_motivation, \
                 average_energy = EXCLUDED.average_energy, \
                 injury_count = EXCLUDED.injury_count, \
                 common_topics = EXCLUDED.common_topics, \
                 player_count = EXCLUDED.player_count, \
                 generated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamSummary>(&query)
            .bind(team_id)
            .bind(week_key)
            .bind(averages.average_mood)
            .bind(averages.average_stress)
            .bind(averages.average_sleep)
            .bind(averages.average_motivation)
            .bind(averages.average_energy)
            .bind(averages.injury_count)
            .bind(serde_json::json!(averages.common_topics))
            .bind(player_count)
            .fetch_one(pool)
            .await
    }

    /// Fetch a team's summary for a specific week key.
    pub async fn get_by_week(
        pool: &PgPool,
        team_id: DbId,
        week_key: &str,
    ) -> Result<Option<TeamSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_summaries \
             WHERE team_id = $1 AND week_key = $2"
        );
        sqlx::query_as::<_, TeamSummary>(&query)
            .bind(team_id)
            .bind(week_key)
            .fetch_optional(pool)
            .await
    }

    /// List a team's summaries, most recent first.
    pub async fn list_for_team(
        pool: &PgPool,
        team_id: DbId,
        limit: i64,
    ) -> Result<Vec<TeamSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_summaries \
             WHERE team_id = $1 \
             ORDER BY generated_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, TeamSummary>(&query)
            .bind(team_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
