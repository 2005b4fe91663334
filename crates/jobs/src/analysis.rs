//! The nightly wellness analysis job.
//!
//! Walks every club, team, and player with a check-in for the day:
//! aggregates team wellness, upserts the weekly summary, asks the
//! generation service for team/player/club insights, stores them in the
//! append-only feeds, and fans out push notifications.
//!
//! Failure policy is best-effort all the way down: a bad team, player,
//! generation call, or push is logged and skipped without touching its
//! siblings. Only two things stop a run -- failing to take the job lock
//! (another run holds it) and losing the database at the club-listing
//! root.
//!
//! Re-running within the same day re-upserts summaries (same week key)
//! but appends fresh updates and re-sends pushes. That is the designed
//! behavior: the lock prevents concurrent runs, and the scheduler is
//! trusted not to fire twice per day.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use serde::Serialize;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use teampulse_core::aggregate::{self, PlayerScores, TeamAverages};
use teampulse_core::push::{PushKind, PushMessage};
use teampulse_core::types::DbId;
use teampulse_core::week::week_key;
use teampulse_db::models::club::Club;
use teampulse_db::models::team::Team;
use teampulse_db::models::wellness::PlayerDayScore;
use teampulse_db::repositories::{
    ClubRepo, TeamRepo, TeamSummaryRepo, UpdateRepo, UserRepo, WellnessScoreRepo,
};
use teampulse_insights::{Insight, InsightsClient, TeamSnapshot};
use teampulse_push::{Dispatcher, PushClient};

use crate::lock;
use crate::schedule::DailySchedule;

// ---------------------------------------------------------------------------
// Report / outcome
// ---------------------------------------------------------------------------

/// Counters from one analysis run, surfaced by the admin trigger route.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The calendar day (UTC) whose check-ins were analyzed.
    pub score_date: NaiveDate,
    /// The ISO week key the summaries were upserted under.
    pub week_key: String,
    pub clubs: usize,
    pub teams: usize,
    pub players: usize,
    pub summaries: usize,
    pub staff_updates: usize,
    pub player_updates: usize,
    pub club_updates: usize,
    pub reminders_sent: usize,
    pub notifications_sent: usize,
}

impl AnalysisReport {
    fn new(score_date: NaiveDate, week_key: String) -> Self {
        Self {
            score_date,
            week_key,
            clubs: 0,
            teams: 0,
            players: 0,
            summaries: 0,
            staff_updates: 0,
            player_updates: 0,
            club_updates: 0,
            reminders_sent: 0,
            notifications_sent: 0,
        }
    }
}

/// What happened to an analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// The run never started because the job lock was held.
    Skipped { reason: String },
    /// The run finished; individual failures are reflected in the counts.
    Completed { report: AnalysisReport },
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// The nightly analysis orchestrator.
///
/// Holds its collaborators explicitly; the same instance serves both the
/// worker's schedule loop and the admin API's manual trigger.
pub struct AnalysisJob {
    pool: PgPool,
    insights: Arc<InsightsClient>,
    push: Arc<PushClient>,
}

impl AnalysisJob {
    pub fn new(pool: PgPool, insights: Arc<InsightsClient>, push: Arc<PushClient>) -> Self {
        Self {
            pool,
            insights,
            push,
        }
    }

    /// Run the analysis once, guarded by the job lock.
    ///
    /// Returns [`AnalysisOutcome::Skipped`] when another run holds the
    /// lock. The lock is released on normal completion; a crashed run
    /// leaves it to expire through the staleness window.
    pub async fn run(&self) -> Result<AnalysisOutcome, sqlx::Error> {
        if !lock::acquire(&self.pool, lock::NIGHTLY_ANALYSIS).await {
            tracing::info!("nightly analysis lock held, skipping this run");
            return Ok(AnalysisOutcome::Skipped {
                reason: "job lock held by another run".to_string(),
            });
        }

        let result = self.run_locked().await;
        if result.is_ok() {
            lock::release(&self.pool, lock::NIGHTLY_ANALYSIS).await;
        }
        result
    }

    /// Run on a daily schedule until cancelled.
    pub async fn run_on_schedule(&self, schedule: DailySchedule, cancel: CancellationToken) {
        loop {
            let now = Utc::now();
            let next = schedule.next_after(now);
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::info!(next_run = %next, "nightly analysis scheduled");

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("analysis scheduler stopping");
                    break;
                }
                _ = tokio::time::sleep(wait) => {
                    match self.run().await {
                        Ok(AnalysisOutcome::Completed { report }) => {
                            tracing::info!(
                                clubs = report.clubs,
                                teams = report.teams,
                                players = report.players,
                                summaries = report.summaries,
                                "scheduled nightly analysis completed"
                            );
                        }
                        Ok(AnalysisOutcome::Skipped { reason }) => {
                            tracing::warn!(reason = %reason, "scheduled nightly analysis skipped");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "scheduled nightly analysis failed");
                        }
                    }
                }
            }
        }
    }

    async fn run_locked(&self) -> Result<AnalysisOutcome, sqlx::Error> {
        let score_date = Utc::now().date_naive();
        let week = week_key(score_date);
        let mut report = AnalysisReport::new(score_date, week.clone());

        // The one root read that may abort the whole run.
        let clubs = ClubRepo::list_all(&self.pool).await?;
        tracing::info!(clubs = clubs.len(), %score_date, week = %week, "nightly analysis starting");

        for club in &clubs {
            if let Err(e) = self.process_club(club, score_date, &week, &mut report).await {
                tracing::error!(
                    club_id = club.id,
                    error = %e,
                    "club analysis failed, continuing with next club"
                );
            }
            report.clubs += 1;
        }

        tracing::info!(
            teams = report.teams,
            players = report.players,
            summaries = report.summaries,
            staff_updates = report.staff_updates,
            player_updates = report.player_updates,
            club_updates = report.club_updates,
            "nightly analysis finished"
        );
        Ok(AnalysisOutcome::Completed { report })
    }

    /// Process one club: all its teams, then the club-scope insight.
    async fn process_club(
        &self,
        club: &Club,
        score_date: NaiveDate,
        week: &str,
        report: &mut AnalysisReport,
    ) -> Result<(), sqlx::Error> {
        let teams = TeamRepo::list_for_club(&self.pool, club.id).await?;

        let mut snapshots: Vec<TeamSnapshot> = Vec::new();
        for team in &teams {
            match self.process_team(team, score_date, week, report).await {
                Ok(Some(averages)) => snapshots.push(TeamSnapshot {
                    team_name: team.name.clone(),
                    averages,
                }),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        team_id = team.id,
                        error = %e,
                        "team analysis failed, continuing with next team"
                    );
                }
            }
            report.teams += 1;
        }

        // Club insight only when at least one team produced a summary.
        if snapshots.is_empty() {
            return Ok(());
        }
        let Some(insight) = self.insights.club_insight(&club.name, &snapshots).await else {
            return Ok(());
        };
        UpdateRepo::insert_club(
            &self.pool,
            club.id,
            &insight.title,
            &insight.content,
            &insight.category,
        )
        .await?;
        report.club_updates += 1;

        match UserRepo::responsible_for_club(&self.pool, club.id).await {
            Ok(Some(responsible)) => {
                let message =
                    PushMessage::new("New club insight", insight.title.clone(), "/dashboard/club")
                        .with_kind(PushKind::Update);
                self.push_to_user(responsible.id, &message, report).await;
            }
            Ok(None) => {
                tracing::debug!(club_id = club.id, "club has no responsible user to notify");
            }
            Err(e) => {
                tracing::warn!(club_id = club.id, error = %e, "failed to resolve club responsible");
            }
        }
        Ok(())
    }

    /// Process one team's check-ins for the day.
    ///
    /// Returns the aggregated averages when the team had any data, so the
    /// caller can feed them into the club-scope insight.
    async fn process_team(
        &self,
        team: &Team,
        score_date: NaiveDate,
        week: &str,
        report: &mut AnalysisReport,
    ) -> Result<Option<TeamAverages>, sqlx::Error> {
        let rows = WellnessScoreRepo::list_team_scores_on(&self.pool, team.id, score_date).await?;
        if rows.is_empty() {
            tracing::debug!(team_id = team.id, "no check-ins today, skipping team");
            return Ok(None);
        }

        self.send_reminders(&rows, report).await;

        let players: Vec<PlayerScores> = rows.iter().map(to_player_scores).collect();
        let averages = aggregate::summarize(&players);
        TeamSummaryRepo::upsert(&self.pool, team.id, week, &averages, players.len() as i32).await?;
        report.summaries += 1;
        report.players += players.len();

        if let Some(insight) = self
            .insights
            .team_insight(&team.name, &averages, players.len())
            .await
        {
            UpdateRepo::insert_staff(
                &self.pool,
                team.id,
                &insight.title,
                &insight.content,
                &insight.category,
            )
            .await?;
            report.staff_updates += 1;
            self.notify_team_staff(team, &insight, report).await;
        }

        for row in &rows {
            self.process_player(row, &averages, report).await;
        }

        Ok(Some(averages))
    }

    /// Generate and deliver one player's personal insight. Best-effort.
    async fn process_player(
        &self,
        row: &PlayerDayScore,
        averages: &TeamAverages,
        report: &mut AnalysisReport,
    ) {
        let scores = to_player_scores(row);
        let Some(insight) = self
            .insights
            .player_insight(&row.display_name, &scores, averages)
            .await
        else {
            return;
        };

        if let Err(e) = UpdateRepo::insert_player(
            &self.pool,
            row.user_id,
            &insight.title,
            &insight.content,
            &insight.category,
        )
        .await
        {
            tracing::warn!(
                user_id = row.user_id,
                error = %e,
                "failed to store player update, skipping player"
            );
            return;
        }
        report.player_updates += 1;

        let message = PushMessage::new(
            "New personal insight",
            insight.title.clone(),
            "/dashboard/updates",
        )
        .with_kind(PushKind::Update);
        self.push_to_user(row.user_id, &message, report).await;
    }

    /// Send the daily check-in reminder to every player that reported.
    ///
    /// Fired as one settled batch; individual failures are logged and the
    /// rest proceed.
    async fn send_reminders(&self, rows: &[PlayerDayScore], report: &mut AnalysisReport) {
        let message = PushMessage::new(
            "Daily check-in",
            "Thanks for checking in today. See you again tomorrow!",
            "/dashboard/checkin",
        )
        .with_kind(PushKind::Reminder);

        let sends = rows
            .iter()
            .map(|row| Dispatcher::send_to_user(&self.pool, &self.push, row.user_id, &message));
        let results = join_all(sends).await;

        for (row, result) in rows.iter().zip(results) {
            match result {
                Ok(_) => report.reminders_sent += 1,
                Err(e) => {
                    tracing::warn!(
                        user_id = row.user_id,
                        error = %e,
                        "check-in reminder push failed"
                    );
                }
            }
        }
    }

    /// Push a fresh team insight to all staff members. Best-effort.
    async fn notify_team_staff(&self, team: &Team, insight: &Insight, report: &mut AnalysisReport) {
        let staff = match UserRepo::list_staff_for_team(&self.pool, team.id).await {
            Ok(staff) => staff,
            Err(e) => {
                tracing::warn!(
                    team_id = team.id,
                    error = %e,
                    "failed to load team staff for insight push"
                );
                return;
            }
        };

        let message = PushMessage::new("New team insight", insight.title.clone(), "/dashboard/team")
            .with_kind(PushKind::Update);

        let sends = staff
            .iter()
            .map(|user| Dispatcher::send_to_user(&self.pool, &self.push, user.id, &message));
        let results = join_all(sends).await;

        for (user, result) in staff.iter().zip(results) {
            match result {
                Ok(_) => report.notifications_sent += 1,
                Err(e) => {
                    tracing::warn!(user_id = user.id, error = %e, "staff insight push failed");
                }
            }
        }
    }

    /// Send one message to one user, counting successes. Best-effort.
    async fn push_to_user(&self, user_id: DbId, message: &PushMessage, report: &mut AnalysisReport) {
        match Dispatcher::send_to_user(&self.pool, &self.push, user_id, message).await {
            Ok(_) => report.notifications_sent += 1,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "insight push failed");
            }
        }
    }
}

/// Map a joined check-in row into the aggregator's input shape.
fn to_player_scores(row: &PlayerDayScore) -> PlayerScores {
    PlayerScores {
        name: row.display_name.clone(),
        mood: row.mood,
        stress: row.stress,
        sleep: row.sleep,
        motivation: row.motivation,
        energy: row.energy,
        free_text: row.free_text.clone(),
        injured: row.injured,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
