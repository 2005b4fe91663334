//! Handlers for generated summaries and the three insight feeds.
//!
//! Team data is visible to the team's staff, the owning club's
//! responsible user, and admins. Club feeds are visible to that club's
//! responsible user and admins. Personal updates are only ever served to
//! their owner via `/me/updates`.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use teampulse_core::error::CoreError;
use teampulse_core::roles::{ROLE_ADMIN, ROLE_CLUB_RESPONSIBLE, ROLE_STAFF};
use teampulse_core::types::DbId;
use teampulse_db::models::summary::TeamSummary;
use teampulse_db::models::update::{ClubUpdate, PlayerUpdate, StaffUpdate};
use teampulse_db::repositories::{TeamRepo, TeamSummaryRepo, UpdateRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the update feed listings.
#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Query parameters for `GET /teams/{id}/summaries`.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Maximum number of weeks returned. Defaults to 26, capped at 52.
    pub limit: Option<i64>,
}

/// Maximum page size for update listings.
const MAX_LIMIT: i64 = 100;

/// Default page size for update listings.
const DEFAULT_LIMIT: i64 = 50;

/// Default and maximum number of weekly summaries returned.
const DEFAULT_SUMMARY_LIMIT: i64 = 26;
const MAX_SUMMARY_LIMIT: i64 = 52;

// ---------------------------------------------------------------------------
// Team scope
// ---------------------------------------------------------------------------

/// GET /api/v1/teams/{id}/summaries
///
/// List a team's weekly summaries, most recent first.
pub async fn list_team_summaries(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
    Query(params): Query<SummaryQuery>,
) -> AppResult<Json<DataResponse<Vec<TeamSummary>>>> {
    ensure_team_access(&state, &auth, team_id).await?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SUMMARY_LIMIT)
        .min(MAX_SUMMARY_LIMIT);

    let summaries = TeamSummaryRepo::list_for_team(&state.pool, team_id, limit).await?;
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/teams/{id}/summaries/{week_key}
///
/// Fetch one week's summary for a team.
pub async fn team_summary_for_week(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((team_id, week_key)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<TeamSummary>>> {
    ensure_team_access(&state, &auth, team_id).await?;

    if !is_valid_week_key(&week_key) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "'{week_key}' is not a valid week key (expected weekly-YYYY-WW)"
        ))));
    }

    let summary = TeamSummaryRepo::get_by_week(&state.pool, team_id, &week_key)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TeamSummary",
            id: team_id,
        }))?;

    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/teams/{id}/staff-updates
///
/// List a team's staff insight feed, newest first.
pub async fn list_staff_updates(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
    Query(params): Query<UpdateQuery>,
) -> AppResult<Json<DataResponse<Vec<StaffUpdate>>>> {
    ensure_team_access(&state, &auth, team_id).await?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let updates = UpdateRepo::list_staff_for_team(&state.pool, team_id, limit, offset).await?;
    Ok(Json(DataResponse { data: updates }))
}

// ---------------------------------------------------------------------------
// Club scope
// ---------------------------------------------------------------------------

/// GET /api/v1/clubs/{id}/updates
///
/// List a club's insight feed, newest first.
pub async fn list_club_updates(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(club_id): Path<DbId>,
    Query(params): Query<UpdateQuery>,
) -> AppResult<Json<DataResponse<Vec<ClubUpdate>>>> {
    ensure_club_access(&state, &auth, club_id).await?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let updates = UpdateRepo::list_club_for_club(&state.pool, club_id, limit, offset).await?;
    Ok(Json(DataResponse { data: updates }))
}

// ---------------------------------------------------------------------------
// Personal scope
// ---------------------------------------------------------------------------

/// GET /api/v1/me/updates
///
/// List the caller's personal insight feed, newest first.
pub async fn list_my_updates(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UpdateQuery>,
) -> AppResult<Json<DataResponse<Vec<PlayerUpdate>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let updates = UpdateRepo::list_player_for_user(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: updates }))
}

// ---------------------------------------------------------------------------
// Access checks
// ---------------------------------------------------------------------------

/// Check the caller may read a team's generated data.
async fn ensure_team_access(
    state: &AppState,
    auth: &AuthUser,
    team_id: DbId,
) -> Result<(), AppError> {
    if auth.role == ROLE_ADMIN {
        return Ok(());
    }

    match auth.role.as_str() {
        ROLE_STAFF => {
            let user = super::load_user(state, auth.user_id).await?;
            if user.team_id == Some(team_id) {
                return Ok(());
            }
        }
        ROLE_CLUB_RESPONSIBLE => {
            let user = super::load_user(state, auth.user_id).await?;
            let team = TeamRepo::get(&state.pool, team_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Team",
                    id: team_id,
                }))?;
            if user.club_id == Some(team.club_id) {
                return Ok(());
            }
        }
        _ => {}
    }

    Err(AppError::Core(CoreError::Forbidden(
        "Team data is outside your scope".into(),
    )))
}

/// Check the caller may read a club's generated data.
async fn ensure_club_access(
    state: &AppState,
    auth: &AuthUser,
    club_id: DbId,
) -> Result<(), AppError> {
    if auth.role == ROLE_ADMIN {
        return Ok(());
    }

    if auth.role == ROLE_CLUB_RESPONSIBLE {
        let user = super::load_user(state, auth.user_id).await?;
        if user.club_id == Some(club_id) {
            return Ok(());
        }
    }

    Err(AppError::Core(CoreError::Forbidden(
        "Club data is outside your scope".into(),
    )))
}

/// Syntactic check for `weekly-YYYY-WW` keys before hitting the database.
fn is_valid_week_key(key: &str) -> bool {
    let Some(rest) = key.strip_prefix("weekly-") else {
        return false;
    };
    let mut parts = rest.splitn(2, '-');
    let (Some(year), Some(week)) = (parts.next(), parts.next()) else {
        return false;
    };
    year.len() == 4
        && week.len() == 2
        && year.chars().all(|c| c.is_ascii_digit())
        && week.chars().all(|c| c.is_ascii_digit())
        && matches!(week.parse::<u32>(), Ok(1..=53))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_week_keys() {
        assert!(is_valid_week_key("weekly-2026-07"));
        assert!(is_valid_week_key("weekly-2025-53"));
    }

    #[test]
    fn rejects_malformed_week_keys() {
        assert!(!is_valid_week_key("weekly-2026-7"));
        assert!(!is_valid_week_key("weekly-26-07"));
        assert!(!is_valid_week_key("2026-07"));
        assert!(!is_valid_week_key("weekly-2026-00"));
        assert!(!is_valid_week_key("weekly-2026-60"));
        assert!(!is_valid_week_key("weekly-2026-"));
        assert!(!is_valid_week_key(""));
    }
}
