//! Handlers for the `/alerts` resource.
//!
//! Roles see different slices: staff get their team's alerts, club
//! responsibles their whole club's. Status transitions follow the state
//! machine in `teampulse_core::alert` and lose cleanly to concurrent
//! staff action (409, never a silent overwrite).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use teampulse_core::alert::{self, STATUS_ACKNOWLEDGED, STATUS_RESOLVED};
use teampulse_core::error::CoreError;
use teampulse_core::roles::{ROLE_ADMIN, ROLE_CLUB_RESPONSIBLE, ROLE_STAFF};
use teampulse_core::types::DbId;
use teampulse_db::models::alert::Alert;
use teampulse_db::repositories::AlertRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /alerts`.
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for alert listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for alert listing.
const DEFAULT_LIMIT: i64 = 50;

/// GET /api/v1/alerts
///
/// List alerts in the caller's scope, newest first. Staff see their
/// team's alerts; club responsibles see their club's. Other roles have
/// no alert scope.
pub async fn list_alerts(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AlertQuery>,
) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let alerts = match auth.role.as_str() {
        ROLE_STAFF => {
            let user = super::load_user(&state, auth.user_id).await?;
            let team_id = user.team_id.ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("Staff user has no team".into()))
            })?;
            AlertRepo::list_for_team(&state.pool, team_id, limit, offset).await?
        }
        ROLE_CLUB_RESPONSIBLE => {
            let user = super::load_user(&state, auth.user_id).await?;
            let club_id = user.club_id.ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "Club responsible user has no club".into(),
                ))
            })?;
            AlertRepo::list_for_club(&state.pool, club_id, limit, offset).await?
        }
        _ => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only staff and club responsibles have an alert scope".into(),
            )))
        }
    };

    Ok(Json(DataResponse { data: alerts }))
}

/// POST /api/v1/alerts/{id}/acknowledge
pub async fn acknowledge_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(alert_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    transition_alert(&state, &auth, alert_id, STATUS_ACKNOWLEDGED).await
}

/// POST /api/v1/alerts/{id}/resolve
pub async fn resolve_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(alert_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    transition_alert(&state, &auth, alert_id, STATUS_RESOLVED).await
}

/// Move an alert to `target` after scope and state-machine checks.
///
/// The repository update is conditional on the status we read, so when
/// two staff members race, the loser gets a 409 instead of clobbering.
async fn transition_alert(
    state: &AppState,
    auth: &AuthUser,
    alert_id: DbId,
    target: &'static str,
) -> AppResult<Json<DataResponse<Alert>>> {
    let current = AlertRepo::get(&state.pool, alert_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }))?;

    ensure_alert_scope(state, auth, &current).await?;

    if !alert::can_transition(&current.status, target) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot move alert from '{}' to '{target}'",
            current.status
        ))));
    }

    let updated = AlertRepo::set_status(&state.pool, alert_id, &current.status, target)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Alert status changed concurrently; reload and retry".into(),
            ))
        })?;

    Ok(Json(DataResponse { data: updated }))
}

/// Check the caller may act on this alert.
///
/// Staff must belong to the alert's team, club responsibles to its club.
/// Admins may act on any alert.
async fn ensure_alert_scope(
    state: &AppState,
    auth: &AuthUser,
    alert: &Alert,
) -> Result<(), AppError> {
    if auth.role == ROLE_ADMIN {
        return Ok(());
    }

    let user = super::load_user(state, auth.user_id).await?;
    let in_scope = match auth.role.as_str() {
        ROLE_STAFF => user.team_id == Some(alert.team_id),
        ROLE_CLUB_RESPONSIBLE => user.club_id == Some(alert.club_id),
        _ => false,
    };

    if in_scope {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Alert is outside your scope".into(),
        )))
    }
}
