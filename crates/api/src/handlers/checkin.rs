//! Handlers for the `/checkins` resource.
//!
//! Players submit one wellness check-in per day. Submitting again the
//! same day replaces the earlier entry. Free text is screened for
//! alarming content; a hit raises an alert and publishes `alert.created`
//! for the notifier. The screening result is never disclosed to the
//! player.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use teampulse_core::error::CoreError;
use teampulse_db::models::alert::NewAlert;
use teampulse_db::models::user::User;
use teampulse_db::models::wellness::{SubmitCheckin, WellnessScore};
use teampulse_db::repositories::{AlertRepo, WellnessScoreRepo};
use teampulse_events::{kinds, DomainEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePlayer;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/checkins
///
/// Submit the authenticated player's check-in for today. Ratings are
/// optional 1-5; `score_date`, when sent, must be today's UTC date so a
/// submission racing midnight fails loudly instead of landing on the
/// wrong day.
pub async fn submit_checkin(
    RequirePlayer(auth): RequirePlayer,
    State(state): State<AppState>,
    Json(input): Json<SubmitCheckin>,
) -> AppResult<(StatusCode, Json<DataResponse<WellnessScore>>)> {
    validate_ratings(&input)?;

    let today = Utc::now().date_naive();
    if let Some(date) = input.score_date {
        if date != today {
            return Err(AppError::Core(CoreError::Validation(format!(
                "score_date must be today ({today}); check-ins for other days are not accepted"
            ))));
        }
    }

    let user = super::load_user(&state, auth.user_id).await?;

    let score =
        WellnessScoreRepo::upsert_for_date(&state.pool, auth.user_id, today, &input).await?;

    screen_free_text(&state, &user, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: score })))
}

/// Reject any rating outside the 1-5 scale.
fn validate_ratings(input: &SubmitCheckin) -> Result<(), AppError> {
    let ratings = [
        ("mood", input.mood),
        ("stress", input.stress),
        ("sleep", input.sleep),
        ("motivation", input.motivation),
        ("energy", input.energy),
    ];
    for (field, value) in ratings {
        if let Some(v) = value {
            if !(1..=5).contains(&v) {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "{field} must be between 1 and 5"
                ))));
            }
        }
    }
    Ok(())
}

/// Screen the free-text answer and raise an alert on alarming content.
///
/// Screening failures collapse to "no alert" inside the client; only the
/// alert insert itself can fail this step, and that failure does fail the
/// request -- an alarming message must not be silently dropped.
async fn screen_free_text(
    state: &AppState,
    user: &User,
    input: &SubmitCheckin,
) -> Result<(), AppError> {
    let Some(text) = input
        .free_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return Ok(());
    };

    // An alert needs a team and club to route to.
    let (Some(team_id), Some(club_id)) = (user.team_id, user.club_id) else {
        tracing::warn!(
            user_id = user.id,
            "player has no team/club, skipping check-in screening"
        );
        return Ok(());
    };

    let Some(alert_type) = state.insights.screen_message(text).await else {
        return Ok(());
    };

    let alert = AlertRepo::create(
        &state.pool,
        &NewAlert {
            user_id: user.id,
            team_id,
            club_id,
            alert_type: alert_type.as_str().to_string(),
            triggering_message: text.to_string(),
        },
    )
    .await?;

    tracing::info!(
        alert_id = alert.id,
        alert_type = alert_type.as_str(),
        team_id,
        "check-in screening raised an alert"
    );

    state.event_bus.publish(
        DomainEvent::new(kinds::ALERT_CREATED)
            .with_source(kinds::ENTITY_ALERT, alert.id)
            .with_actor(user.id)
            .with_payload(serde_json::json!({
                "alert_type": alert_type.as_str(),
                "team_id": team_id,
                "club_id": club_id,
            })),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn checkin(mood: Option<i16>) -> SubmitCheckin {
        SubmitCheckin {
            mood,
            stress: None,
            sleep: None,
            motivation: None,
            energy: None,
            free_text: None,
            injured: None,
            score_date: None,
        }
    }

    #[test]
    fn ratings_inside_scale_pass() {
        assert!(validate_ratings(&checkin(Some(1))).is_ok());
        assert!(validate_ratings(&checkin(Some(5))).is_ok());
        assert!(validate_ratings(&checkin(None)).is_ok());
    }

    #[test]
    fn ratings_outside_scale_fail_with_field_name() {
        let err = validate_ratings(&checkin(Some(0))).unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::Validation(msg)) if msg.contains("mood")
        );

        let mut input = checkin(None);
        input.energy = Some(6);
        let err = validate_ratings(&input).unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::Validation(msg)) if msg.contains("energy")
        );
    }
}
