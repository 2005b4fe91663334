//! Alert notification delivery.
//!
//! [`AlertNotifier`] subscribes to the event bus and pushes a notification
//! to the responsible adults whenever a check-in raises an alert. The
//! claim-then-send protocol in [`notify_alert`] is shared with the unsent
//! sweep, which picks up alerts the in-process path missed.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::broadcast;

use teampulse_core::push::{PushKind, PushMessage};
use teampulse_core::types::DbId;
use teampulse_db::models::alert::Alert;
use teampulse_db::models::user::User;
use teampulse_db::repositories::{AlertRepo, ClaimOutcome, DeviceTokenRepo, UserRepo};
use teampulse_events::{kinds, DomainEvent};
use teampulse_push::PushClient;

/// Result of one delivery attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// This caller won the claim; the send was attempted once.
    Sent { recipients: usize, tokens: usize },
    /// Another caller already claimed this alert.
    AlreadySent,
    /// The alert no longer exists.
    Missing,
}

/// Pushes alert notifications in response to `alert.created` events.
pub struct AlertNotifier {
    pool: PgPool,
    push: Arc<PushClient>,
}

impl AlertNotifier {
    pub fn new(pool: PgPool, push: Arc<PushClient>) -> Self {
        Self { pool, push }
    }

    /// Run the delivery loop.
    ///
    /// Consumes events from `receiver` until the channel is closed, i.e.
    /// the [`EventBus`](teampulse_events::EventBus) is dropped at
    /// shutdown. Lagged events are only logged; the unsent sweep recovers
    /// any alert dropped from the channel buffer.
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.handle_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "alert notifier lagged, sweep will catch up");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("event bus closed, alert notifier shutting down");
                    break;
                }
            }
        }
    }

    async fn handle_event(&self, event: &DomainEvent) {
        if event.event_type != kinds::ALERT_CREATED {
            return;
        }
        let Some(alert_id) = event.source_entity_id else {
            tracing::warn!("alert.created event without a source entity id");
            return;
        };

        match notify_alert(&self.pool, &self.push, alert_id).await {
            Ok(NotifyOutcome::Sent { recipients, tokens }) => {
                tracing::info!(alert_id, recipients, tokens, "alert notification handled");
            }
            Ok(NotifyOutcome::AlreadySent) => {
                tracing::debug!(alert_id, "alert notification already claimed elsewhere");
            }
            Ok(NotifyOutcome::Missing) => {
                tracing::warn!(alert_id, "alert.created event for a missing alert");
            }
            Err(e) => {
                tracing::error!(alert_id, error = %e, "alert notification failed");
            }
        }
    }
}

/// Claim an alert and push its notification to staff and the club
/// responsible.
///
/// The conditional claim makes this safe to call from any number of
/// concurrent workers; exactly one gets [`NotifyOutcome::Sent`]. After the
/// claim the send is at-most-once: push failures are logged, never
/// retried, and never roll the claim back.
pub async fn notify_alert(
    pool: &PgPool,
    push: &PushClient,
    alert_id: DbId,
) -> Result<NotifyOutcome, sqlx::Error> {
    let alert = match AlertRepo::claim_notification(pool, alert_id).await? {
        ClaimOutcome::Claimed(alert) => alert,
        ClaimOutcome::AlreadySent => return Ok(NotifyOutcome::AlreadySent),
        ClaimOutcome::NotFound => return Ok(NotifyOutcome::Missing),
    };

    let recipients = merge_recipients(
        UserRepo::list_staff_for_team(pool, alert.team_id).await?,
        UserRepo::responsible_for_club(pool, alert.club_id).await?,
    );

    let mut tokens: Vec<String> = Vec::new();
    for user in &recipients {
        tokens.extend(DeviceTokenRepo::tokens_for_user(pool, user.id).await?);
    }

    // Name lookup is cosmetic; fall back rather than fail the delivery.
    let player_name = match UserRepo::get(pool, alert.user_id).await {
        Ok(Some(player)) => Some(player.display_name),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(alert_id = alert.id, error = %e, "player lookup failed for alert message");
            None
        }
    };
    let message = alert_message(&alert, player_name.as_deref());

    if tokens.is_empty() {
        tracing::info!(
            alert_id = alert.id,
            recipients = recipients.len(),
            "no device tokens among alert recipients, nothing to send"
        );
        return Ok(NotifyOutcome::Sent {
            recipients: recipients.len(),
            tokens: 0,
        });
    }

    // One multicast for all recipients' devices.
    match push.send_multicast(&tokens, &message).await {
        Ok(outcome) => {
            tracing::info!(
                alert_id = alert.id,
                recipients = recipients.len(),
                tokens = tokens.len(),
                success = outcome.success,
                failure = outcome.failure,
                "alert notification dispatched"
            );
        }
        Err(e) => {
            tracing::error!(
                alert_id = alert.id,
                error = %e,
                "alert push failed after claim, not retrying"
            );
        }
    }

    Ok(NotifyOutcome::Sent {
        recipients: recipients.len(),
        tokens: tokens.len(),
    })
}

/// Staff first, then the club responsible if they are not already staff.
fn merge_recipients(staff: Vec<User>, responsible: Option<User>) -> Vec<User> {
    let mut recipients = staff;
    if let Some(responsible) = responsible {
        if !recipients.iter().any(|u| u.id == responsible.id) {
            recipients.push(responsible);
        }
    }
    recipients
}

/// Build the notification shown to staff for a new alert.
fn alert_message(alert: &Alert, player_name: Option<&str>) -> PushMessage {
    let name = player_name.unwrap_or("A player");
    PushMessage::new(
        "New wellbeing alert",
        format!("{name} may need attention ({})", alert.alert_type),
        format!("/dashboard/alerts/{}", alert.id),
    )
    .with_kind(PushKind::Alert)
    .with_alert(alert.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use teampulse_core::alert::STATUS_NEW;
    use teampulse_core::roles;

    fn sample_alert(id: DbId) -> Alert {
        Alert {
            id,
            user_id: 3,
            team_id: 5,
            club_id: 1,
            alert_type: "distress".to_string(),
            triggering_message: "everything feels too heavy".to_string(),
            status: STATUS_NEW.to_string(),
            notification_status: None,
            created_at: Utc::now(),
            acknowledged_at: None,
            resolved_at: None,
        }
    }

    #[test]
    fn message_names_the_player_and_links_the_alert() {
        let msg = alert_message(&sample_alert(42), Some("Jonas"));
        assert_eq!(msg.title, "New wellbeing alert");
        assert_eq!(msg.body, "Jonas may need attention (distress)");
        assert_eq!(msg.link, "/dashboard/alerts/42");
        assert_eq!(msg.kind, Some(PushKind::Alert));
        assert_eq!(msg.alert_id, Some(42));
    }

    #[test]
    fn message_falls_back_when_player_is_unknown() {
        let msg = alert_message(&sample_alert(8), None);
        assert_eq!(msg.body, "A player may need attention (distress)");
    }

    fn sample_user(id: DbId, role: &str) -> User {
        User {
            id,
            display_name: format!("User {id}"),
            role: role.to_string(),
            club_id: Some(1),
            team_id: Some(5),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn responsible_is_appended_after_staff() {
        let staff = vec![sample_user(10, roles::ROLE_STAFF)];
        let merged = merge_recipients(staff, Some(sample_user(20, roles::ROLE_CLUB_RESPONSIBLE)));
        let ids: Vec<DbId> = merged.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn responsible_already_on_staff_is_not_duplicated() {
        let staff = vec![sample_user(10, roles::ROLE_STAFF), sample_user(20, roles::ROLE_STAFF)];
        let merged = merge_recipients(staff, Some(sample_user(20, roles::ROLE_CLUB_RESPONSIBLE)));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn missing_responsible_leaves_staff_as_is() {
        let merged = merge_recipients(vec![sample_user(10, roles::ROLE_STAFF)], None);
        assert_eq!(merged.len(), 1);
    }
}
