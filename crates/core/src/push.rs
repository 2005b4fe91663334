//! Push-message domain type.
//!
//! A [`PushMessage`] describes what the user should see and where a tap
//! should take them. The wire payload (provider field names, webpush
//! options) is assembled by the push crate; job code only builds these.

use serde::Serialize;

use crate::types::DbId;

/// Machine-readable message kind carried in the payload's data map so
/// the web client can route taps without parsing the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushKind {
    /// A staff alert notification.
    Alert,
    /// A daily check-in reminder.
    Reminder,
    /// A new generated insight update.
    Update,
}

impl PushKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Reminder => "reminder",
            Self::Update => "update",
        }
    }
}

/// One notification as the user sees it.
///
/// Built with [`PushMessage::new`] and enriched with the builder methods,
/// mirroring how events are constructed elsewhere in the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// In-app link opened when the notification is tapped.
    pub link: String,
    pub kind: Option<PushKind>,
    /// Set for alert pushes so the client can deep-link the alert view.
    pub alert_id: Option<DbId>,
}

impl PushMessage {
    /// Create a message with the required title, body, and tap link.
    pub fn new(title: impl Into<String>, body: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            link: link.into(),
            kind: None,
            alert_id: None,
        }
    }

    /// Tag the message with a machine-readable kind.
    pub fn with_kind(mut self, kind: PushKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attach the alert id for alert deep links.
    pub fn with_alert(mut self, alert_id: DbId) -> Self {
        self.alert_id = Some(alert_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_optional_fields() {
        let msg = PushMessage::new("New alert", "A player needs attention", "/dashboard/alerts/7")
            .with_kind(PushKind::Alert)
            .with_alert(7);

        assert_eq!(msg.kind, Some(PushKind::Alert));
        assert_eq!(msg.alert_id, Some(7));
        assert_eq!(msg.link, "/dashboard/alerts/7");
    }

    #[test]
    fn bare_message_has_no_kind_or_alert() {
        let msg = PushMessage::new("t", "b", "/");
        assert_eq!(msg.kind, None);
        assert_eq!(msg.alert_id, None);
    }
}
