//! Alert types, status transitions, and the notification claim rule.
//!
//! An alert is raised when the chat flow detects alarming content in a
//! player's check-in. Staff acknowledge or resolve it; the notification
//! pipeline must push it to staff exactly once even though the creation
//! signal can be delivered more than once.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alert type
// ---------------------------------------------------------------------------

/// What kind of alarming content triggered the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Emotional distress in the free-text answer.
    Distress,
    /// A reported or suspected injury.
    Injury,
    /// Signs of overtraining / exhaustion.
    Overtraining,
}

impl AlertType {
    /// Database string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Distress => "distress",
            Self::Injury => "injury",
            Self::Overtraining => "overtraining",
        }
    }

    /// Parse the database string representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "distress" => Some(Self::Distress),
            "injury" => Some(Self::Injury),
            "overtraining" => Some(Self::Overtraining),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Status state machine
// ---------------------------------------------------------------------------

/// Alert workflow status, set by staff action.
pub const STATUS_NEW: &str = "new";
pub const STATUS_ACKNOWLEDGED: &str = "acknowledged";
pub const STATUS_RESOLVED: &str = "resolved";

/// Returns the set of valid target statuses reachable from `from`.
///
/// `resolved` is terminal. Unknown statuses allow no transitions.
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_NEW => &[STATUS_ACKNOWLEDGED, STATUS_RESOLVED],
        STATUS_ACKNOWLEDGED => &[STATUS_RESOLVED],
        _ => &[],
    }
}

/// Check whether a staff-initiated transition is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

// ---------------------------------------------------------------------------
// Notification claim
// ---------------------------------------------------------------------------

/// Value written to `alerts.notification_status` by the claim winner.
///
/// The creation signal is delivered at least once; the conditional
/// update that writes this value is what keeps the push exactly-once.
pub const NOTIFICATION_SENT: &str = "sent";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_can_be_acknowledged_or_resolved() {
        assert!(can_transition(STATUS_NEW, STATUS_ACKNOWLEDGED));
        assert!(can_transition(STATUS_NEW, STATUS_RESOLVED));
    }

    #[test]
    fn acknowledged_can_only_resolve() {
        assert!(can_transition(STATUS_ACKNOWLEDGED, STATUS_RESOLVED));
        assert!(!can_transition(STATUS_ACKNOWLEDGED, STATUS_NEW));
        assert!(!can_transition(STATUS_ACKNOWLEDGED, STATUS_ACKNOWLEDGED));
    }

    #[test]
    fn resolved_is_terminal() {
        assert!(valid_transitions(STATUS_RESOLVED).is_empty());
    }

    #[test]
    fn unknown_status_allows_nothing() {
        assert!(valid_transitions("bogus").is_empty());
    }

    #[test]
    fn alert_type_round_trips_through_db_string() {
        for t in [AlertType::Distress, AlertType::Injury, AlertType::Overtraining] {
            assert_eq!(AlertType::parse(t.as_str()), Some(t));
        }
        assert_eq!(AlertType::parse("unknown"), None);
    }
}
