//! Job-lock staleness decision.
//!
//! The decision is kept here, away from the SQL, so the 300-second
//! takeover rule can be unit tested without a database. The transaction
//! plumbing lives in the db crate's lock repository.

use chrono::Duration;

use crate::types::Timestamp;

/// A lock older than this is considered abandoned and may be stolen.
///
/// A crashed job therefore blocks retries for at most five minutes.
pub const LOCK_STALE_AFTER_SECS: i64 = 300;

/// Outcome of evaluating a lock row against the staleness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDecision {
    /// No row exists; insert one and proceed.
    Acquire,
    /// A row exists but is stale; overwrite its timestamp and proceed.
    Steal,
    /// A fresh row exists; another run holds the lock.
    Refuse,
}

/// Decide what to do with an (optional) existing lock timestamp.
///
/// Staleness is strict: a lock aged exactly [`LOCK_STALE_AFTER_SECS`]
/// is still held.
pub fn evaluate(existing: Option<Timestamp>, now: Timestamp) -> LockDecision {
    match existing {
        None => LockDecision::Acquire,
        Some(locked_at) => {
            if now - locked_at > Duration::seconds(LOCK_STALE_AFTER_SECS) {
                LockDecision::Steal
            } else {
                LockDecision::Refuse
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn missing_row_acquires() {
        assert_eq!(evaluate(None, Utc::now()), LockDecision::Acquire);
    }

    #[test]
    fn fresh_lock_refuses() {
        let now = Utc::now();
        let locked_at = now - Duration::seconds(10);
        assert_eq!(evaluate(Some(locked_at), now), LockDecision::Refuse);
    }

    #[test]
    fn stale_lock_is_stolen() {
        let now = Utc::now();
        let locked_at = now - Duration::seconds(LOCK_STALE_AFTER_SECS + 1);
        assert_eq!(evaluate(Some(locked_at), now), LockDecision::Steal);
    }

    #[test]
    fn exactly_at_timeout_still_refuses() {
        let now = Utc::now();
        let locked_at = now - Duration::seconds(LOCK_STALE_AFTER_SECS);
        assert_eq!(evaluate(Some(locked_at), now), LockDecision::Refuse);
    }

    #[test]
    fn future_timestamp_refuses() {
        // Clock skew between instances must not cause a steal.
        let now = Utc::now();
        let locked_at = now + Duration::seconds(30);
        assert_eq!(evaluate(Some(locked_at), now), LockDecision::Refuse);
    }
}
