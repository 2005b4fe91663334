//! Well-known event type names.

/// A check-in screening raised a new wellbeing alert.
pub const ALERT_CREATED: &str = "alert.created";

/// A nightly analysis run finished successfully.
pub const ANALYSIS_COMPLETED: &str = "analysis.completed";

/// Entity kind used with [`DomainEvent::with_source`](crate::DomainEvent::with_source)
/// for alert events.
pub const ENTITY_ALERT: &str = "alert";
