//! Well-known role name constants.
//!
//! These must match the `users.role` values written by the identity
//! provisioning flow and checked by the API's role guards.

/// A player: owns wellness scores, receives player updates.
pub const ROLE_PLAYER: &str = "player";

/// Team staff (coach, physio): receives team alerts and staff updates.
pub const ROLE_STAFF: &str = "staff";

/// Club responsible/owner: receives club updates and club-wide alerts.
pub const ROLE_CLUB_RESPONSIBLE: &str = "club_responsible";

/// Platform administrator: may trigger jobs and run cleanup tooling.
pub const ROLE_ADMIN: &str = "admin";
