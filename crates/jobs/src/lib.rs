//! Background job orchestration.
//!
//! - [`lock`] -- singleton job locks (fail-closed acquire, explicit release).
//! - [`analysis`] -- the nightly wellness analysis across clubs, teams,
//!   and players.
//! - [`alert_notifier`] -- exactly-once alert notification fan-out, fed by
//!   the event bus and the periodic sweep.
//! - [`sweep`] -- reconciliation loop re-submitting alerts whose
//!   notification was never claimed.
//! - [`cleanup`] -- destructive bulk-delete routines behind the admin API.
//! - [`schedule`] -- next-occurrence computation for fixed-timezone daily
//!   triggers.

pub mod alert_notifier;
pub mod analysis;
pub mod cleanup;
pub mod lock;
pub mod schedule;
pub mod sweep;

pub use alert_notifier::{AlertNotifier, NotifyOutcome};
pub use analysis::{AnalysisJob, AnalysisOutcome, AnalysisReport};
pub use schedule::DailySchedule;
pub use sweep::AlertSweep;
