//! Multicast push delivery.
//!
//! [`PushClient`] talks to the push provider's HTTP endpoint; one call
//! fans a single payload out to every device token passed in.
//! [`Dispatcher`] resolves a user's registered tokens and sends to all
//! of them. Per-token delivery failures are logged and never retried;
//! stale tokens are not pruned.

pub mod client;
pub mod dispatch;
pub mod payload;

pub use client::{MulticastOutcome, PushClient, PushConfig, PushError};
pub use dispatch::{DispatchError, Dispatcher};
