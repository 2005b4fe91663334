//! In-process domain event infrastructure.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the canonical event envelope.
//! - [`kinds`] -- well-known event type names.

pub mod bus;
pub mod kinds;

pub use bus::{DomainEvent, EventBus};
