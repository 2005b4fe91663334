//! Domain types and pure logic shared across the teampulse backend.
//!
//! This crate has zero internal dependencies so it can be used by the
//! database layer, the job orchestration, the HTTP API, and any future
//! CLI tooling alike. Everything here is synchronous and side-effect
//! free; all I/O lives in the sibling crates.

pub mod aggregate;
pub mod alert;
pub mod error;
pub mod lock;
pub mod push;
pub mod roles;
pub mod types;
pub mod update;
pub mod week;
