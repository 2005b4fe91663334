//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where the entity is client-writable
//!
//! Structs served to the web client also derive `TS` for TypeScript
//! binding export.

pub mod alert;
pub mod club;
pub mod device_token;
pub mod job_lock;
pub mod summary;
pub mod team;
pub mod update;
pub mod user;
pub mod wellness;
