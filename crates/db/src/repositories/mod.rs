//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod club_repo;
pub mod device_token_repo;
pub mod job_lock_repo;
pub mod team_repo;
pub mod team_summary_repo;
pub mod update_repo;
pub mod user_repo;
pub mod wellness_score_repo;

pub use alert_repo::{AlertRepo, ClaimOutcome};
pub use club_repo::ClubRepo;
pub use device_token_repo::DeviceTokenRepo;
pub use job_lock_repo::JobLockRepo;
pub use team_repo::TeamRepo;
pub use team_summary_repo::TeamSummaryRepo;
pub use update_repo::UpdateRepo;
pub use user_repo::UserRepo;
pub use wellness_score_repo::WellnessScoreRepo;
