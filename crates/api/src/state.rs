use std::sync::Arc;

use teampulse_events::EventBus;
use teampulse_insights::InsightsClient;
use teampulse_push::PushClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: teampulse_db::DbPool,
    /// Server configuration (timeouts, CORS, JWT secret, environment).
    pub config: Arc<ServerConfig>,
    /// Event bus feeding the alert notifier.
    pub event_bus: Arc<EventBus>,
    /// Client for the insight-generation service (check-in screening,
    /// manually triggered analysis runs).
    pub insights: Arc<InsightsClient>,
    /// Client for the push provider.
    pub push: Arc<PushClient>,
}
