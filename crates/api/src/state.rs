use std::sync::Arc;

use worlds_db::store::WorldStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing record store for worlds.
    pub store: Arc<dyn WorldStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
