use std::sync::Arc;

use rolegate_core::role_service::RoleService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the service holds `Arc`ed collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Role validation and mutation over the configured stores.
    pub roles: RoleService,
    /// Server configuration (read by the auth extractors).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, roles: RoleService) -> Self {
        Self {
            roles,
            config: Arc::new(config),
        }
    }
}
