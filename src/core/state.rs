use std::sync::Arc;

use crate::auth::store::UserStore;
use crate::core::config::AppConfig;
use crate::security::JwtManager;
use crate::tasks::store::TaskStore;

/// Shared application state. Stores are trait objects so tests can swap the
/// diesel-backed implementations for in-memory fakes.
pub struct AppState {
    pub config: AppConfig,
    pub tasks: Arc<dyn TaskStore>,
    pub users: Arc<dyn UserStore>,
    pub jwt: Arc<JwtManager>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("tasks", &"Arc<dyn TaskStore>")
            .field("users", &"Arc<dyn UserStore>")
            .field("jwt", &"Arc<JwtManager>")
            .finish()
    }
}
