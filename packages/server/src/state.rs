use std::sync::Arc;

use common::DesignConfig;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    /// Theme served when no design system is active. Never mutated at runtime.
    pub default_theme: Arc<DesignConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let default_theme = Arc::new(config.default_theme.clone());
        Self {
            db,
            config: Arc::new(config),
            default_theme,
        }
    }
}
