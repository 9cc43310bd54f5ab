//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, HealthProbe};
use crate::services::{AuthService, LocationService, Services, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub location_service: Arc<dyn LocationService>,
    /// Database connectivity check for `/health`
    pub health: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Build the SeaORM-backed state from an open database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::new(services, database)
    }

    /// Create state from already constructed services.
    pub fn new(services: Services, health: Arc<dyn HealthProbe>) -> Self {
        Self {
            auth_service: services.auth,
            user_service: services.users,
            location_service: services.locations,
            health,
        }
    }
}
