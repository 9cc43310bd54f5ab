//! Service Container - wires concrete services over one connection pool.

use std::sync::Arc;

use super::{AuthService, Authenticator, LocationManager, LocationService, UserManager, UserService};
use crate::config::Config;
use crate::domain::{AcceptAnyPassword, Argon2Verifier, PasswordVerifier};
use crate::infra::Persistence;

/// Shared handles to every application service.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub locations: Arc<dyn LocationService>,
}

impl Services {
    pub fn new(
        auth: Arc<dyn AuthService>,
        users: Arc<dyn UserService>,
        locations: Arc<dyn LocationService>,
    ) -> Self {
        Self {
            auth,
            users,
            locations,
        }
    }

    /// Build the SeaORM-backed services.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let verifier = password_verifier(&config);

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), verifier, config)),
            users: Arc::new(UserManager::new(uow.clone())),
            locations: Arc::new(LocationManager::new(uow)),
        }
    }
}

fn password_verifier(config: &Config) -> Arc<dyn PasswordVerifier> {
    if config.password_verification {
        Arc::new(Argon2Verifier)
    } else {
        tracing::warn!("Password verification is disabled; any password will be accepted");
        Arc::new(AcceptAnyPassword)
    }
}
