//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and repositories. Handlers only see
//! the service traits, so router tests can substitute their own.

mod auth_service;
pub mod container;
mod location_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::Services;

pub use auth_service::{
    create_access_token, create_refresh_token, AuthService, Authenticator, Claims, TokenPair,
};
pub use location_service::{LocationManager, LocationService};
pub use user_service::{UserManager, UserService};
