//! HTTP request handlers.

pub mod auth_handler;
pub mod location_handler;
pub mod user_handler;

pub use auth_handler::{auth_routes, me_routes};
pub use location_handler::{assignment_routes, location_routes};
pub use user_handler::user_routes;
