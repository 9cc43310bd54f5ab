//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod location;
pub mod user;
pub mod user_location;
pub mod user_type;
