//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the assignment search rule, independent of
//! the database and HTTP layers.

pub mod location;
pub mod password;
pub mod user;

pub use location::{exclude_assigned, Location, NewLocation};
pub use password::{AcceptAnyPassword, Argon2Verifier, Password, PasswordVerifier};
pub use user::{
    NewUser, User, UserChanges, UserLocationsResponse, UserResponse, UserType, UserWithLocations,
    UserWithType, UserWithTypeResponse,
};
