//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod assignment_repository;
pub(crate) mod entities;
mod location_repository;
mod user_repository;
mod user_type_repository;

pub use assignment_repository::{AssignmentRepository, AssignmentStore};
pub use location_repository::{LocationRepository, LocationStore};
pub use user_repository::{UserRecord, UserRepository, UserStore};
pub use user_type_repository::{UserTypeRepository, UserTypeStore};

#[cfg(any(test, feature = "test-utils"))]
pub use assignment_repository::MockAssignmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use location_repository::MockLocationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_type_repository::MockUserTypeRepository;
