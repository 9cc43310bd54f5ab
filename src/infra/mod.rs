//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - SeaORM entities and repositories
//! - Unit of Work repository container and transaction runner

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, HealthProbe, MigrationState, MigrationStep, Migrator};
pub use repositories::{
    AssignmentRepository, LocationRepository, UserRecord, UserRepository, UserTypeRepository,
};
pub use unit_of_work::{run_in_transaction, Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAssignmentRepository, MockLocationRepository, MockUserRepository, MockUserTypeRepository,
};
