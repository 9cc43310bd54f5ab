//! Mock-backed Unit of Work for service tests.

use std::sync::Arc;

use crate::infra::{
    AssignmentRepository, LocationRepository, MockAssignmentRepository, MockLocationRepository,
    MockUserRepository, MockUserTypeRepository, UnitOfWork, UserRepository, UserTypeRepository,
};

pub(crate) struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    user_types: Arc<MockUserTypeRepository>,
    locations: Arc<MockLocationRepository>,
    assignments: Arc<MockAssignmentRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn builder() -> TestUnitOfWorkBuilder {
        TestUnitOfWorkBuilder::default()
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn user_types(&self) -> Arc<dyn UserTypeRepository> {
        self.user_types.clone()
    }

    fn locations(&self) -> Arc<dyn LocationRepository> {
        self.locations.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        self.assignments.clone()
    }
}

/// Unset repositories default to mocks with no expectations.
#[derive(Default)]
pub(crate) struct TestUnitOfWorkBuilder {
    users: Option<MockUserRepository>,
    user_types: Option<MockUserTypeRepository>,
    locations: Option<MockLocationRepository>,
    assignments: Option<MockAssignmentRepository>,
}

impl TestUnitOfWorkBuilder {
    pub(crate) fn users(mut self, users: MockUserRepository) -> Self {
        self.users = Some(users);
        self
    }

    pub(crate) fn user_types(mut self, user_types: MockUserTypeRepository) -> Self {
        self.user_types = Some(user_types);
        self
    }

    pub(crate) fn locations(mut self, locations: MockLocationRepository) -> Self {
        self.locations = Some(locations);
        self
    }

    pub(crate) fn assignments(mut self, assignments: MockAssignmentRepository) -> Self {
        self.assignments = Some(assignments);
        self
    }

    pub(crate) fn build(self) -> TestUnitOfWork {
        TestUnitOfWork {
            users: Arc::new(self.users.unwrap_or_default()),
            user_types: Arc::new(self.user_types.unwrap_or_default()),
            locations: Arc::new(self.locations.unwrap_or_default()),
            assignments: Arc::new(self.assignments.unwrap_or_default()),
        }
    }
}
