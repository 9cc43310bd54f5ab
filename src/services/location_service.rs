//! Location service - user/location assignment and assignment-aware search.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{MSG_LOCATION_NOT_FOUND, MSG_USER_NOT_FOUND};
use crate::domain::{exclude_assigned, Location, NewLocation, User, UserWithLocations};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Location service trait for dependency injection.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Assign a user to a location. Assigning an existing pair is a no-op.
    async fn assign(&self, user_id: i32, location_id: i32) -> AppResult<UserWithLocations>;

    /// Remove a user from a location. Removing an absent pair is a no-op.
    async fn remove(&self, user_id: i32, location_id: i32) -> AppResult<UserWithLocations>;

    async fn users_by_location(&self, location_id: i32) -> AppResult<Vec<User>>;

    async fn users_with_locations(&self) -> AppResult<Vec<UserWithLocations>>;

    /// Users whose name contains `name` and who are not assigned to the location
    async fn search_unassigned(&self, name: &str, location_id: i32) -> AppResult<Vec<User>>;

    async fn create_location(&self, location: NewLocation) -> AppResult<Location>;

    async fn list_locations(&self) -> AppResult<Vec<Location>>;
}

/// Concrete implementation of LocationService using Unit of Work.
pub struct LocationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LocationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Both ends of the pair must exist before the association is touched.
    async fn ensure_pair_exists(&self, user_id: i32, location_id: i32) -> AppResult<()> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found(MSG_USER_NOT_FOUND)?;
        self.uow
            .locations()
            .find_by_id(location_id)
            .await?
            .ok_or_not_found(MSG_LOCATION_NOT_FOUND)?;
        Ok(())
    }

    async fn user_locations(&self, user_id: i32) -> AppResult<UserWithLocations> {
        self.uow
            .users()
            .find_with_locations(user_id)
            .await?
            .ok_or_not_found(MSG_USER_NOT_FOUND)
    }
}

#[async_trait]
impl<U: UnitOfWork> LocationService for LocationManager<U> {
    async fn assign(&self, user_id: i32, location_id: i32) -> AppResult<UserWithLocations> {
        self.ensure_pair_exists(user_id, location_id).await?;

        let inserted = self.uow.assignments().assign(user_id, location_id).await?;
        if inserted {
            tracing::info!(user_id, location_id, "Assigned user to location");
        } else {
            tracing::debug!(user_id, location_id, "User already assigned to location");
        }

        self.user_locations(user_id).await
    }

    async fn remove(&self, user_id: i32, location_id: i32) -> AppResult<UserWithLocations> {
        self.ensure_pair_exists(user_id, location_id).await?;

        let removed = self.uow.assignments().remove(user_id, location_id).await?;
        if removed {
            tracing::info!(user_id, location_id, "Removed user from location");
        } else {
            tracing::debug!(user_id, location_id, "User was not assigned to location");
        }

        self.user_locations(user_id).await
    }

    async fn users_by_location(&self, location_id: i32) -> AppResult<Vec<User>> {
        let locations = self.uow.locations();
        locations
            .find_by_id(location_id)
            .await?
            .ok_or_not_found(MSG_LOCATION_NOT_FOUND)?;
        locations.list_users(location_id).await
    }

    async fn users_with_locations(&self) -> AppResult<Vec<UserWithLocations>> {
        self.uow.users().list_with_locations().await
    }

    async fn search_unassigned(&self, name: &str, location_id: i32) -> AppResult<Vec<User>> {
        let locations = self.uow.locations();
        let users = self.uow.users();

        let (assigned, suggested) = tokio::try_join!(
            locations.list_users(location_id),
            users.search_by_name(name),
        )?;

        let result = exclude_assigned(suggested, &assigned);
        tracing::debug!(
            location_id,
            assigned = assigned.len(),
            matches = result.len(),
            "Searched users by name"
        );
        Ok(result)
    }

    async fn create_location(&self, location: NewLocation) -> AppResult<Location> {
        let created = self.uow.locations().create(location).await?;
        tracing::info!(location_id = created.id, "Created location");
        Ok(created)
    }

    async fn list_locations(&self) -> AppResult<Vec<Location>> {
        self.uow.locations().list().await
    }
}
