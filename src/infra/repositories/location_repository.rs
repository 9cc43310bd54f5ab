//! Location repository, including the users-by-location join.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::location::{self, ActiveModel, Entity as LocationEntity};
use super::entities::{user, user_location};
use crate::domain::{Location, NewLocation, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Location>>;

    async fn create(&self, location: NewLocation) -> AppResult<Location>;

    async fn list(&self) -> AppResult<Vec<Location>>;

    /// Users joined to the location through the association table
    async fn list_users(&self, location_id: i32) -> AppResult<Vec<User>>;
}

pub struct LocationStore {
    db: DatabaseConnection,
}

impl LocationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocationRepository for LocationStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Location>> {
        let result = LocationEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Location::from))
    }

    async fn create(&self, location: NewLocation) -> AppResult<Location> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(location.name),
            address: Set(location.address),
        }
        .insert(&self.db)
        .await?;
        Ok(Location::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Location>> {
        let rows = LocationEntity::find()
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Location::from).collect())
    }

    async fn list_users(&self, location_id: i32) -> AppResult<Vec<User>> {
        let rows = user::Entity::find()
            .inner_join(user_location::Entity)
            .filter(user_location::Column::LocationId.eq(location_id))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
