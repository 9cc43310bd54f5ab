//! User type repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::user_type::{self, ActiveModel, Entity as UserTypeEntity};
use crate::domain::UserType;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<UserType>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<UserType>>;

    async fn create(&self, name: String) -> AppResult<UserType>;

    async fn list(&self) -> AppResult<Vec<UserType>>;
}

pub struct UserTypeStore {
    db: DatabaseConnection,
}

impl UserTypeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserTypeRepository for UserTypeStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<UserType>> {
        let result = UserTypeEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(UserType::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<UserType>> {
        let result = UserTypeEntity::find()
            .filter(user_type::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(result.map(UserType::from))
    }

    async fn create(&self, name: String) -> AppResult<UserType> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(name),
        }
        .insert(&self.db)
        .await?;
        Ok(UserType::from(model))
    }

    async fn list(&self) -> AppResult<Vec<UserType>> {
        let rows = UserTypeEntity::find()
            .order_by_asc(user_type::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(UserType::from).collect())
    }
}
