//! Writes against the user/location association table.

use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, IsolationLevel, Set};

use super::entities::user_location::{ActiveModel, Column, Entity as UserLocationEntity};
use crate::errors::{AppError, AppResult};
use crate::infra::unit_of_work::run_in_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Store the pair. Returns false when it was already present.
    async fn assign(&self, user_id: i32, location_id: i32) -> AppResult<bool>;

    /// Delete the pair. Returns false when there was nothing to delete.
    async fn remove(&self, user_id: i32, location_id: i32) -> AppResult<bool>;
}

pub struct AssignmentStore {
    db: DatabaseConnection,
}

impl AssignmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssignmentRepository for AssignmentStore {
    async fn assign(&self, user_id: i32, location_id: i32) -> AppResult<bool> {
        run_in_transaction(&self.db, IsolationLevel::ReadCommitted, |txn| {
            Box::pin(async move {
                let existing = UserLocationEntity::find_by_id((user_id, location_id))
                    .one(txn)
                    .await?;
                if existing.is_some() {
                    return Ok::<_, AppError>(false);
                }

                // A concurrent assign of the same pair can still land between the
                // check and the insert; the primary key turns it into a no-op.
                let inserted = UserLocationEntity::insert(ActiveModel {
                    user_id: Set(user_id),
                    location_id: Set(location_id),
                })
                .on_conflict(
                    OnConflict::columns([Column::UserId, Column::LocationId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(txn)
                .await?;

                Ok::<_, AppError>(inserted > 0)
            })
        })
        .await
    }

    async fn remove(&self, user_id: i32, location_id: i32) -> AppResult<bool> {
        let result = UserLocationEntity::delete_by_id((user_id, location_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
