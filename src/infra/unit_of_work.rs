//! Unit of Work: one place to reach every repository, plus the transaction
//! runner used by multi-statement writes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};

use super::repositories::{
    AssignmentRepository, AssignmentStore, LocationRepository, LocationStore, UserRepository,
    UserStore, UserTypeRepository, UserTypeStore,
};
use crate::errors::{AppError, AppResult};

/// Boxed future borrowing an open transaction.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Repository container for dependency injection.
///
/// Services depend on this trait so tests can swap in mock repositories.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn user_types(&self) -> Arc<dyn UserTypeRepository>;

    fn locations(&self) -> Arc<dyn LocationRepository>;

    fn assignments(&self) -> Arc<dyn AssignmentRepository>;
}

/// SeaORM-backed implementation sharing one connection pool.
pub struct Persistence {
    users: Arc<UserStore>,
    user_types: Arc<UserTypeStore>,
    locations: Arc<LocationStore>,
    assignments: Arc<AssignmentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            user_types: Arc::new(UserTypeStore::new(db.clone())),
            locations: Arc::new(LocationStore::new(db.clone())),
            assignments: Arc::new(AssignmentStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
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

/// Run `f` inside a read-write transaction.
///
/// Commits when `f` succeeds and rolls back when it fails.
pub async fn run_in_transaction<F, T>(
    db: &DatabaseConnection,
    isolation: IsolationLevel,
    f: F,
) -> AppResult<T>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxFuture<'a, T> + Send,
    T: Send,
{
    let txn = db
        .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
        .await
        .map_err(AppError::from)?;

    match f(&txn).await {
        Ok(result) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}
