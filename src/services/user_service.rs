//! User service - user and user type CRUD.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{
    MSG_EMAIL_EXISTS, MSG_USERNAME_EXISTS, MSG_USER_DOES_NOT_EXIST, MSG_USER_TYPE_EXISTS,
    MSG_USER_TYPE_NOT_FOUND,
};
use crate::domain::{NewUser, Password, UserChanges, UserType, UserWithType};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{UnitOfWork, UserRecord};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user and return it with its type loaded
    async fn create_user(&self, new_user: NewUser) -> AppResult<UserWithType>;

    /// Replace the mutable fields of the user identified by `changes.email`
    async fn update_user(&self, changes: UserChanges) -> AppResult<UserWithType>;

    async fn list_users(&self) -> AppResult<Vec<UserWithType>>;

    async fn list_user_types(&self) -> AppResult<Vec<UserType>>;

    async fn create_user_type(&self, name: String) -> AppResult<UserType>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_user_type_exists(&self, user_type_id: Option<i32>) -> AppResult<()> {
        if let Some(id) = user_type_id {
            self.uow
                .user_types()
                .find_by_id(id)
                .await?
                .ok_or_not_found(MSG_USER_TYPE_NOT_FOUND)?;
        }
        Ok(())
    }

    async fn reload_with_type(&self, id: i32) -> AppResult<UserWithType> {
        self.uow
            .users()
            .find_with_type(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("User {} vanished after write", id)))
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, new_user: NewUser) -> AppResult<UserWithType> {
        let users = self.uow.users();

        if users.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::conflict(MSG_EMAIL_EXISTS));
        }
        if users.find_by_username(&new_user.username).await?.is_some() {
            return Err(AppError::conflict(MSG_USERNAME_EXISTS));
        }
        self.ensure_user_type_exists(new_user.user_type_id).await?;

        let password_hash = Password::new(&new_user.password)?.into_string();
        let created = users
            .create(UserRecord {
                name: new_user.name,
                username: new_user.username,
                email: new_user.email,
                password_hash,
                user_type_id: new_user.user_type_id,
            })
            .await?;

        tracing::info!(user_id = created.id, "Created user");
        self.reload_with_type(created.id).await
    }

    async fn update_user(&self, changes: UserChanges) -> AppResult<UserWithType> {
        let users = self.uow.users();

        let existing = users
            .find_by_email(&changes.email)
            .await?
            .ok_or_not_found(MSG_USER_DOES_NOT_EXIST)?;

        if changes.username != existing.username {
            if let Some(other) = users.find_by_username(&changes.username).await? {
                if other.id != existing.id {
                    return Err(AppError::conflict(MSG_USERNAME_EXISTS));
                }
            }
        }
        self.ensure_user_type_exists(changes.user_type_id).await?;

        let password_hash = Password::new(&changes.password)?.into_string();
        let updated = users
            .update(
                existing.id,
                UserRecord {
                    name: changes.name,
                    username: changes.username,
                    email: existing.email,
                    password_hash,
                    user_type_id: changes.user_type_id,
                },
            )
            .await?;

        tracing::info!(user_id = updated.id, "Updated user");
        self.reload_with_type(updated.id).await
    }

    async fn list_users(&self) -> AppResult<Vec<UserWithType>> {
        self.uow.users().list_with_types().await
    }

    async fn list_user_types(&self) -> AppResult<Vec<UserType>> {
        self.uow.user_types().list().await
    }

    async fn create_user_type(&self, name: String) -> AppResult<UserType> {
        let user_types = self.uow.user_types();
        if user_types.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(MSG_USER_TYPE_EXISTS));
        }
        user_types.create(name).await
    }
}
