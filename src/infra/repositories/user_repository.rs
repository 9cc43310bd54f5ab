//! User repository: lookups, writes and the eager-loading queries.

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set,
};

use super::entities::{location, user, user_type};
use super::entities::user::{ActiveModel, Entity as UserEntity};
use crate::config::MSG_USER_NOT_FOUND;
use crate::domain::{Location, User, UserWithLocations, UserWithType};
use crate::errors::{AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Column values written on create and update. `password_hash` is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub user_type_id: Option<i32>,
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user with its type eagerly loaded
    async fn find_with_type(&self, id: i32) -> AppResult<Option<UserWithType>>;

    /// Find a user with all assigned locations eagerly loaded
    async fn find_with_locations(&self, id: i32) -> AppResult<Option<UserWithLocations>>;

    async fn create(&self, record: UserRecord) -> AppResult<User>;

    /// Overwrite every column of an existing row
    async fn update(&self, id: i32, record: UserRecord) -> AppResult<User>;

    async fn list_with_types(&self) -> AppResult<Vec<UserWithType>>;

    async fn list_with_locations(&self) -> AppResult<Vec<UserWithLocations>>;

    /// Users whose name contains `fragment`, case-insensitive
    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<User>>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

const LIKE_ESCAPE: char = '!';

/// `%fragment%` with LIKE wildcards in the fragment matched literally.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Users whose lowercased name contains `fragment`, ordered by id.
fn name_contains(fragment: &str) -> Select<UserEntity> {
    let pattern = LikeExpr::new(contains_pattern(fragment)).escape(LIKE_ESCAPE);
    UserEntity::find()
        .filter(Expr::expr(Func::lower(Expr::col(user::Column::Name))).like(pattern))
        .order_by_asc(user::Column::Id)
}

fn with_type(pair: (user::Model, Option<user_type::Model>)) -> UserWithType {
    UserWithType {
        user: pair.0.into(),
        user_type: pair.1.map(Into::into),
    }
}

fn with_locations(pair: (user::Model, Vec<location::Model>)) -> UserWithLocations {
    let mut locations: Vec<Location> = pair.1.into_iter().map(Into::into).collect();
    locations.sort_by_key(|l| l.id);
    UserWithLocations {
        user: pair.0.into(),
        locations,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn find_with_type(&self, id: i32) -> AppResult<Option<UserWithType>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(user_type::Entity)
            .one(&self.db)
            .await?;
        Ok(result.map(with_type))
    }

    async fn find_with_locations(&self, id: i32) -> AppResult<Option<UserWithLocations>> {
        let result = UserEntity::find_by_id(id)
            .find_with_related(location::Entity)
            .all(&self.db)
            .await?;
        Ok(result.into_iter().next().map(with_locations))
    }

    async fn create(&self, record: UserRecord) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(record.name),
            username: Set(record.username),
            email: Set(record.email),
            password: Set(record.password_hash),
            user_type_id: Set(record.user_type_id),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, record: UserRecord) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(MSG_USER_NOT_FOUND)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(record.name);
        active.username = Set(record.username);
        active.email = Set(record.email);
        active.password = Set(record.password_hash);
        active.user_type_id = Set(record.user_type_id);

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn list_with_types(&self) -> AppResult<Vec<UserWithType>> {
        let rows = UserEntity::find()
            .find_also_related(user_type::Entity)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(with_type).collect())
    }

    async fn list_with_locations(&self) -> AppResult<Vec<UserWithLocations>> {
        let rows = UserEntity::find()
            .find_with_related(location::Entity)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(with_locations).collect())
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<User>> {
        let rows = name_contains(fragment).all(&self.db).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("An"), "%an%");
        assert_eq!(contains_pattern("_"), "%!_%");
        assert_eq!(contains_pattern("a_b%"), "%a!_b!%%");
        assert_eq!(contains_pattern("wow!"), "%wow!!%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn test_name_search_sql_matches_underscore_literally() {
        let sql = name_contains("_").build(DbBackend::Postgres).to_string();

        assert!(sql.contains(r#"LOWER("name") LIKE"#), "{}", sql);
        assert!(sql.contains("'%!_%'"), "{}", sql);
        assert!(sql.contains("ESCAPE '!'"), "{}", sql);
    }
}
