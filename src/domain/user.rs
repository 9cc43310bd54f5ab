//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::location::Location;

/// Role/category label referenced by users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserType {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Technician")]
    pub name: String,
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub user_type_id: Option<i32>,
}

/// User with its type eagerly loaded
#[derive(Debug, Clone)]
pub struct UserWithType {
    pub user: User,
    pub user_type: Option<UserType>,
}

/// User with every assigned location eagerly loaded
#[derive(Debug, Clone)]
pub struct UserWithLocations {
    pub user: User,
    pub locations: Vec<Location>,
}

/// Validated fields for a new user. `password` is still plain text here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ann Smith")]
    pub name: String,
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "asmith")]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[schema(example = 1)]
    pub user_type_id: Option<i32>,
}

/// Full replacement of a user's mutable fields, keyed by email.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserChanges {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ann Jones")]
    pub name: String,
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "ajones")]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[schema(example = 2)]
    pub user_type_id: Option<i32>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ann Smith")]
    pub name: String,
    #[schema(example = "asmith")]
    pub username: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(example = 1)]
    pub user_type_id: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            user_type_id: user.user_type_id,
        }
    }
}

/// User response with the user type eagerly loaded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserWithTypeResponse {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub user_type_id: Option<i32>,
    #[serde(rename = "userType")]
    pub user_type: Option<UserType>,
}

impl From<UserWithType> for UserWithTypeResponse {
    fn from(value: UserWithType) -> Self {
        let user = value.user;
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            user_type_id: user.user_type_id,
            user_type: value.user_type,
        }
    }
}

/// User response with assigned locations eagerly loaded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserLocationsResponse {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub user_type_id: Option<i32>,
    pub locations: Vec<Location>,
}

impl From<UserWithLocations> for UserLocationsResponse {
    fn from(value: UserWithLocations) -> Self {
        let user = value.user;
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            user_type_id: user.user_type_id,
            locations: value.locations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> User {
        User {
            id: 7,
            name: "Ann".to_string(),
            username: "ann".to_string(),
            email: "ann@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            user_type_id: Some(1),
        }
    }

    #[test]
    fn test_response_never_contains_password_hash() {
        let json = serde_json::to_string(&UserResponse::from(ann())).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_user_type_serialized_as_camel_case_key() {
        let response = UserWithTypeResponse::from(UserWithType {
            user: ann(),
            user_type: Some(UserType {
                id: 1,
                name: "Technician".to_string(),
            }),
        });
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["userType"]["name"], "Technician");
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_new_user_validation() {
        let valid = NewUser {
            name: "Ann".to_string(),
            username: "ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "longenough".to_string(),
            user_type_id: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = NewUser {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            ..valid
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
