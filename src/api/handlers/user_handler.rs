//! User and user type handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewUser, UserChanges, UserType, UserWithTypeResponse};
use crate::errors::AppResult;

/// User type creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewUserType {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Technician")]
    pub name: String,
}

/// User routes, nested under `/user`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/update/", put(update_user))
        .route("/all", get(list_users))
        .route("/type/all", get(list_user_types))
        .route("/type/create", post(create_user_type))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user/create",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User created", body = UserWithTypeResponse),
        (status = 400, description = "Email or username taken, unknown user type, or invalid body")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUser>,
) -> AppResult<Json<UserWithTypeResponse>> {
    let user = state.user_service.create_user(payload).await?;
    Ok(Json(user.into()))
}

/// Replace a user's fields, looked up by email
#[utoipa::path(
    put,
    path = "/user/update/",
    tag = "Users",
    request_body = UserChanges,
    responses(
        (status = 200, description = "User updated", body = UserWithTypeResponse),
        (status = 400, description = "No user with this email, or invalid body")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserChanges>,
) -> AppResult<Json<UserWithTypeResponse>> {
    let user = state.user_service.update_user(payload).await?;
    Ok(Json(user.into()))
}

/// List all users with their type
#[utoipa::path(
    get,
    path = "/user/all",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserWithTypeResponse>)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserWithTypeResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// List all user types
#[utoipa::path(
    get,
    path = "/user/type/all",
    tag = "Users",
    responses(
        (status = 200, description = "All user types", body = Vec<UserType>)
    )
)]
pub async fn list_user_types(State(state): State<AppState>) -> AppResult<Json<Vec<UserType>>> {
    Ok(Json(state.user_service.list_user_types().await?))
}

/// Create a user type
#[utoipa::path(
    post,
    path = "/user/type/create",
    tag = "Users",
    request_body = NewUserType,
    responses(
        (status = 200, description = "User type created", body = UserType),
        (status = 400, description = "Duplicate name or invalid body")
    )
)]
pub async fn create_user_type(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUserType>,
) -> AppResult<Json<UserType>> {
    Ok(Json(state.user_service.create_user_type(payload.name).await?))
}
