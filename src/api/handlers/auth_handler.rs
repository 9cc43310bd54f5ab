//! Authentication handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Form, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenPair;

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    #[schema(example = "asmith")]
    pub username: String,
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Public routes, nested under `/user`
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login/", post(login))
}

/// Routes that need a bearer token, nested under `/users`
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_current_user))
}

/// Login and get an access/refresh token pair
#[utoipa::path(
    post,
    path = "/user/login/",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenPair),
        (status = 400, description = "Unknown username or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Json<TokenPair>> {
    let tokens = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(tokens))
}

/// Get the user the bearer token was issued for
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
