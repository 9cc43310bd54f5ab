//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;

/// User resolved from the request's access token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Bearer authentication middleware.
///
/// Resolves the access token in the Authorization header to a stored user
/// and injects it into the request extensions as `CurrentUser`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let user = state.auth_service.current_user(token).await?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
