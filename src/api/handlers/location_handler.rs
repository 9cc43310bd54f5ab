//! Location and user/location assignment handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Location, NewLocation, UserLocationsResponse, UserResponse};
use crate::errors::AppResult;

/// Query for `/user/search_by_name`
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Location whose assigned users are excluded
    #[serde(rename = "locationID")]
    #[param(example = 1)]
    pub location_id: i32,
    /// Case-insensitive name fragment
    #[validate(length(max = 255, message = "Name fragment is too long"))]
    #[param(example = "an")]
    pub name: String,
}

/// Assignment routes, nested under `/user`
pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/search_by_name", get(search_by_name))
        .route("/locations/all", get(list_users_with_locations))
        .route("/location/:location_id", get(list_users_by_location))
        .route("/assign_location/:user_id/:location_id", put(assign_location))
        .route("/remove_location/:user_id/:location_id", delete(remove_location))
}

/// Location routes, nested under `/location`
pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_location))
        .route("/all", get(list_locations))
}

/// Search users by name, leaving out those already at the location
#[utoipa::path(
    get,
    path = "/user/search_by_name",
    tag = "Locations",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching unassigned users", body = Vec<UserResponse>),
        (status = 400, description = "Missing or invalid query parameters")
    )
)]
pub async fn search_by_name(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state
        .location_service
        .search_unassigned(&params.name, params.location_id)
        .await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// List all users with their locations
#[utoipa::path(
    get,
    path = "/user/locations/all",
    tag = "Locations",
    responses(
        (status = 200, description = "All users with locations", body = Vec<UserLocationsResponse>)
    )
)]
pub async fn list_users_with_locations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserLocationsResponse>>> {
    let users = state.location_service.users_with_locations().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// List users assigned to a location
#[utoipa::path(
    get,
    path = "/user/location/{location_id}",
    tag = "Locations",
    params(("location_id" = i32, Path, description = "Location id")),
    responses(
        (status = 200, description = "Users at the location", body = Vec<UserResponse>),
        (status = 400, description = "Location not found")
    )
)]
pub async fn list_users_by_location(
    State(state): State<AppState>,
    Path(location_id): Path<i32>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.location_service.users_by_location(location_id).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Assign a user to a location
#[utoipa::path(
    put,
    path = "/user/assign_location/{user_id}/{location_id}",
    tag = "Locations",
    params(
        ("user_id" = i32, Path, description = "User id"),
        ("location_id" = i32, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "User with updated locations", body = UserLocationsResponse),
        (status = 400, description = "User or location not found")
    )
)]
pub async fn assign_location(
    State(state): State<AppState>,
    Path((user_id, location_id)): Path<(i32, i32)>,
) -> AppResult<Json<UserLocationsResponse>> {
    let user = state.location_service.assign(user_id, location_id).await?;
    Ok(Json(user.into()))
}

/// Remove a user from a location
#[utoipa::path(
    delete,
    path = "/user/remove_location/{user_id}/{location_id}",
    tag = "Locations",
    params(
        ("user_id" = i32, Path, description = "User id"),
        ("location_id" = i32, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "User with updated locations", body = UserLocationsResponse),
        (status = 400, description = "User or location not found")
    )
)]
pub async fn remove_location(
    State(state): State<AppState>,
    Path((user_id, location_id)): Path<(i32, i32)>,
) -> AppResult<Json<UserLocationsResponse>> {
    let user = state.location_service.remove(user_id, location_id).await?;
    Ok(Json(user.into()))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/location/create",
    tag = "Locations",
    request_body = NewLocation,
    responses(
        (status = 200, description = "Location created", body = Location),
        (status = 400, description = "Invalid body")
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewLocation>,
) -> AppResult<Json<Location>> {
    Ok(Json(state.location_service.create_location(payload).await?))
}

/// List all locations
#[utoipa::path(
    get,
    path = "/location/all",
    tag = "Locations",
    responses(
        (status = 200, description = "All locations", body = Vec<Location>)
    )
)]
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    Ok(Json(state.location_service.list_locations().await?))
}
