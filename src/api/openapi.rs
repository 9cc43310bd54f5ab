//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, location_handler, user_handler};
use crate::domain::{
    Location, NewLocation, NewUser, UserChanges, UserLocationsResponse, UserResponse, UserType,
    UserWithTypeResponse,
};
use crate::services::TokenPair;

/// OpenAPI documentation for the User Location API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Location API",
        version = "0.1.0",
        description = "Users, user types, locations and the assignments between them"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::get_current_user,
        // User endpoints
        user_handler::create_user,
        user_handler::update_user,
        user_handler::list_users,
        user_handler::list_user_types,
        user_handler::create_user_type,
        // Location endpoints
        location_handler::search_by_name,
        location_handler::list_users_with_locations,
        location_handler::list_users_by_location,
        location_handler::assign_location,
        location_handler::remove_location,
        location_handler::create_location,
        location_handler::list_locations,
    ),
    components(
        schemas(
            // Domain types
            UserType,
            UserResponse,
            UserWithTypeResponse,
            UserLocationsResponse,
            NewUser,
            UserChanges,
            Location,
            NewLocation,
            // Auth types
            auth_handler::LoginForm,
            TokenPair,
            // User handler types
            user_handler::NewUserType,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and current user"),
        (name = "Users", description = "User and user type management"),
        (name = "Locations", description = "Locations and user assignments")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from /user/login/"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_assignment_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/user/assign_location/{user_id}/{location_id}"));
        assert!(paths.contains_key("/user/search_by_name"));
        assert!(paths.contains_key("/users/me"));
    }
}
