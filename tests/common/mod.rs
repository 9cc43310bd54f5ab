//! Shared fixtures for router tests.
//!
//! `InMemoryStore` implements every repository trait over plain vectors so the
//! real services and router run without a database.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use user_location_api::api::{create_router, AppState};
use user_location_api::config::Config;
use user_location_api::domain::{
    AcceptAnyPassword, Argon2Verifier, Location, NewLocation, PasswordVerifier, User, UserType,
    UserWithLocations, UserWithType,
};
use user_location_api::errors::{AppError, AppResult};
use user_location_api::infra::{
    AssignmentRepository, HealthProbe, LocationRepository, UnitOfWork, UserRecord,
    UserRepository, UserTypeRepository,
};
use user_location_api::services::{Authenticator, LocationManager, Services, UserManager};

#[derive(Default)]
struct Tables {
    user_types: Vec<UserType>,
    users: Vec<User>,
    locations: Vec<Location>,
    pairs: BTreeSet<(i32, i32)>,
}

impl Tables {
    fn with_type(&self, user: User) -> UserWithType {
        let user_type = user
            .user_type_id
            .and_then(|id| self.user_types.iter().find(|t| t.id == id).cloned());
        UserWithType { user, user_type }
    }

    fn with_locations(&self, user: User) -> UserWithLocations {
        let locations = self
            .locations
            .iter()
            .filter(|l| self.pairs.contains(&(user.id, l.id)))
            .cloned()
            .collect();
        UserWithLocations { user, locations }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore(Arc<Mutex<Tables>>);

impl InMemoryStore {
    pub fn add_location(&self, name: &str) -> Location {
        let mut tables = self.0.lock().unwrap();
        let location = Location {
            id: tables.locations.len() as i32 + 1,
            name: name.to_string(),
            address: None,
        };
        tables.locations.push(location.clone());
        location
    }

    pub fn pair_count(&self) -> usize {
        self.0.lock().unwrap().pairs.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let tables = self.0.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.0.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.0.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_with_type(&self, id: i32) -> AppResult<Option<UserWithType>> {
        let tables = self.0.lock().unwrap();
        let user = tables.users.iter().find(|u| u.id == id).cloned();
        Ok(user.map(|u| tables.with_type(u)))
    }

    async fn find_with_locations(&self, id: i32) -> AppResult<Option<UserWithLocations>> {
        let tables = self.0.lock().unwrap();
        let user = tables.users.iter().find(|u| u.id == id).cloned();
        Ok(user.map(|u| tables.with_locations(u)))
    }

    async fn create(&self, record: UserRecord) -> AppResult<User> {
        let mut tables = self.0.lock().unwrap();
        let user = User {
            id: tables.users.len() as i32 + 1,
            name: record.name,
            username: record.username,
            email: record.email,
            password_hash: record.password_hash,
            user_type_id: record.user_type_id,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, record: UserRecord) -> AppResult<User> {
        let mut tables = self.0.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found!"))?;
        user.name = record.name;
        user.username = record.username;
        user.email = record.email;
        user.password_hash = record.password_hash;
        user.user_type_id = record.user_type_id;
        Ok(user.clone())
    }

    async fn list_with_types(&self) -> AppResult<Vec<UserWithType>> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .cloned()
            .map(|u| tables.with_type(u))
            .collect())
    }

    async fn list_with_locations(&self) -> AppResult<Vec<UserWithLocations>> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .cloned()
            .map(|u| tables.with_locations(u))
            .collect())
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<User>> {
        let needle = fragment.to_lowercase();
        let tables = self.0.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserTypeRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<UserType>> {
        let tables = self.0.lock().unwrap();
        Ok(tables.user_types.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<UserType>> {
        let tables = self.0.lock().unwrap();
        Ok(tables.user_types.iter().find(|t| t.name == name).cloned())
    }

    async fn create(&self, name: String) -> AppResult<UserType> {
        let mut tables = self.0.lock().unwrap();
        let user_type = UserType {
            id: tables.user_types.len() as i32 + 1,
            name,
        };
        tables.user_types.push(user_type.clone());
        Ok(user_type)
    }

    async fn list(&self) -> AppResult<Vec<UserType>> {
        Ok(self.0.lock().unwrap().user_types.clone())
    }
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Location>> {
        let tables = self.0.lock().unwrap();
        Ok(tables.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, location: NewLocation) -> AppResult<Location> {
        let mut tables = self.0.lock().unwrap();
        let created = Location {
            id: tables.locations.len() as i32 + 1,
            name: location.name,
            address: location.address,
        };
        tables.locations.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> AppResult<Vec<Location>> {
        Ok(self.0.lock().unwrap().locations.clone())
    }

    async fn list_users(&self, location_id: i32) -> AppResult<Vec<User>> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| tables.pairs.contains(&(u.id, location_id)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn assign(&self, user_id: i32, location_id: i32) -> AppResult<bool> {
        Ok(self.0.lock().unwrap().pairs.insert((user_id, location_id)))
    }

    async fn remove(&self, user_id: i32, location_id: i32) -> AppResult<bool> {
        Ok(self.0.lock().unwrap().pairs.remove(&(user_id, location_id)))
    }
}

impl UnitOfWork for InMemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.clone())
    }

    fn user_types(&self) -> Arc<dyn UserTypeRepository> {
        Arc::new(self.clone())
    }

    fn locations(&self) -> Arc<dyn LocationRepository> {
        Arc::new(self.clone())
    }

    fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        Arc::new(self.clone())
    }
}

/// Health probe with a fixed answer
pub struct StaticProbe(pub bool);

#[async_trait]
impl HealthProbe for StaticProbe {
    async fn ping(&self) -> AppResult<()> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }
}

pub fn test_config() -> Config {
    Config::with_secrets(
        "integration-access-secret-32-chars!!",
        "integration-refresh-secret-32-chars!",
    )
}

/// Router over `store` with real services.
pub fn app(store: &InMemoryStore, verify_passwords: bool, healthy: bool) -> Router {
    let uow = Arc::new(store.clone());
    let verifier: Arc<dyn PasswordVerifier> = if verify_passwords {
        Arc::new(Argon2Verifier)
    } else {
        Arc::new(AcceptAnyPassword)
    };

    let services = Services::new(
        Arc::new(Authenticator::new(uow.clone(), verifier, test_config())),
        Arc::new(UserManager::new(uow.clone())),
        Arc::new(LocationManager::new(uow)),
    );

    create_router(AppState::new(services, Arc::new(StaticProbe(healthy))))
}

/// Send one request and decode the JSON body (`Value::Null` when not JSON).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Create a user through the API and return its id.
pub async fn create_user(app: &Router, name: &str, username: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/user/create",
            serde_json::json!({
                "name": name,
                "username": username,
                "email": format!("{}@example.com", username),
                "password": "SecurePass123",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body["id"].as_i64().unwrap()
}
