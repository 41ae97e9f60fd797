//! Handlers for the mock user API.
//!
//! Every handler builds its body from literals on each call; nothing is
//! shared between requests.

use crate::api::models::{Endpoints, HealthResponse, RootResponse, User};
use crate::parser::HttpRequest;
use crate::server::{Error, HttpResponse};

pub const ROOT_PATH: &str = "/";
pub const HEALTH_PATH: &str = "/api/health";
pub const USERS_PATH: &str = "/api/users";
pub const USER_PATH: &str = "/api/users/{id}";

/// `GET /`
pub async fn root(_req: HttpRequest) -> Result<HttpResponse, Error> {
    HttpResponse::json(&RootResponse {
        message: "Welcome to the Rust API".to_string(),
        endpoints: Endpoints {
            root: ROOT_PATH.to_string(),
            health: HEALTH_PATH.to_string(),
            users: USERS_PATH.to_string(),
        },
    })
}

/// `GET /api/health`
pub async fn health(_req: HttpRequest) -> Result<HttpResponse, Error> {
    HttpResponse::json(&HealthResponse {
        status: "ok".to_string(),
        message: "Backend is running".to_string(),
    })
}

/// `GET /api/users`
pub async fn list_users(_req: HttpRequest) -> Result<HttpResponse, Error> {
    let users = vec![
        User::new(1, "Alice", "alice@example.com"),
        User::new(2, "Bob", "bob@example.com"),
        User::new(3, "Charlie", "charlie@example.com"),
    ];
    HttpResponse::json(&users)
}

/// `GET /api/users/{id}`
///
/// The id is echoed into `name` and `email` as an unparsed string, so any
/// segment (empty or non-numeric included) succeeds. The `id` field is
/// always 1, matching the behavior existing clients were built against.
pub async fn get_user(req: HttpRequest) -> Result<HttpResponse, Error> {
    let id = req.param("id").unwrap_or_default();
    HttpResponse::json(&User {
        id: 1,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
    })
}
