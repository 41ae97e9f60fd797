//! The mock user API: models, handlers and route registration.

mod handlers;
mod models;
mod tests;

pub use handlers::{get_user, health, list_users, root, HEALTH_PATH, ROOT_PATH, USERS_PATH, USER_PATH};
pub use models::{Endpoints, HealthResponse, RootResponse, User};

use crate::parser::Method;
use crate::server::{HttpServer, ServerConfig};

/// Register the API's routes on `server`.
pub async fn register_routes(server: &HttpServer) {
    server.add_route(ROOT_PATH, vec![Method::GET], root).await;
    server.add_route(HEALTH_PATH, vec![Method::GET], health).await;
    server.add_route(USERS_PATH, vec![Method::GET], list_users).await;
    server.add_route(USER_PATH, vec![Method::GET], get_user).await;
}

/// A server with `config` and every API route registered.
pub async fn build_server(config: ServerConfig) -> HttpServer {
    let server = HttpServer::new(config);
    register_routes(&server).await;
    server
}
