//! A minimal JSON API backend serving mock user data.
//!
//! The crate bundles a small HTTP/1.x stack on top of tokio (request parser,
//! router with path variables, CORS policy, connection loop with graceful
//! shutdown) and the API that runs on it:
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | GET | `/` | welcome message and endpoint map |
//! | GET | `/api/health` | `{"status":"ok","message":"Backend is running"}` |
//! | GET | `/api/users` | three mock users |
//! | GET | `/api/users/{id}` | a mock user named after `id` |
//!
//! # Examples
//!
//! ```no_run
//! use mockapi_rs::{api, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mockapi_rs::ServerError> {
//!     let server = api::build_server(ServerConfig::default()).await;
//!     server.start().await
//! }
//! ```
//!
//! Handlers are plain async functions, so custom routes can sit alongside
//! the API ones:
//!
//! ```
//! use mockapi_rs::{HttpResponse, HttpServer, Method, ServerConfig};
//!
//! # async fn example() {
//! let server = HttpServer::new(ServerConfig::default());
//! server.add_route("/api/version", vec![Method::GET], |_req| async {
//!     HttpResponse::json(&serde_json::json!({ "version": "0.1.0" }))
//! }).await;
//! # }
//! ```

pub mod api;
pub mod parser;
pub mod server;

#[cfg(test)]
mod test_support;

pub use parser::{parse_request, Error as ParserError, HttpRequest, HttpVersion, Method};
pub use server::{CorsPolicy, Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
