//! HTTP server: routing, CORS and the connection loop.

mod config;
mod cors;
mod error;
mod handler;
mod http_server;
mod response;

pub use config::{ServerConfig, DEFAULT_PORT};
pub use cors::CorsPolicy;
pub use error::Error;
pub use handler::{HandlerFn, HandlerFuture, PathPattern, Route};
pub use http_server::HttpServer;
pub use response::{HttpResponse, StatusCode};
