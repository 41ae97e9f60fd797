//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use crate::server::cors::CorsPolicy;

/// Fixed listening port of the backend.
pub const DEFAULT_PORT: u16 = 8000;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
    /// Cross-origin policy applied to every response.
    pub cors: CorsPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            max_connections: 1024,
            read_buffer_size: 8192,
            cors: CorsPolicy::default(),
        }
    }
}
