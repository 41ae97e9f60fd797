//! Error types for the HTTP server.

use std::net::SocketAddr;

use thiserror::Error;

use crate::parser::{Error as ParserError, Method};

/// Errors that can occur while serving requests.
#[derive(Debug, Error)]
pub enum Error {
    /// The listener could not be bound; the server cannot start.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The client sent a request that could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// Reading from or writing to a connection failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No route pattern matches the path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A route pattern matches the path but not the method.
    #[error("Method {0} not allowed for path: {1}")]
    MethodNotAllowed(Method, String),

    /// A handler failed for a reason of its own.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// A response body could not be serialized.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by the client's request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::ParseError(_) | Error::NotFound(_) | Error::MethodNotAllowed(..))
    }
}
