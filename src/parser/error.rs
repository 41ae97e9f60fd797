//! Error types for request parsing.

use thiserror::Error;

/// Reasons a raw request could not be turned into an [`HttpRequest`](super::HttpRequest).
#[derive(Debug, Error)]
pub enum Error {
    /// The request method is not one the server understands.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target does not start with `/`.
    #[error("Invalid request target: {0}")]
    InvalidPath(String),

    /// The request line is not `METHOD TARGET VERSION`.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The protocol version is not HTTP/1.0 or HTTP/1.1.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// A header the protocol version requires is absent.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// A header line has no `:` separator or an empty name.
    #[error("Invalid header line: {0}")]
    InvalidHeaderFormat(String),

    /// Nothing was received.
    #[error("Empty request")]
    EmptyRequest,
}
