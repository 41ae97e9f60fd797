//! HTTP/1.x request parsing.
//!
//! Turns the raw bytes read from a client socket into an [`HttpRequest`]
//! that the router and handlers work with.

mod error;
mod method;
mod request;
mod version;

pub use error::Error;
pub use method::Method;
pub use request::{parse_request, HttpRequest};
pub use version::HttpVersion;
