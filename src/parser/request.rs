//! HTTP request representation and parsing.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// A parsed HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The request method
    pub method: Method,
    /// The path component of the request target, without the query string
    pub path: String,
    /// The raw query string following `?`, if any
    pub query: Option<String>,
    /// The protocol version
    pub version: HttpVersion,
    /// Header names are stored lower-cased
    pub headers: HashMap<String, String>,
    /// Bytes following the header block
    pub body: Vec<u8>,
    /// Path variables captured by the matched route pattern
    pub params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a request from its parts, splitting `target` into path and query.
    pub fn new(method: Method, target: &str, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        };

        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        Self {
            method,
            path,
            query,
            version,
            headers,
            body: Vec::new(),
            params: HashMap::new(),
        }
    }

    /// Look up a header value; names are matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The `Origin` header sent by browsers on cross-origin requests.
    pub fn origin(&self) -> Option<&str> {
        self.header("Origin")
    }

    /// A path variable captured by the router, e.g. `id` for `/api/users/{id}`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Parse an HTTP/1.x request from the bytes read off a connection.
///
/// Everything after the blank line ending the header block becomes the body.
/// HTTP/1.1 requests must carry a `Host` header.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let (head, body) = match find_header_end(input) {
        Some(end) => (&input[..end], &input[end + 4..]),
        None => (input, &[][..]),
    };

    let head = std::str::from_utf8(head)
        .map_err(|_| Error::MalformedRequestLine("request head is not valid UTF-8".to_string()))?;

    let mut lines = head.lines();
    let request_line = lines
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or(Error::EmptyRequest)?;

    let mut parts = request_line.split_whitespace();
    let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version), None) => (method, target, version),
        _ => return Err(Error::MalformedRequestLine(request_line.to_string())),
    };

    let method = Method::from_str(method)?;
    if !target.starts_with('/') {
        return Err(Error::InvalidPath(target.to_string()));
    }
    let version = HttpVersion::from_str(version)?;

    let mut headers = HashMap::new();
    for line in lines.take_while(|line| !line.is_empty()) {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::InvalidHeaderFormat(line.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidHeaderFormat(line.to_string()));
        }
        headers.insert(name.to_string(), value.trim().to_string());
    }

    let mut request = HttpRequest::new(method, target, version, headers);
    if request.version == HttpVersion::Http11 && request.header("Host").is_none() {
        return Err(Error::MissingHeader("Host".to_string()));
    }
    request.body = body.to_vec();

    Ok(request)
}

fn find_header_end(input: &[u8]) -> Option<usize> {
    input.windows(4).position(|window| window == b"\r\n\r\n")
}
