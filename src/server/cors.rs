//! Cross-origin resource sharing.
//!
//! The policy never rejects a request. It only decides which
//! `Access-Control-*` headers go on the response, and the browser enforces
//! them. Preflight requests are answered here without reaching the router.

use log::debug;

use crate::parser::{HttpRequest, Method};
use crate::server::response::{HttpResponse, StatusCode};

/// Which origins, methods and headers browsers are told to permit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    /// Origins compared byte-for-byte against the `Origin` header.
    pub allowed_origins: Vec<String>,
    /// Methods a preflight may ask for; also listed in `Access-Control-Allow-Methods`.
    pub allowed_methods: Vec<Method>,
    /// Request headers a preflight may ask for, compared case-insensitively.
    pub allowed_headers: Vec<String>,
    /// Whether to send `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
    /// Seconds a browser may cache a preflight result.
    pub max_age: Option<u32>,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allowed_methods: vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS],
            allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
            allow_credentials: true,
            max_age: None,
        }
    }
}

impl CorsPolicy {
    /// A policy allowing the single given origin with the default methods and headers.
    pub fn for_origin(origin: impl Into<String>) -> Self {
        Self {
            allowed_origins: vec![origin.into()],
            ..Self::default()
        }
    }

    /// Whether `origin` is one of the configured origins.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Whether every header named in a comma-separated
    /// `Access-Control-Request-Headers` value is allowed.
    pub fn are_headers_allowed(&self, requested: &str) -> bool {
        requested
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .all(|name| self.allowed_headers.iter().any(|allowed| allowed.eq_ignore_ascii_case(name)))
    }

    /// A preflight is an `OPTIONS` request announcing the method it intends
    /// to use. The `Origin` header is not required to recognise one.
    pub fn is_preflight(request: &HttpRequest) -> bool {
        request.method == Method::OPTIONS && request.header("Access-Control-Request-Method").is_some()
    }

    /// Answer a preflight request with `204 No Content`.
    pub fn preflight(&self, request: &HttpRequest) -> HttpResponse {
        let mut response = HttpResponse::new(StatusCode::NoContent);
        response.set_header("Vary", "Origin");

        let Some(origin) = request.origin() else {
            return response;
        };
        let requested = request
            .header("Access-Control-Request-Method")
            .and_then(|method| method.parse::<Method>().ok());
        let method_allowed = requested.is_some_and(|method| self.allowed_methods.contains(&method));
        let headers_allowed = request
            .header("Access-Control-Request-Headers")
            .map_or(true, |headers| self.are_headers_allowed(headers));

        if !self.is_origin_allowed(origin) || !method_allowed || !headers_allowed {
            debug!("Preflight from {origin} not permitted");
            return response;
        }

        self.write_allow_headers(&mut response, origin);
        if let Some(max_age) = self.max_age {
            response.set_header("Access-Control-Max-Age", max_age.to_string());
        }
        response
    }

    /// Add CORS headers to a response for a request that carried `origin`.
    pub fn apply(&self, origin: Option<&str>, response: &mut HttpResponse) {
        let Some(origin) = origin else {
            return;
        };
        response.set_header("Vary", "Origin");
        if self.is_origin_allowed(origin) {
            self.write_allow_headers(response, origin);
        }
    }

    fn write_allow_headers(&self, response: &mut HttpResponse, origin: &str) {
        let methods = self
            .allowed_methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        response.set_header("Access-Control-Allow-Origin", origin);
        response.set_header("Access-Control-Allow-Methods", methods);
        response.set_header("Access-Control-Allow-Headers", self.allowed_headers.join(", "));
        if self.allow_credentials {
            response.set_header("Access-Control-Allow-Credentials", "true");
        }
    }
}
