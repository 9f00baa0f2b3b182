// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only view of the web request being classified
//!
//! A comment check is more accurate when the service sees the request that
//! carried the comment: the client address, browser headers and the posted
//! form. [`InboundRequest`] is the narrow capability a client reads those
//! from, so no particular web framework is required. [`ServerRequest`] is an
//! owned implementation that can be built by hand or derived from a `hyper`
//! request head.

use std::net::SocketAddr;

use hyper::{
    HeaderMap, Request,
    header::{HeaderName, HeaderValue},
};
use serde_json::{Map, Value};

/// Server parameter holding the client address
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
/// Server parameter holding the request target
pub const REQUEST_URI: &str = "REQUEST_URI";

/// Accessors a spam check needs from the inbound web request
pub trait InboundRequest {
    /// CGI-style server parameters (`REMOTE_ADDR`, `REQUEST_URI`, `HTTP_*`, ...)
    fn server_params(&self) -> &Map<String, Value>;

    /// All values of a header, in order; the lookup ignores case
    fn header_values(&self, name: &str) -> Vec<String>;

    /// Parsed request body; values other than strings are possible
    fn parsed_body(&self) -> &Map<String, Value>;

    /// First value of a header, if the request carries it
    fn first_header(&self, name: &str) -> Option<String> {
        self.header_values(name).into_iter().next()
    }
}

/// Owned inbound request data
#[derive(Debug, Clone, Default)]
pub struct ServerRequest {
    server_params: Map<String, Value>,
    headers: HeaderMap,
    body: Map<String, Value>,
}

impl ServerRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive server parameters and headers from a `hyper` request
    ///
    /// Each header `Foo-Bar` becomes the server parameter `HTTP_FOO_BAR`,
    /// repeated headers joined with `", "`. The body is left empty; attach the
    /// parsed form with [`ServerRequest::with_body`] or
    /// [`ServerRequest::with_urlencoded_body`].
    pub fn from_request<B>(request: &Request<B>, remote_addr: Option<SocketAddr>) -> Self {
        let mut server_params = Map::new();

        if let Some(addr) = remote_addr {
            server_params.insert(REMOTE_ADDR.to_string(), Value::String(addr.ip().to_string()));
            server_params.insert(
                "REMOTE_PORT".to_string(),
                Value::String(addr.port().to_string()),
            );
        }

        let request_uri = request
            .uri()
            .path_and_query()
            .map_or_else(|| request.uri().path().to_string(), ToString::to_string);
        server_params.insert(REQUEST_URI.to_string(), Value::String(request_uri));
        server_params.insert(
            "REQUEST_METHOD".to_string(),
            Value::String(request.method().as_str().to_string()),
        );
        server_params.insert(
            "SERVER_PROTOCOL".to_string(),
            Value::String(format!("{:?}", request.version())),
        );

        for name in request.headers().keys() {
            let joined = header_strings(request.headers(), name.as_str()).join(", ");
            server_params.insert(cgi_header_name(name), Value::String(joined));
        }

        Self {
            server_params,
            headers: request.headers().clone(),
            body: Map::new(),
        }
    }

    /// Set a server parameter
    #[must_use]
    pub fn with_server_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.server_params.insert(key.into(), value.into());
        self
    }

    /// Append a header value
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the parsed body
    #[must_use]
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }

    /// Set one parsed body field
    #[must_use]
    pub fn with_body_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Parse an `application/x-www-form-urlencoded` body
    ///
    /// Keys ending in `[]` collect their values into an array under the bare
    /// key; any other repeated key keeps its last value.
    #[must_use]
    pub fn with_urlencoded_body(mut self, body: &[u8]) -> Self {
        let mut parsed = Map::new();

        for (key, value) in url::form_urlencoded::parse(body) {
            if let Some(bare) = key.strip_suffix("[]") {
                let value = Value::String(value.into_owned());
                match parsed
                    .entry(bare.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()))
                {
                    Value::Array(items) => items.push(value),
                    other => *other = Value::Array(vec![value]),
                }
            } else {
                parsed.insert(key.into_owned(), Value::String(value.into_owned()));
            }
        }

        self.body = parsed;
        self
    }

    /// Headers of the request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl InboundRequest for ServerRequest {
    fn server_params(&self) -> &Map<String, Value> {
        &self.server_params
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        header_strings(&self.headers, name)
    }

    fn parsed_body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// Header values as strings; bytes outside UTF-8 are replaced
fn header_strings(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect()
}

fn cgi_header_name(name: &HeaderName) -> String {
    format!("HTTP_{}", name.as_str().to_ascii_uppercase().replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use hyper::header::{COOKIE, REFERER, USER_AGENT};

    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let request = ServerRequest::new()
            .with_header(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"))
            .with_header(REFERER, HeaderValue::from_static("https://example.com/a"))
            .with_header(REFERER, HeaderValue::from_static("https://example.com/b"));

        assert_eq!(request.header_values("User-agent"), vec!["Mozilla/5.0"]);
        assert_eq!(request.header_values("USER-AGENT"), vec!["Mozilla/5.0"]);
        assert_eq!(
            request.header_values("referer"),
            vec!["https://example.com/a", "https://example.com/b"]
        );
        assert_eq!(
            request.first_header("Referer").as_deref(),
            Some("https://example.com/a")
        );
        assert!(request.header_values("Accept").is_empty());
        assert_eq!(request.first_header("Accept"), None);
    }

    #[test]
    fn from_request_builds_server_params() {
        let request = Request::builder()
            .method("POST")
            .uri("/blog/post-1/comments?page=2")
            .header("User-Agent", "curl/8.0")
            .header("Accept-Language", "en")
            .header("Accept-Language", "fr")
            .header(COOKIE, "session=abc")
            .body(())
            .unwrap();
        let remote: SocketAddr = "203.0.113.9:51234".parse().unwrap();

        let inbound = ServerRequest::from_request(&request, Some(remote));
        let params = inbound.server_params();

        assert_eq!(params[REMOTE_ADDR], "203.0.113.9");
        assert_eq!(params["REMOTE_PORT"], "51234");
        assert_eq!(params[REQUEST_URI], "/blog/post-1/comments?page=2");
        assert_eq!(params["REQUEST_METHOD"], "POST");
        assert_eq!(params["SERVER_PROTOCOL"], "HTTP/1.1");
        assert_eq!(params["HTTP_USER_AGENT"], "curl/8.0");
        assert_eq!(params["HTTP_ACCEPT_LANGUAGE"], "en, fr");
        assert_eq!(params["HTTP_COOKIE"], "session=abc");
        assert_eq!(inbound.first_header("user-agent").as_deref(), Some("curl/8.0"));
        assert!(inbound.parsed_body().is_empty());
    }

    #[test]
    fn from_request_without_remote_addr() {
        let request = Request::builder().uri("/").body(()).unwrap();

        let inbound = ServerRequest::from_request(&request, None);

        assert!(!inbound.server_params().contains_key(REMOTE_ADDR));
        assert_eq!(inbound.server_params()[REQUEST_URI], "/");
    }

    #[test]
    fn urlencoded_body_parsing() {
        let inbound = ServerRequest::new()
            .with_urlencoded_body(b"author=Jane+Doe&comment=Hello%21&tags[]=a&tags[]=b&author=J");
        let body = inbound.parsed_body();

        assert_eq!(body["author"], "J");
        assert_eq!(body["comment"], "Hello!");
        assert_eq!(body["tags"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn builder_sets_fields() {
        let inbound = ServerRequest::new()
            .with_server_param(REMOTE_ADDR, "198.51.100.4")
            .with_server_param("REQUEST_TIME", 1_700_000_000)
            .with_body_field("subscribe", true)
            .with_body_field("comment", "hi");

        assert_eq!(inbound.server_params()[REMOTE_ADDR], "198.51.100.4");
        assert_eq!(inbound.server_params()["REQUEST_TIME"], 1_700_000_000);
        assert_eq!(inbound.parsed_body()["subscribe"], true);
        assert_eq!(inbound.parsed_body()["comment"], "hi");
    }
}
