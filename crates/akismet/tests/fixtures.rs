// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Akismet test fixtures
//!
//! Provides a client wired to a wiremock server, canned Akismet responses and
//! form-body matchers.

use akismet::{AkismetClient, AkismetConfig, TimeoutSeconds};
use api_client::FormParams;
use serde_json::{Value, json};
use url::Url;
use wiremock::{Match, MockServer, Request, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_BLOG: &str = "https://blog.example.com";
pub const TEST_TIMEOUT_SECONDS: u64 = 5;
pub const THANKS: &str = "Thanks for making the web a better place.";

/// Create a client pointed at the mock server
pub fn create_test_client(mock_server: &MockServer) -> AkismetClient {
    create_test_client_with_timeout(&mock_server.uri(), TEST_TIMEOUT_SECONDS)
}

/// Create a client for any base URL with the given timeout
pub fn create_test_client_with_timeout(base_url: &str, timeout_seconds: u64) -> AkismetClient {
    let config = AkismetConfig::new(TEST_API_KEY, TEST_BLOG)
        .with_base_url(Url::parse(base_url).expect("base URL is valid"))
        .with_timeout(TimeoutSeconds::new(timeout_seconds).expect("valid timeout"));

    AkismetClient::with_config(config).expect("client builds")
}

/// Build form params from literal pairs
pub fn form(pairs: &[(&str, &str)]) -> FormParams {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

/// Plain-text response
pub fn text_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

/// Response carrying the alert header pair
pub fn alert_response(code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("X-akismet-alert-code", code)
        .insert_header("X-akismet-alert-msg", message)
        .set_body_string("invalid")
}

/// Typical usage-limit payload
pub fn usage_limit_payload(throttled: bool) -> Value {
    json!({
        "limit": 350_000,
        "usage": 7463,
        "percentage": "2.13",
        "throttled": throttled
    })
}

/// Typical key-sites payload
pub fn key_sites_payload() -> Value {
    json!({
        "2025-03": [
            {
                "site": "blog.example.com",
                "api_calls": "2072",
                "spam": "2069",
                "ham": "3",
                "missed_spam": "0",
                "false_positives": "4",
                "is_revoked": false
            }
        ],
        "limit": 500,
        "offset": 0,
        "total": 1
    })
}

/// Decode a request's form body
pub fn form_body(request: &Request) -> FormParams {
    url::form_urlencoded::parse(&request.body)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Matches requests whose form body has `key` set to `value`
#[derive(Debug)]
pub struct FormField {
    key: String,
    value: String,
}

pub fn form_field(key: &str, value: &str) -> FormField {
    FormField {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl Match for FormField {
    fn matches(&self, request: &Request) -> bool {
        form_body(request).get(&self.key) == Some(&self.value)
    }
}

/// Matches requests whose form body lacks `key`
#[derive(Debug)]
pub struct FormFieldAbsent(String);

pub fn form_field_absent(key: &str) -> FormFieldAbsent {
    FormFieldAbsent(key.to_string())
}

impl Match for FormFieldAbsent {
    fn matches(&self, request: &Request) -> bool {
        !form_body(request).contains_key(&self.0)
    }
}
