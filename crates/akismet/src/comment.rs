// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Comment-check parameters derived from the inbound request
//!
//! Akismet classifies better with the context of the request that carried the
//! comment. Before a comment check the caller's fields are topped up from the
//! inbound request: client address, user agent and referrer fill gaps only,
//! string form fields are passed through as `POST_<name>`, and a safe subset of
//! server parameters is passed through unchanged.

use std::sync::LazyLock;

use api_client::{FormParams, InboundRequest, REMOTE_ADDR};
use regex::Regex;
use serde_json::Value;

/// Caller field holding the commenter's address
pub const USER_IP_FIELD: &str = "user_ip";
/// Caller field holding the commenter's browser
pub const USER_AGENT_FIELD: &str = "user_agent";
/// Caller field holding the referring page
pub const REFERRER_FIELD: &str = "referrer";
/// Prefix applied to passed-through form fields
pub const POST_FIELD_PREFIX: &str = "POST_";

static SERVER_PARAM_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(HTTP_|REMOTE_ADDR|REQUEST_URI|DOCUMENT_URI)")
        .expect("server parameter include regex is valid")
});

static SERVER_PARAM_EXCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(HTTP_COOKIE)").expect("server parameter exclude regex is valid"));

/// Check if a server parameter may be forwarded to Akismet
///
/// Cookies are never forwarded; they routinely hold session credentials.
pub fn forwards_server_param(key: &str) -> bool {
    SERVER_PARAM_INCLUDE.is_match(key) && !SERVER_PARAM_EXCLUDE.is_match(key)
}

/// Merge inbound request context into comment-check fields
///
/// `user_ip`, `user_agent` and `referrer` are only filled when the caller left
/// them out. Form fields and forwarded server parameters are written last and
/// replace caller fields of the same name.
pub fn enrich_comment_params<R>(mut values: FormParams, request: &R) -> FormParams
where
    R: InboundRequest + ?Sized,
{
    if !values.contains_key(USER_IP_FIELD)
        && let Some(Value::String(addr)) = request.server_params().get(REMOTE_ADDR)
    {
        values.insert(USER_IP_FIELD.to_string(), addr.clone());
    }

    if !values.contains_key(USER_AGENT_FIELD)
        && let Some(agent) = request.first_header("User-agent")
    {
        values.insert(USER_AGENT_FIELD.to_string(), agent);
    }

    // The HTTP header keeps its historical misspelling; the Akismet field does not.
    if !values.contains_key(REFERRER_FIELD)
        && let Some(referrer) = request.first_header("Referer")
    {
        values.insert(REFERRER_FIELD.to_string(), referrer);
    }

    for (key, value) in request.parsed_body() {
        if let Value::String(value) = value {
            values.insert(format!("{POST_FIELD_PREFIX}{key}"), value.clone());
        }
    }

    for (key, value) in request.server_params() {
        if let Value::String(value) = value
            && forwards_server_param(key)
        {
            values.insert(key.clone(), value.clone());
        }
    }

    values
}
