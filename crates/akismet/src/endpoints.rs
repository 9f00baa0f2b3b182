// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Akismet REST endpoints and wire constants

use shared_types::FeedbackKind;

/// Default base URL of the Akismet REST API
pub const DEFAULT_BASE_URL: &str = "https://rest.akismet.com";

/// Response header carrying the numeric alert code
pub const ALERT_CODE_HEADER: &str = "X-akismet-alert-code";
/// Response header carrying the alert message
pub const ALERT_MSG_HEADER: &str = "X-akismet-alert-msg";
/// Response header carrying the classifier hint
pub const PRO_TIP_HEADER: &str = "X-akismet-pro-tip";

/// Pro-tip value marking spam that can be dropped unseen
pub const PRO_TIP_DISCARD: &str = "discard";
/// Body of a successful key verification
pub const VERIFY_KEY_VALID: &str = "valid";
/// Body of a comment check that found spam
pub const COMMENT_CHECK_SPAM: &str = "true";
/// Body of an accepted spam or ham submission
pub const FEEDBACK_ACCEPTED: &str = "Thanks for making the web a better place.";

/// Form field carrying the API key
pub const API_KEY_FIELD: &str = "api_key";
/// Form field carrying the site URL
pub const BLOG_FIELD: &str = "blog";

/// Remote operations exposed by Akismet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Key verification
    VerifyKey,
    /// Comment classification
    CommentCheck,
    /// Missed-spam report
    SubmitSpam,
    /// False-positive report
    SubmitHam,
    /// Per-site activity report
    KeySites,
    /// Usage limit report
    UsageLimit,
}

impl Endpoint {
    /// Path of the endpoint below the base URL
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::VerifyKey => "/1.1/verify-key",
            Endpoint::CommentCheck => "/1.1/comment-check",
            Endpoint::SubmitSpam => "/1.1/submit-spam",
            Endpoint::SubmitHam => "/1.1/submit-ham",
            Endpoint::KeySites => "/1.2/key-sites",
            Endpoint::UsageLimit => "/1.2/usage-limit",
        }
    }

    /// Short name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Endpoint::VerifyKey => "verify-key",
            Endpoint::CommentCheck => "comment-check",
            Endpoint::SubmitSpam => "submit-spam",
            Endpoint::SubmitHam => "submit-ham",
            Endpoint::KeySites => "key-sites",
            Endpoint::UsageLimit => "usage-limit",
        }
    }

    /// Endpoint receiving a feedback submission
    pub const fn for_feedback(kind: FeedbackKind) -> Self {
        match kind {
            FeedbackKind::Spam => Endpoint::SubmitSpam,
            FeedbackKind::Ham => Endpoint::SubmitHam,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read an alert code the way the API documents it: leading integer digits
///
/// An optional sign and surrounding whitespace are accepted; trailing garbage
/// is ignored and a value with no digits reads as `0`. Values beyond the
/// `i64` range saturate at `i64::MAX` or `i64::MIN`.
pub fn parse_alert_code(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    // Out-of-range codes clamp to the i64 bounds.
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|digit| i64::from(digit - b'0'))
        .fold(0_i64, |value, digit| {
            if negative {
                value.saturating_mul(10).saturating_sub(digit)
            } else {
                value.saturating_mul(10).saturating_add(digit)
            }
        })
}
