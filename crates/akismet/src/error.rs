// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for Akismet API calls

use api_client::ApiError;
use thiserror::Error;

/// Result type alias for Akismet operations
pub type AkismetResult<T> = Result<T, AkismetError>;

/// Errors raised by the Akismet client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AkismetError {
    /// Akismet answered with its alert header pair
    #[error("Akismet alert {code}: {message}")]
    VendorAlert { code: i64, message: String },

    /// A body expected to hold JSON could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// HTTP transport failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AkismetError {
    /// Alert code and message, if this is a vendor alert
    pub fn alert(&self) -> Option<(i64, &str)> {
        match self {
            AkismetError::VendorAlert { code, message } => Some((*code, message.as_str())),
            _ => None,
        }
    }

    /// Check if the transport gave up waiting for a response
    pub fn is_timeout(&self) -> bool {
        matches!(self, AkismetError::Http(error) if error.is_timeout())
    }
}

impl From<config::ConfigError> for AkismetError {
    fn from(error: config::ConfigError) -> Self {
        AkismetError::Config(error.to_string())
    }
}

impl From<AkismetError> for ApiError {
    fn from(value: AkismetError) -> Self {
        match value {
            AkismetError::VendorAlert { code, message } => ApiError::VendorAlert { code, message },
            AkismetError::Decode(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            AkismetError::Http(error) if error.is_timeout() => ApiError::Timeout {
                message: error.to_string(),
            },
            AkismetError::Http(error) => match error.status() {
                Some(status) => ApiError::Custom {
                    error: anyhow::Error::msg(format!("{status}: {error}")),
                },
                None => ApiError::Http {
                    message: error.to_string(),
                },
            },
            AkismetError::Config(message) => ApiError::Configuration { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_alert_accessors() {
        let error = AkismetError::VendorAlert {
            code: 123,
            message: "Bad key".to_string(),
        };

        assert_eq!(error.alert(), Some((123, "Bad key")));
        assert!(!error.is_timeout());
        assert_eq!(error.to_string(), "Akismet alert 123: Bad key");
    }

    #[test]
    fn decode_error_keeps_parser_message() {
        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let expected = parse_error.to_string();

        let error = AkismetError::from(parse_error);
        assert!(error.alert().is_none());
        assert!(error.to_string().contains(&expected));
    }

    #[test]
    fn conversion_into_api_error() {
        let alert: ApiError = AkismetError::VendorAlert {
            code: 10001,
            message: "Your site is using an expired Yahoo! Small Business API key.".to_string(),
        }
        .into();
        assert_eq!(alert.alert_code(), Some(10001));

        let decode: ApiError = AkismetError::from(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        )
        .into();
        assert!(matches!(decode, ApiError::InvalidResponse { .. }));

        let config: ApiError = AkismetError::Config("timeout must be greater than 0".into()).into();
        match config {
            ApiError::Configuration { message } => {
                assert_eq!(message, "timeout must be greater than 0");
            }
            other => panic!("Expected Configuration error, got: {other:?}"),
        }
    }
}
