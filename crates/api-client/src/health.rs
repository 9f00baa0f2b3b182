// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Health check types for spam-check clients

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health status of an API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HealthStatus {
    /// Key accepted and calls are served normally
    Up,
    /// Key accepted but the service is limiting the account
    Degraded { reason: String },
    /// Key rejected; no call will succeed
    Down { reason: String },
}

impl HealthStatus {
    /// Derive a status from a key verification and an optional usage-limit payload
    ///
    /// The usage payload is opaque except for its `throttled` flag.
    pub fn assess(key_valid: bool, usage_limit: Option<&Value>) -> Self {
        if !key_valid {
            return HealthStatus::Down {
                reason: "API key was rejected".to_string(),
            };
        }

        let throttled = usage_limit
            .and_then(|usage| usage.get("throttled"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if throttled {
            HealthStatus::Degraded {
                reason: "usage limit exceeded, requests are throttled".to_string(),
            }
        } else {
            HealthStatus::Up
        }
    }

    /// Check if this health status indicates the service is available
    pub fn is_available(&self) -> bool {
        matches!(self, HealthStatus::Up | HealthStatus::Degraded { .. })
    }

    /// Check if this health status indicates the service is unusable
    pub fn is_down(&self) -> bool {
        matches!(self, HealthStatus::Down { .. })
    }

    /// Get a human-readable description of the status
    pub fn description(&self) -> &str {
        match self {
            HealthStatus::Up => "Service is healthy",
            HealthStatus::Degraded { reason } | HealthStatus::Down { reason } => reason,
        }
    }
}

/// Health check outcome with timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// The health status
    pub status: HealthStatus,
    /// Time spent on the check
    pub response_time: Duration,
    /// When the check finished
    pub timestamp: DateTime<Utc>,
}

impl HealthCheckResult {
    /// Record a finished check
    pub fn new(status: HealthStatus, response_time: Duration) -> Self {
        Self {
            status,
            response_time,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejected_key_is_down() {
        let status = HealthStatus::assess(false, Some(&json!({ "throttled": false })));
        assert!(status.is_down());
        assert!(!status.is_available());
        assert_eq!(status.description(), "API key was rejected");
    }

    #[test]
    fn throttled_key_is_degraded() {
        let usage = json!({
            "limit": 350_000,
            "usage": 360_012,
            "percentage": "102.86",
            "throttled": true
        });

        let status = HealthStatus::assess(true, Some(&usage));
        assert!(matches!(status, HealthStatus::Degraded { .. }));
        assert!(status.is_available());
        assert!(!status.is_down());
    }

    #[test]
    fn unthrottled_or_unknown_usage_is_up() {
        assert_eq!(
            HealthStatus::assess(true, Some(&json!({ "throttled": false }))),
            HealthStatus::Up
        );
        assert_eq!(
            HealthStatus::assess(true, Some(&json!({ "throttled": "yes" }))),
            HealthStatus::Up
        );
        assert_eq!(HealthStatus::assess(true, Some(&json!([]))), HealthStatus::Up);
        assert_eq!(HealthStatus::assess(true, None), HealthStatus::Up);
    }

    #[test]
    fn health_check_result_records_timing() {
        let duration = Duration::from_millis(120);
        let result = HealthCheckResult::new(HealthStatus::Up, duration);

        assert_eq!(result.response_time, duration);
        assert!(result.status.is_available());
        assert!(result.timestamp <= Utc::now());
    }
}
