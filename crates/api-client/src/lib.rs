// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic API client traits and utilities for spam-check integrations
//!
//! This crate provides the transport-agnostic side of a spam-check client:
//! what a client can do, what it needs from the web request being checked,
//! and how its failures are classified.
//!
//! # Core Abstractions
//!
//! - **`SpamCheckApi` Trait**: Common async interface for spam-check services
//! - **`InboundRequest` Trait**: Read-only view of the request being classified
//! - **Health Check System**: Standardized health status reporting
//! - **Error Handling**: `ApiError` variants for transport, vendor and decode failures
//! - **Request Types**: [`FormParams`] and [`ActivityQuery`]

use serde_json::Value;
use shared_types::{FeedbackKind, SpamVerdict};
use thiserror::Error;

pub mod health;
pub mod inbound;
pub mod types;

pub use health::*;
pub use inbound::*;
pub use types::*;

/// Generic trait for spam-check API clients
///
/// Every operation is a single request/response exchange with the remote
/// service. Implementations hold no mutable state, so one client can be shared
/// between concurrent callers.
pub trait SpamCheckApi: Send + Sync {
    /// Check the health of this API client
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or rejects the call
    fn health_check(&self) -> impl Future<Output = Result<HealthStatus, ApiError>> + Send;

    /// Check that the configured API key is accepted by the service
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    fn verify_key(&self) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Classify a submission, enriching `values` from the inbound request
    ///
    /// # Arguments
    ///
    /// * `values` - Caller-supplied comment fields (`comment_content`, `user_ip`, ...)
    /// * `request` - The web request that carried the submission
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    fn is_spam<R>(
        &self,
        values: FormParams,
        request: &R,
    ) -> impl Future<Output = Result<SpamVerdict, ApiError>> + Send
    where
        R: InboundRequest + Sync;

    /// Report a classification mistake back to the service
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    fn submit_feedback(
        &self,
        kind: FeedbackKind,
        values: FormParams,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Report content the service should have flagged as spam
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    fn submit_spam(&self, values: FormParams) -> impl Future<Output = Result<bool, ApiError>> + Send {
        self.submit_feedback(FeedbackKind::Spam, values)
    }

    /// Report content the service flagged by mistake
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    fn submit_ham(&self, values: FormParams) -> impl Future<Output = Result<bool, ApiError>> + Send {
        self.submit_feedback(FeedbackKind::Ham, values)
    }

    /// Fetch per-site activity for the configured key
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, vendor alerts or undecodable bodies
    fn get_activity(
        &self,
        query: &ActivityQuery,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// Fetch the usage limit of the configured key
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, vendor alerts or undecodable bodies
    fn get_usage_limit(&self) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// Get the name/identifier of this API client
    fn name(&self) -> &'static str;
}

/// Common errors that can occur when working with API clients
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Network timeout
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// The service answered with its alert header pair
    #[error("Vendor alert {code}: {message}")]
    VendorAlert { code: i64, message: String },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Client independent error
    #[error(transparent)]
    Custom { error: anyhow::Error },
}

impl ApiError {
    /// Check if this error carries a vendor alert
    pub fn is_vendor_alert(&self) -> bool {
        matches!(self, ApiError::VendorAlert { .. })
    }

    /// Vendor alert code, if this error carries one
    pub fn alert_code(&self) -> Option<i64> {
        match self {
            ApiError::VendorAlert { code, .. } => Some(*code),
            _ => None,
        }
    }
}
