// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Async client for the Akismet spam-detection API
//!
//! This crate implements the `SpamCheckApi` trait against Akismet's REST API:
//! key verification, comment classification, spam/ham feedback and the
//! activity and usage reports.
//!
//! # Architecture
//!
//! - [`client`]: [`AkismetClient`] and the request/response plumbing
//! - [`comment`]: comment-check fields derived from the inbound web request
//! - [`config`]: client configuration and `AKISMET_` environment loading
//! - [`endpoints`]: endpoint paths and wire constants
//! - [`error`]: [`AkismetError`] and its mapping into `ApiError`
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use akismet::AkismetClient;
//! use api_client::{FormParams, ServerRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AkismetClient::new("your-api-key", "https://example.com")?;
//!
//! let mut values = FormParams::new();
//! values.insert("comment_type".to_string(), "comment".to_string());
//! values.insert("comment_content".to_string(), "Buy cheap watches!".to_string());
//!
//! let request = ServerRequest::new().with_server_param("REMOTE_ADDR", "203.0.113.9");
//! let verdict = client.is_spam(values, &request).await?;
//!
//! if verdict.should_discard() {
//!     println!("dropping blatant spam");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod comment;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::{AkismetClient, merge_credentials};
pub use config::{AkismetConfig, TimeoutSeconds};
pub use endpoints::Endpoint;
pub use error::{AkismetError, AkismetResult};
