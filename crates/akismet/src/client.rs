// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Akismet REST API client
//!
//! This module provides [`AkismetClient`], an implementation of the
//! `SpamCheckApi` trait for the Akismet spam-detection service. Every call is a
//! single form-encoded `POST` carrying the configured `api_key` and `blog`.
//! Akismet reports API-level failures through the
//! `X-akismet-alert-code`/`X-akismet-alert-msg` header pair rather than the
//! status code, so those headers are inspected before anything else.

use std::time::Instant;

use api_client::{
    ActivityQuery, ApiError, FormParams, HealthCheckResult, HealthStatus, InboundRequest,
    SpamCheckApi,
};
use reqwest::{Client, header::HeaderMap};
use serde_json::Value;
use shared_types::{FeedbackKind, SpamVerdict};
use tracing::{Span, debug, field, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    comment::enrich_comment_params,
    config::AkismetConfig,
    endpoints::{
        ALERT_CODE_HEADER, ALERT_MSG_HEADER, API_KEY_FIELD, BLOG_FIELD, COMMENT_CHECK_SPAM,
        Endpoint, FEEDBACK_ACCEPTED, PRO_TIP_DISCARD, PRO_TIP_HEADER, VERIFY_KEY_VALID,
        parse_alert_code,
    },
    error::{AkismetError, AkismetResult},
};

/// Akismet API client
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct AkismetClient {
    client: Client,
    config: AkismetConfig,
}

/// Headers and body of a response that carried no alert
#[derive(Debug)]
struct VendorResponse {
    headers: HeaderMap,
    body: String,
}

impl AkismetClient {
    /// Create a client for a key and site with default transport settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(api_key: impl Into<String>, blog: impl Into<String>) -> AkismetResult<Self> {
        Self::with_config(AkismetConfig::new(api_key, blog))
    }

    /// Create a client from a full configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot hold paths or the HTTP client
    /// cannot be created
    pub fn with_config(config: AkismetConfig) -> AkismetResult<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(AkismetError::Config(format!(
                "base URL cannot be used as a base: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout_seconds.duration())
            .user_agent(config.user_agent.as_str())
            .build()?;

        info!(
            base_url = %config.base_url,
            blog = %config.blog,
            timeout_seconds = config.timeout_seconds.seconds(),
            "created Akismet client"
        );

        Ok(Self { client, config })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &AkismetConfig {
        &self.config
    }

    /// Check that the configured key is valid for the configured site
    ///
    /// Returns `true` only when Akismet answers exactly `valid`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    pub async fn verify_key(&self) -> AkismetResult<bool> {
        let response = self.call(Endpoint::VerifyKey, FormParams::new()).await?;
        let valid = response.body == VERIFY_KEY_VALID;

        info!(valid, "verified Akismet API key");
        Ok(valid)
    }

    /// Classify a comment
    ///
    /// `values` holds the comment-check fields (`comment_content`,
    /// `comment_author`, ...). Missing `user_ip`, `user_agent` and `referrer`
    /// are taken from `request`, and its string form fields and a safe subset
    /// of its server parameters are forwarded as extra context.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    #[instrument(skip(self, values, request))]
    pub async fn is_spam<R>(&self, values: FormParams, request: &R) -> AkismetResult<SpamVerdict>
    where
        R: InboundRequest + ?Sized,
    {
        let params = enrich_comment_params(values, request);
        let response = self.call(Endpoint::CommentCheck, params).await?;
        let verdict = comment_verdict(&response.body, &response.headers);

        info!(
            classification = %verdict,
            code = verdict.code(),
            "Akismet comment check: {}",
            verdict.default_message()
        );

        Ok(verdict)
    }

    /// Report a classification mistake
    ///
    /// Returns `true` only when Akismet acknowledges the submission with its
    /// usual thank-you message.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    pub async fn submit_feedback(
        &self,
        kind: FeedbackKind,
        values: FormParams,
    ) -> AkismetResult<bool> {
        let response = self.call(Endpoint::for_feedback(kind), values).await?;
        let accepted = response.body == FEEDBACK_ACCEPTED;

        if accepted {
            info!(kind = %kind, "Akismet accepted feedback");
        } else {
            warn!(kind = %kind, body = %response.body, "Akismet did not acknowledge feedback");
        }

        Ok(accepted)
    }

    /// Report a comment Akismet should have caught
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    pub async fn submit_spam(&self, values: FormParams) -> AkismetResult<bool> {
        self.submit_feedback(FeedbackKind::Spam, values).await
    }

    /// Report a comment Akismet flagged by mistake
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or vendor alerts
    pub async fn submit_ham(&self, values: FormParams) -> AkismetResult<bool> {
        self.submit_feedback(FeedbackKind::Ham, values).await
    }

    /// Fetch per-site activity for the key, decoded but otherwise untouched
    ///
    /// The report is always requested as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, vendor alerts or a body that is
    /// not valid JSON
    pub async fn get_activity(&self, query: &ActivityQuery) -> AkismetResult<Value> {
        let mut params = query.to_form();
        params.insert("format".to_string(), "json".to_string());

        let response = self.call(Endpoint::KeySites, params).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch the usage limit of the key, decoded but otherwise untouched
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, vendor alerts or a body that is
    /// not valid JSON
    pub async fn get_usage_limit(&self) -> AkismetResult<Value> {
        let response = self.call(Endpoint::UsageLimit, FormParams::new()).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Check the key and the account's throttling state
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, vendor alerts or an undecodable
    /// usage report
    pub async fn health_report(&self) -> AkismetResult<HealthCheckResult> {
        let start_time = Instant::now();

        let key_valid = self.verify_key().await?;
        let usage = if key_valid {
            Some(self.get_usage_limit().await?)
        } else {
            None
        };

        let status = HealthStatus::assess(key_valid, usage.as_ref());
        let response_time = start_time.elapsed();

        if status.is_down() {
            warn!("Akismet health check failed: {}", status.description());
        } else {
            info!("Akismet health check passed in {:?}", response_time);
        }

        Ok(HealthCheckResult::new(status, response_time))
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> AkismetResult<Url> {
        // Keep any path prefix of the base URL when joining.
        let mut base_url = self.config.base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        base_url
            .join(endpoint.path().trim_start_matches('/'))
            .map_err(|e| AkismetError::Config(format!("invalid endpoint URL: {e}")))
    }

    /// Send one authenticated request and screen the response for alerts
    #[instrument(skip(self, endpoint, params), fields(endpoint = %endpoint, request_id = field::Empty))]
    async fn call(&self, endpoint: Endpoint, params: FormParams) -> AkismetResult<VendorResponse> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", field::display(request_id));

        let url = self.endpoint_url(endpoint)?;
        let form = merge_credentials(params, &self.config.api_key, &self.config.blog);

        debug!(url = %url, field_count = form.len(), "sending Akismet request");

        let response = self.client.post(url).form(&form).send().await?;
        let status = response.status();

        if let Some((code, message)) = alert_from_headers(response.headers()) {
            warn!(
                status = status.as_u16(),
                alert_code = code,
                alert_message = %message,
                "Akismet returned an alert"
            );
            return Err(AkismetError::VendorAlert { code, message });
        }

        let response = response.error_for_status().inspect_err(|_| {
            warn!(status = status.as_u16(), "Akismet request failed");
        })?;

        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!(
            status = status.as_u16(),
            body_length = body.len(),
            "received Akismet response"
        );

        Ok(VendorResponse { headers, body })
    }
}

impl SpamCheckApi for AkismetClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        Ok(self.health_report().await?.status)
    }

    async fn verify_key(&self) -> Result<bool, ApiError> {
        Ok(AkismetClient::verify_key(self).await?)
    }

    async fn is_spam<R>(&self, values: FormParams, request: &R) -> Result<SpamVerdict, ApiError>
    where
        R: InboundRequest + Sync,
    {
        Ok(AkismetClient::is_spam(self, values, request).await?)
    }

    async fn submit_feedback(
        &self,
        kind: FeedbackKind,
        values: FormParams,
    ) -> Result<bool, ApiError> {
        Ok(AkismetClient::submit_feedback(self, kind, values).await?)
    }

    async fn get_activity(&self, query: &ActivityQuery) -> Result<Value, ApiError> {
        Ok(AkismetClient::get_activity(self, query).await?)
    }

    async fn get_usage_limit(&self) -> Result<Value, ApiError> {
        Ok(AkismetClient::get_usage_limit(self).await?)
    }

    fn name(&self) -> &'static str {
        "akismet"
    }
}

/// Add the credentials every Akismet call carries
///
/// The configured `api_key` and `blog` replace caller fields of the same name;
/// every other caller field is kept as given.
pub fn merge_credentials(mut params: FormParams, api_key: &str, blog: &str) -> FormParams {
    params.insert(API_KEY_FIELD.to_string(), api_key.to_string());
    params.insert(BLOG_FIELD.to_string(), blog.to_string());
    params
}

/// Alert code and message, when both alert headers are present
fn alert_from_headers(headers: &HeaderMap) -> Option<(i64, String)> {
    let code = headers.get(ALERT_CODE_HEADER)?;
    let message = headers.get(ALERT_MSG_HEADER)?;

    Some((
        parse_alert_code(&String::from_utf8_lossy(code.as_bytes())),
        String::from_utf8_lossy(message.as_bytes()).into_owned(),
    ))
}

/// Map a comment-check body and its pro-tip header to a verdict
fn comment_verdict(body: &str, headers: &HeaderMap) -> SpamVerdict {
    if body != COMMENT_CHECK_SPAM {
        return SpamVerdict::Ham;
    }

    let discard = headers
        .get(PRO_TIP_HEADER)
        .is_some_and(|tip| tip.as_bytes() == PRO_TIP_DISCARD.as_bytes());

    if discard {
        SpamVerdict::Discard
    } else {
        SpamVerdict::Spam
    }
}
