// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! An [`AkismetConfig`] is normally built from the two values Akismet needs on
//! every call, the API key and the protected site URL. Transport settings have
//! defaults and can be overridden through builder methods or `AKISMET_`
//! environment variables.

use std::time::Duration;

use config::{Config, ConfigError, Environment as ConfigEnv};
use serde::{Deserialize, Deserializer, Serialize, de};
use url::Url;

use crate::{
    endpoints::DEFAULT_BASE_URL,
    error::{AkismetError, AkismetResult},
};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;
const ENV_PREFIX: &str = "AKISMET";

/// A validated request timeout in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(u64);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within 1-300
    ///
    /// # Errors
    ///
    /// Returns `AkismetError::Config` if the timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> AkismetResult<Self> {
        if seconds == 0 {
            return Err(AkismetError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }
        if seconds > MAX_TIMEOUT_SECONDS {
            return Err(AkismetError::Config(format!(
                "timeout cannot exceed {MAX_TIMEOUT_SECONDS} seconds"
            )));
        }
        Ok(Self(seconds))
    }

    /// Timeout in seconds
    pub fn seconds(self) -> u64 {
        self.0
    }

    /// Timeout as a duration
    pub fn duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

/// Configuration for the Akismet API client
#[derive(Clone, Serialize, Deserialize)]
pub struct AkismetConfig {
    /// API key sent as `api_key` on every call
    pub api_key: String,
    /// URL of the protected site, sent as `blog` on every call
    pub blog: String,
    /// Base URL of the Akismet REST API
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Request timeout applied by the transport
    #[serde(default)]
    pub timeout_seconds: TimeoutSeconds,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Keeps the API key out of logs and panic messages.
impl std::fmt::Debug for AkismetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AkismetConfig")
            .field("api_key", &"<redacted>")
            .field("blog", &self.blog)
            .field("base_url", &self.base_url.as_str())
            .field("timeout_seconds", &self.timeout_seconds.seconds())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default Akismet URL is valid")
}

fn default_user_agent() -> String {
    concat!("akismet-rs/", env!("CARGO_PKG_VERSION")).to_string()
}

impl AkismetConfig {
    /// Create a configuration for a key and site with default transport settings
    ///
    /// The key is not validated here; use `verify_key` for that.
    pub fn new(api_key: impl Into<String>, blog: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            blog: blog.into(),
            base_url: default_base_url(),
            timeout_seconds: TimeoutSeconds::default(),
            user_agent: default_user_agent(),
        }
    }

    /// Point the client at another API host
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: TimeoutSeconds) -> Self {
        self.timeout_seconds = timeout;
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load configuration from `AKISMET_` environment variables
    ///
    /// Recognised variables: `AKISMET_API_KEY`, `AKISMET_BLOG`,
    /// `AKISMET_BASE_URL`, `AKISMET_TIMEOUT_SECONDS` and `AKISMET_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// Returns `AkismetError::Config` if the key or blog is missing or a value is invalid.
    pub fn from_env() -> AkismetResult<Self> {
        Self::from_environment(env_source())
    }

    /// Load configuration from the given environment source
    ///
    /// # Errors
    ///
    /// Returns `AkismetError::Config` if the key or blog is missing or a value is invalid.
    pub fn from_environment(environment: ConfigEnv) -> AkismetResult<Self> {
        Self::load(environment).map_err(|e| {
            AkismetError::Config(format!("failed to load Akismet configuration: {e}"))
        })
    }

    /// Load configuration from defaults overlaid with the given environment source
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load(environment: ConfigEnv) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("user_agent", default_user_agent())?
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }
}

/// Environment source reading `AKISMET_`-prefixed variables
pub fn env_source() -> ConfigEnv {
    ConfigEnv::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
