//! Configuration structures for FMC clients.
//!
//! This module provides the validated, serializable configuration used to
//! point a client at a management center domain.

use crate::client::{ClientConfig, INTERFACES_DEFAULT_TIMEOUT};
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use uuid::Uuid;
use validator::Validate;

/// Path prefix under which every domain-scoped configuration resource lives.
pub const DOMAIN_API_PREFIX: &str = "api/fmc_config/v1/domain";

/// Configuration for an FMC client instance.
///
/// `base_url` is the domain base URL; every resource path is resolved
/// relative to it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FmcClientConfig {
    /// Domain base URL (e.g. `https://fmc.example.com/api/fmc_config/v1/domain/<uuid>`)
    #[validate(url)]
    pub base_url: String,

    /// Pre-obtained access token sent as `X-auth-access-token`
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether request URLs and payloads are logged
    #[serde(default = "default_enable_logging")]
    pub enable_logging: bool,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    INTERFACES_DEFAULT_TIMEOUT
}

const fn default_enable_logging() -> bool {
    true
}

impl FmcClientConfig {
    /// Create a new client configuration from a domain base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            access_token: None,
            tls_verify: default_tls_verify(),
            request_timeout_secs: default_request_timeout_secs(),
            enable_logging: default_enable_logging(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Create a configuration for a management center host and domain.
    ///
    /// `host` may carry a scheme; `https` is assumed otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting URL is invalid.
    pub fn for_domain(host: &str, domain: Uuid) -> Result<Self, Error> {
        let host = host.trim_end_matches('/');
        let base = if host.contains("://") {
            format!("{host}/{DOMAIN_API_PREFIX}/{domain}")
        } else {
            format!("https://{host}/{DOMAIN_API_PREFIX}/{domain}")
        };
        Self::new(base)
    }

    /// Set the access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::from(token.into()));
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Enable or disable request logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Derive the HTTP client configuration.
    #[must_use]
    pub const fn http_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_timeout(self.timeout())
            .with_tls_verify(self.tls_verify)
            .with_logging(self.enable_logging)
    }
}
