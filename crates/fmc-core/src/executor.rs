//! Request execution.
//!
//! Service clients never talk to the network directly. They build a
//! [`PreparedRequest`] and hand it to a [`RequestExecutor`] together with the
//! status code they expect; the executor sends it, enforces that status and
//! returns the raw body, which [`do_request`] decodes into the target type.

use crate::client::ClientConfig;
use crate::context::RequestContext;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("fmc-core/", env!("CARGO_PKG_VERSION"));

/// Header carrying a pre-obtained FMC access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-auth-access-token";

/// A fully built HTTP request, ready to be handed to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: Url,
    /// Serialized JSON body
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// A `GET` request without a body.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    /// A `PUT` request carrying `payload` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if the payload cannot be serialized.
    pub fn put_json<B>(url: Url, payload: &B) -> Result<Self>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(|err| Error::Encode {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            method: Method::PUT,
            url,
            body: Some(body),
        })
    }

    /// Body rendered as text, for diagnostics.
    #[must_use]
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Sends prepared requests and enforces the expected status code.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute `request` and return the response body.
    ///
    /// A response whose status differs from `expected` is a failure.
    async fn execute(
        &self,
        ctx: &RequestContext,
        request: PreparedRequest,
        expected: StatusCode,
    ) -> Result<Vec<u8>>;
}

/// Execute `request` and decode the JSON body into `T`.
///
/// # Errors
///
/// Returns [`Error::Request`] for transport or status failures and
/// [`Error::Decode`] when the body does not match `T`.
pub async fn do_request<T>(
    executor: &dyn RequestExecutor,
    ctx: &RequestContext,
    request: PreparedRequest,
    expected: StatusCode,
) -> Result<T>
where
    T: DeserializeOwned,
{
    let url = request.url.to_string();
    let body = executor.execute(ctx, request, expected).await?;
    decode_body(&url, &body)
}

/// Decode a JSON response body received from `url`.
///
/// # Errors
///
/// Returns [`Error::Decode`] for empty or malformed bodies.
pub fn decode_body<T>(url: &str, bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    if bytes.is_empty() {
        return Err(Error::Decode {
            url: url.to_string(),
            message: "empty response body".to_string(),
        });
    }
    serde_json::from_slice(bytes).map_err(|err| Error::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// [`RequestExecutor`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    http: Client,
    access_token: Option<SecretString>,
    enable_logging: bool,
}

impl HttpExecutor {
    /// Build an executor from the HTTP client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if !config.enable_compression {
            builder = builder.no_gzip();
        }
        if !config.tls_verify {
            warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            access_token: None,
            enable_logging: config.enable_logging,
        })
    }

    /// Attach a pre-obtained access token to every request.
    #[must_use]
    pub fn with_access_token(mut self, token: SecretString) -> Self {
        self.access_token = Some(token);
        self
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(
        &self,
        ctx: &RequestContext,
        request: PreparedRequest,
        expected: StatusCode,
    ) -> Result<Vec<u8>> {
        let url = request.url.to_string();

        let mut builder = self
            .http
            .request(request.method.clone(), request.url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.access_token {
            builder = builder.header(ACCESS_TOKEN_HEADER, token.expose_secret());
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        if self.enable_logging {
            debug!(method = %request.method, url = %url, "FMC request");
        }

        ctx.run(&url, async {
            let response = builder.send().await.map_err(|err| {
                Error::request(url.as_str(), format!("transport failure: {err}"))
            })?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(|err| {
                Error::unexpected_status(
                    url.as_str(),
                    status.as_u16(),
                    format!("failed to read response body: {err}"),
                )
            })?;

            if self.enable_logging {
                debug!(url = %url, status = status.as_u16(), len = bytes.len(), "FMC response");
            }

            if status != expected {
                let text = String::from_utf8_lossy(&bytes);
                return Err(Error::unexpected_status(
                    url.as_str(),
                    status.as_u16(),
                    format!("unexpected status {status} (expected {expected}): {text}"),
                ));
            }

            Ok(bytes.to_vec())
        })
        .await
    }
}
