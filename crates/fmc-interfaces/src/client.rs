//! Asynchronous physical-interface client implementation.

use crate::models::{Ipv4Addressing, PhysicalInterface, PhysicalInterfaceList};
use crate::Result;
use fmc_core::client::{ClientConfig, INTERFACES_DEFAULT_TIMEOUT};
use fmc_core::config::FmcClientConfig;
use fmc_core::executor::do_request;
use fmc_core::{Error, HttpExecutor, PreparedRequest, RequestContext, RequestExecutor};
use reqwest::StatusCode;
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument, Span};
use url::Url;

/// Builder for [`InterfaceClient`].
#[derive(Clone)]
pub struct InterfaceClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    access_token: Option<SecretString>,
    executor: Option<Arc<dyn RequestExecutor>>,
    span: Option<Span>,
}

impl InterfaceClientBuilder {
    /// Create a new builder from the domain base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(base_url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "FMC base URL `{url}` cannot carry resource paths"
            )));
        }

        Ok(Self {
            base_url: url,
            http_config: ClientConfig::new()
                .with_timeout(Duration::from_secs(INTERFACES_DEFAULT_TIMEOUT)),
            access_token: None,
            executor: None,
            span: None,
        })
    }

    /// Create a builder from a validated client configuration.
    pub fn from_config(config: &FmcClientConfig) -> Result<Self> {
        let mut builder = Self::new(&config.base_url)?.with_http_config(config.http_config());
        builder.access_token.clone_from(&config.access_token);
        Ok(builder)
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Send a pre-obtained access token with every request.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::from(token.into()));
        self
    }

    /// Use a caller-supplied request executor instead of the built-in
    /// `reqwest` one. HTTP configuration and token are then ignored.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn RequestExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Span every operation is recorded under.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Build the client instance.
    pub fn build(self) -> Result<InterfaceClient> {
        let executor = match self.executor {
            Some(executor) => executor,
            None => {
                let mut http = HttpExecutor::new(&self.http_config)?;
                if let Some(token) = self.access_token {
                    http = http.with_access_token(token);
                }
                Arc::new(http)
            }
        };
        let span = self
            .span
            .unwrap_or_else(|| info_span!("fmc_interfaces", base_url = %self.base_url));

        Ok(InterfaceClient {
            executor,
            base_url: self.base_url,
            log_payloads: self.http_config.enable_logging,
            span,
        })
    }
}

/// Asynchronous client for device physical interfaces.
#[derive(Clone)]
pub struct InterfaceClient {
    executor: Arc<dyn RequestExecutor>,
    base_url: Url,
    log_payloads: bool,
    span: Span,
}

impl InterfaceClient {
    /// Construct directly from a domain base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        InterfaceClientBuilder::new(base_url)?.build()
    }

    /// Construct from a validated client configuration.
    pub fn from_config(config: &FmcClientConfig) -> Result<Self> {
        InterfaceClientBuilder::from_config(config)?.build()
    }

    /// Access the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List every physical interface of a device, in server order.
    pub async fn list(&self, ctx: &RequestContext, device_id: &str) -> Result<Vec<PhysicalInterface>> {
        async {
            let url = self.collection_url(device_id)?;
            self.fetch_collection(ctx, url).await
        }
        .instrument(self.span.clone())
        .await
        .map(|collection| collection.items)
    }

    /// Fetch the interface whose name equals `name` exactly.
    ///
    /// The first match in server order wins.
    pub async fn get_by_name(
        &self,
        ctx: &RequestContext,
        device_id: &str,
        name: &str,
    ) -> Result<PhysicalInterface> {
        async {
            info!(device_id, name, "Fetching physical interface by name");
            let url = self.collection_url(device_id)?;
            let collection = self.fetch_collection(ctx, url.clone()).await?;
            find_by_name(collection.items, name).ok_or_else(|| {
                Error::NotFound(format!(
                    "no physical interface named `{name}` on device {device_id}: {url}"
                ))
            })
        }
        .instrument(self.span.clone())
        .await
    }

    /// Fetch an interface by its server-assigned identifier.
    ///
    /// A missing interface normally surfaces as [`Error::Request`] with a
    /// `404` status; [`Error::NotFound`] is only returned when the server
    /// answers successfully with `null` or an object without an id.
    pub async fn get_by_id(
        &self,
        ctx: &RequestContext,
        device_id: &str,
        interface_id: &str,
    ) -> Result<PhysicalInterface> {
        async {
            let url = self.resource_url(device_id, Some(interface_id))?;
            info!(url = %url, "Fetching physical interface by id");

            let decoded: Option<PhysicalInterface> = do_request(
                self.executor.as_ref(),
                ctx,
                PreparedRequest::get(url.clone()),
                StatusCode::OK,
            )
            .await?;

            let Some(interface) = decoded.filter(|interface| !interface.is_empty()) else {
                return Err(Error::NotFound(format!(
                    "no physical interface with id `{interface_id}` on device {device_id}: {url}"
                )));
            };
            debug!(id = %interface.id, name = %interface.name, "Fetched physical interface");
            Ok(interface)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Replace an interface's configuration and return the server's result.
    ///
    /// Every field of `desired` is sent; unset optional settings are omitted
    /// and the server treats them as cleared.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        device_id: &str,
        interface_id: &str,
        desired: &PhysicalInterface,
    ) -> Result<PhysicalInterface> {
        async {
            let url = self.resource_url(device_id, Some(interface_id))?;

            if !desired.id.is_empty() && desired.id != interface_id {
                warn!(
                    interface_id,
                    body_id = %desired.id,
                    "Update body id differs from target interface"
                );
            }
            if let Some(Ipv4Addressing::Ambiguous) =
                desired.ipv4.as_ref().map(|ipv4| ipv4.addressing())
            {
                warn!(interface_id, "Update carries both static and DHCP IPv4 settings");
            }

            let request = PreparedRequest::put_json(url.clone(), desired)?;
            info!(url = %url, "Updating physical interface");
            if self.log_payloads {
                // Carries interface configuration verbatim.
                debug!(body = %request.body_text().unwrap_or_default(), "Update request body");
            }

            let updated: PhysicalInterface =
                do_request(self.executor.as_ref(), ctx, request, StatusCode::OK).await?;
            debug!(id = %updated.id, name = %updated.name, "Physical interface updated");
            Ok(updated)
        }
        .instrument(self.span.clone())
        .await
    }

    fn collection_url(&self, device_id: &str) -> Result<Url> {
        let mut url = self.resource_url(device_id, None)?;
        url.query_pairs_mut().append_pair("expanded", "true");
        Ok(url)
    }

    async fn fetch_collection(&self, ctx: &RequestContext, url: Url) -> Result<PhysicalInterfaceList> {
        info!(url = %url, "Listing physical interfaces");

        do_request(self.executor.as_ref(), ctx, PreparedRequest::get(url), StatusCode::OK).await
    }

    fn resource_url(&self, device_id: &str, interface_id: Option<&str>) -> Result<Url> {
        if device_id.is_empty() {
            return Err(Error::request(
                self.base_url.as_str(),
                "device id must not be empty",
            ));
        }
        if interface_id.is_some_and(str::is_empty) {
            return Err(Error::request(
                self.base_url.as_str(),
                "interface id must not be empty",
            ));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                Error::request(self.base_url.as_str(), "base URL cannot carry a path")
            })?;
            segments
                .pop_if_empty()
                .extend(["devices", "devicerecords", device_id, "physicalinterfaces"]);
            if let Some(id) = interface_id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

fn find_by_name(items: Vec<PhysicalInterface>, name: &str) -> Option<PhysicalInterface> {
    items.into_iter().find(|candidate| {
        debug!(
            id = %candidate.id,
            name = %candidate.name,
            kind = %candidate.kind,
            "Physical interface candidate"
        );
        candidate.name == name
    })
}
