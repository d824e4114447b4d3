use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect::Policy};
use tracing::{debug, trace};

use crate::{ProbeConfig, ProbeError, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMethod {
    Head,
    Get,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Head => "HEAD",
            ProbeMethod::Get => "GET",
        }
    }
}

/// Response headers of a single hop. Bodies are never consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    /// Raw `Location` header, if any
    pub location: Option<String>,
}

impl ProbeResponse {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            location: None,
        }
    }

    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: Some(location.into()),
        }
    }
}

/// Performs a single request hop.
///
/// Implementations must not follow redirects or apply their own overall
/// deadline; the prober owns both policies.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    async fn request(&self, method: ProbeMethod, url: &str)
    -> Result<ProbeResponse, TransportError>;
}

pub fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
            // Another crate may have installed one first.
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        install_rustls_provider();

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::none())
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client. It must be built with `Policy::none()`,
    /// otherwise redirect hops are invisible to the prober.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProbeTransport for HttpTransport {
    async fn request(
        &self,
        method: ProbeMethod,
        url: &str,
    ) -> Result<ProbeResponse, TransportError> {
        let request = match method {
            ProbeMethod::Head => self.client.head(url),
            ProbeMethod::Get => self.client.get(url),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        trace!(method = method.as_str(), %url, status, "Probe hop complete");
        Ok(ProbeResponse { status, location })
    }
}
