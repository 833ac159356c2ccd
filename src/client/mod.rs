mod efetch;
mod egquery;
mod einfo;
mod elink;
mod epost;
mod espell;
mod esearch;
mod summary;

pub use epost::EPostResult;

use std::sync::Arc;

use reqwest::blocking::Client;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{EutilsError, Result};
use crate::params::Params;
use crate::rate_limit::RateGate;
use crate::xml::{Value, from_xml};

/// Remote E-utilities functions and their paths below the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    EInfo,
    ESearch,
    EPost,
    ESummary,
    EFetch,
    ELink,
    EGQuery,
    ESpell,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::EInfo => "einfo.fcgi",
            Endpoint::ESearch => "esearch.fcgi",
            Endpoint::EPost => "epost.fcgi",
            Endpoint::ESummary => "esummary.fcgi",
            Endpoint::EFetch => "efetch.fcgi",
            Endpoint::ELink => "elink.fcgi",
            Endpoint::EGQuery => "egquery.fcgi",
            Endpoint::ESpell => "espell.fcgi",
        }
    }
}

/// Response of an operation whose format follows the `retmode` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// `retmode=xml`: the converted document
    Xml(Value),
    /// Any other mode: the body exactly as received
    Text(String),
}

impl Payload {
    pub fn as_xml(&self) -> Option<&Value> {
        match self {
            Payload::Xml(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Xml(_) => None,
        }
    }

    pub fn into_xml(self) -> Option<Value> {
        match self {
            Payload::Xml(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

/// Blocking client for the NCBI E-utilities
///
/// Every request first checks that `tool` and `email` are set, then waits on
/// the rate gate and finally POSTs a form to the endpoint. Unless a gate is
/// injected with [`EutilsClient::with_rate_gate`], all clients in the process
/// share [`RateGate::shared`], so requests from different clients and threads
/// are paced together.
#[derive(Clone)]
pub struct EutilsClient {
    client: Client,
    base_url: String,
    rate_gate: Arc<RateGate>,
    config: ClientConfig,
}

impl EutilsClient {
    /// Create a client identified by `tool` and `email`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eutils_client::EutilsClient;
    ///
    /// let client = EutilsClient::new("eutilstest", "researcher@university.edu");
    /// let names = client.database_names()?;
    /// assert!(names.iter().any(|db| db == "pubmed"));
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    pub fn new(tool: impl Into<String>, email: impl Into<String>) -> Self {
        let config = ClientConfig::new().with_tool(tool).with_email(email);
        Self::with_config(config)
    }

    /// Create a client from a full configuration
    ///
    /// # Example
    ///
    /// ```
    /// use eutils_client::{ClientConfig, EutilsClient};
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new()
    ///     .with_tool("eutilstest")
    ///     .with_email("researcher@university.edu")
    ///     .with_timeout(Duration::from_secs(10));
    ///
    /// let client = EutilsClient::with_config(config);
    /// assert_eq!(client.tool(), "eutilstest");
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self::with_http_client(client, config)
    }

    /// Create a client around an existing `reqwest` blocking client
    ///
    /// The timeout and user agent of `config` are not applied to `client`.
    pub fn with_http_client(client: Client, config: ClientConfig) -> Self {
        Self {
            client,
            base_url: config.effective_base_url().to_string(),
            rate_gate: RateGate::shared(),
            config,
        }
    }

    /// Use `gate` instead of the process-wide gate
    pub fn with_rate_gate(mut self, gate: Arc<RateGate>) -> Self {
        self.rate_gate = gate;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rate_gate(&self) -> &Arc<RateGate> {
        &self.rate_gate
    }

    pub fn tool(&self) -> &str {
        self.config.effective_tool()
    }

    pub fn email(&self) -> &str {
        self.config.effective_email()
    }

    pub fn set_tool(&mut self, tool: impl Into<String>) {
        self.config.tool = Some(tool.into());
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.config.email = Some(email.into());
    }

    /// Send one request and return the response body
    ///
    /// `tool` and `email` always overwrite caller-supplied values.
    #[instrument(skip(self, params), fields(endpoint = endpoint.path()))]
    pub(crate) fn dispatch(&self, endpoint: Endpoint, mut params: Params) -> Result<String> {
        if let Err(err) = self.config.check_credentials() {
            warn!("Refusing to send request: {}", err);
            return Err(err);
        }

        for (key, value) in self.config.build_api_params() {
            params.set(key, value);
        }

        self.rate_gate.wait_for_slot(self.config.request_interval);

        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!(url = %url, param_count = params.len(), "Making E-utilities request");

        let response = self.client.post(&url).form(&params.as_form()).send()?;

        let status = response.status();
        if !status.is_success() {
            warn!("API request failed with status: {}", status);
            return Err(EutilsError::ApiError {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            });
        }

        let body = response.text()?;
        debug!(body_bytes = body.len(), "Received API response");
        Ok(body)
    }

    /// Send a request and convert the XML body
    pub(crate) fn dispatch_xml(&self, endpoint: Endpoint, params: Params) -> Result<Value> {
        let body = self.dispatch(endpoint, params)?;
        from_xml(&body).inspect_err(|err| warn!("Failed to convert response XML: {}", err))
    }

    /// Send a request and convert the body only when `retmode` asks for XML
    pub(crate) fn dispatch_payload(&self, endpoint: Endpoint, params: Params) -> Result<Payload> {
        if params.wants_xml() {
            self.dispatch_xml(endpoint, params).map(Payload::Xml)
        } else {
            self.dispatch(endpoint, params).map(Payload::Text)
        }
    }
}

impl std::fmt::Debug for EutilsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EutilsClient")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
