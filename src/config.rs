use std::time::Duration;

use crate::error::{EutilsError, Result};
use crate::rate_limit::DEFAULT_INTERVAL;

/// Default E-utilities endpoint
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`EutilsClient`](crate::EutilsClient)
///
/// NCBI requires every request to carry a `tool` name and a contact `email`.
/// Neither has a default; requests fail with a configuration error until
/// both are set.
///
/// # Example
///
/// ```
/// use eutils_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_tool("citation-checker")
///     .with_email("researcher@university.edu")
///     .with_timeout(Duration::from_secs(60));
///
/// assert_eq!(config.effective_base_url(), "https://eutils.ncbi.nlm.nih.gov/entrez/eutils");
/// assert!(config.check_credentials().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub tool: Option<String>,
    pub email: Option<String>,
    pub base_url: Option<String>,
    pub request_interval: Duration,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            tool: None,
            email: None,
            base_url: None,
            request_interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Name of the application making requests, sent as `tool`
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Contact address sent as `email`
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Override the endpoint, e.g. to point at a mock server
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Minimum spacing between two requests
    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    /// HTTP timeout passed to the underlying transport
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("eutils-client/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or_default()
    }

    pub fn effective_email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Fail unless both `email` and `tool` are non-empty
    pub fn check_credentials(&self) -> Result<()> {
        if self.effective_email().trim().is_empty() {
            return Err(EutilsError::ConfigurationError {
                message: "email is not set; use ClientConfig::with_email or EutilsClient::set_email"
                    .to_string(),
            });
        }
        if self.effective_tool().trim().is_empty() {
            return Err(EutilsError::ConfigurationError {
                message: "tool is not set; use ClientConfig::with_tool or EutilsClient::set_tool"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// The `tool` and `email` pairs appended to every request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        vec![
            ("tool".to_string(), self.effective_tool().to_string()),
            ("email".to_string(), self.effective_email().to_string()),
        ]
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
