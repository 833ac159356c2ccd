use thiserror::Error;

/// Error types for E-utilities client operations
#[derive(Error, Debug)]
pub enum EutilsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// XML parsing failed
    #[error("XML parsing error: {message}")]
    XmlParseError { message: String },

    /// Required client setting (tool or email) is missing
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl EutilsError {
    /// Whether the error was raised before any request was sent because
    /// the client was not fully configured
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, EutilsError::ConfigurationError { .. })
    }

    /// Whether the error came from the network or the remote server
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            EutilsError::RequestError(_) | EutilsError::ApiError { .. }
        )
    }

    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        EutilsError::XmlParseError {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for EutilsError {
    fn from(err: quick_xml::Error) -> Self {
        EutilsError::xml(err)
    }
}

pub type Result<T> = std::result::Result<T, EutilsError>;
