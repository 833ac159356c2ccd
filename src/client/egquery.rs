//! EGQuery: record counts for one term across all databases

use tracing::{info, instrument};

use crate::error::Result;
use crate::params::Params;
use crate::xml::Value;

use super::{Endpoint, EutilsClient};

impl EutilsClient {
    /// Count records matching `term` in every Entrez database
    ///
    /// The response is always requested as XML.
    ///
    /// # Errors
    ///
    /// * `EutilsError::ConfigurationError` - If `tool` or `email` is not set
    /// * `EutilsError::RequestError` - If the HTTP request fails
    /// * `EutilsError::ApiError` - If the server answers with a non-success status
    /// * `EutilsError::XmlParseError` - If the response is not well-formed XML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eutils_client::EutilsClient;
    ///
    /// let client = EutilsClient::new("eutilstest", "researcher@university.edu");
    /// let result = client.egquery("autism")?;
    /// let term = result.get("Result").and_then(|r| r.get("Term")).and_then(|t| t.as_str());
    /// assert_eq!(term, Some("autism"));
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    #[instrument(skip(self), fields(term = %term))]
    pub fn egquery(&self, term: &str) -> Result<Value> {
        let params = Params::new()
            .with("term", term.trim())
            .with("retmode", "xml");

        let result = self.dispatch_xml(Endpoint::EGQuery, params)?;

        let database_count = result
            .get("Result")
            .and_then(|r| r.get("eGQueryResult"))
            .and_then(|r| r.get("ResultItem"))
            .map_or(0, |items| items.as_slice().len());
        info!(database_count, "EGQuery completed");

        Ok(result)
    }
}
