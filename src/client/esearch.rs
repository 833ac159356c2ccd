//! ESearch: query a database for matching identifiers

use tracing::{info, instrument};

use crate::error::Result;
use crate::params::Params;
use crate::xml::Value;

use super::{Endpoint, EutilsClient};

impl EutilsClient {
    /// Search `db` for `term`
    ///
    /// `term` and `db` are trimmed. Results are kept on the history server
    /// (`usehistory=y`) unless `params` says otherwise.
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
    /// use eutils_client::{EutilsClient, Params};
    ///
    /// let client = EutilsClient::new("eutilstest", "researcher@university.edu");
    /// let result = client.esearch("autism", "pubmed", Params::new().with("retmax", 5))?;
    /// let search = result.get("eSearchResult").unwrap();
    /// println!("{:?} hits", search.get("Count"));
    /// println!("WebEnv: {:?}", search.get("WebEnv"));
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    #[instrument(skip(self, params), fields(term = %term, db = %db))]
    pub fn esearch(&self, term: &str, db: &str, mut params: Params) -> Result<Value> {
        params.set("term", term.trim());
        params.set("db", db.trim());
        params.set_default("usehistory", "y");

        let result = self.dispatch_xml(Endpoint::ESearch, params)?;

        let count = result
            .get("eSearchResult")
            .and_then(|r| r.get("Count"))
            .and_then(Value::as_u64);
        info!(count = ?count, "ESearch completed");

        Ok(result)
    }
}
