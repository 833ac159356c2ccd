//! ESummary: document summaries for a list of identifiers

use std::fmt::Display;

use tracing::{info, instrument};

use crate::error::Result;
use crate::params::{Params, join_ids};
use crate::xml::Value;

use super::{Endpoint, EutilsClient};

impl EutilsClient {
    /// Retrieve document summaries for `ids` from `db`
    ///
    /// Each `<DocSum>` of the response appears under `eSummaryResult`; with
    /// more than one identifier they form a list in request order.
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
    /// use eutils_client::{EutilsClient, Params, Value};
    ///
    /// let client = EutilsClient::new("eutilstest", "researcher@university.edu");
    /// let result = client.esummary(&[11850928, 11482001], "pubmed", Params::new())?;
    /// let docsums = result.get("eSummaryResult").and_then(|r| r.get("DocSum")).unwrap();
    /// for docsum in docsums.as_slice() {
    ///     println!("{:?}", docsum.get("Id").and_then(Value::as_u64));
    /// }
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    #[instrument(skip(self, ids, params), fields(ids_count = ids.len(), db = %db))]
    pub fn esummary<I: Display>(&self, ids: &[I], db: &str, mut params: Params) -> Result<Value> {
        params.set("id", join_ids(ids));
        params.set("db", db.trim());

        let result = self.dispatch_xml(Endpoint::ESummary, params)?;

        let docsum_count = result
            .get("eSummaryResult")
            .and_then(|r| r.get("DocSum"))
            .map_or(0, |d| d.as_slice().len());
        info!(docsum_count, "ESummary completed");

        Ok(result)
    }
}
