//! ELink: related records within or across databases

use std::fmt::Display;

use tracing::{info, instrument};

use crate::error::Result;
use crate::params::{Params, join_ids};

use super::{Endpoint, EutilsClient, Payload};

impl EutilsClient {
    /// Find links for `ids`
    ///
    /// Defaults to neighbors within PubMed (`cmd=neighbor`, `dbfrom=pubmed`,
    /// `db=pubmed`) returned as XML. Override any of them through `params`,
    /// e.g. `dbfrom=pubmed&db=pmc` for PMC links or `cmd=llinks` for LinkOut.
    ///
    /// # Errors
    ///
    /// * `EutilsError::ConfigurationError` - If `tool` or `email` is not set
    /// * `EutilsError::RequestError` - If the HTTP request fails
    /// * `EutilsError::ApiError` - If the server answers with a non-success status
    /// * `EutilsError::XmlParseError` - If `retmode` is `xml` and the response is not well-formed XML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eutils_client::{EutilsClient, Params};
    ///
    /// let client = EutilsClient::new("eutilstest", "researcher@university.edu");
    /// let links = client.elink(&[31978945], Params::new().with("db", "pmc"))?;
    /// let result = links.as_xml().and_then(|v| v.get("eLinkResult"));
    /// println!("{:?}", result.and_then(|r| r.get("LinkSet")));
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    #[instrument(skip(self, ids, params), fields(ids_count = ids.len()))]
    pub fn elink<I: Display>(&self, ids: &[I], mut params: Params) -> Result<Payload> {
        params.set("id", join_ids(ids));
        params.set_default("cmd", "neighbor");
        params.set_default("dbfrom", "pubmed");
        params.set_default("db", "pubmed");
        params.set_default("retmode", "xml");

        let payload = self.dispatch_payload(Endpoint::ELink, params)?;

        info!(xml = payload.as_xml().is_some(), "ELink completed");
        Ok(payload)
    }
}
