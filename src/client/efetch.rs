//! EFetch: full records from a history-server result set

use tracing::{info, instrument};

use crate::error::Result;
use crate::params::Params;

use super::{Endpoint, EutilsClient, Payload};

impl EutilsClient {
    /// Fetch records of the result set identified by `webenv` and `query_key`
    ///
    /// Defaults to the first ten records as XML (`retmode=xml`, `retstart=0`,
    /// `retmax=10`); any of these can be overridden through `params`. With a
    /// non-XML `retmode` the body is returned verbatim as [`Payload::Text`].
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
    /// let posted = client.epost(&[31978945], "pubmed", Params::new())?;
    /// let (webenv, query_key) = posted.session().expect("upload accepted");
    ///
    /// let params = Params::new().with("retmode", "text").with("rettype", "medline");
    /// let medline = client.efetch("pubmed", webenv, query_key, params)?;
    /// println!("{}", medline.as_text().unwrap_or_default());
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    #[instrument(skip(self, params), fields(db = %db))]
    pub fn efetch(
        &self,
        db: &str,
        webenv: &str,
        query_key: u64,
        mut params: Params,
    ) -> Result<Payload> {
        params.set("db", db.trim());
        params.set("WebEnv", webenv);
        params.set("query_key", query_key);
        params.set_default("retmode", "xml");
        params.set_default("retstart", 0);
        params.set_default("retmax", 10);

        let payload = self.dispatch_payload(Endpoint::EFetch, params)?;

        info!(xml = payload.as_xml().is_some(), "EFetch completed");
        Ok(payload)
    }
}
