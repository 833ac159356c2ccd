//! ESpell: spelling suggestions for a search term

use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, instrument};

use crate::error::Result;
use crate::params::Params;

use super::{Endpoint, EutilsClient};

impl EutilsClient {
    /// Suggest a corrected spelling of `term` for PubMed searches
    ///
    /// Returns the trimmed `term` unchanged when the service has no correction.
    ///
    /// # Errors
    ///
    /// * `EutilsError::ConfigurationError` - If `tool` or `email` is not set
    /// * `EutilsError::RequestError` - If the HTTP request fails
    /// * `EutilsError::ApiError` - If the server answers with a non-success status
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eutils_client::EutilsClient;
    ///
    /// let client = EutilsClient::new("eutilstest", "researcher@university.edu");
    /// assert_eq!(client.espell("brest cancr")?, "breast cancer");
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    pub fn espell(&self, term: &str) -> Result<String> {
        self.espell_db(term, "pubmed")
    }

    /// Suggest a corrected spelling of `term` against a specific database
    ///
    /// Suggestions are database-specific, so use the database you plan to search.
    ///
    /// # Errors
    ///
    /// * `EutilsError::ConfigurationError` - If `tool` or `email` is not set
    /// * `EutilsError::RequestError` - If the HTTP request fails
    /// * `EutilsError::ApiError` - If the server answers with a non-success status
    #[instrument(skip(self), fields(term = %term, db = %db))]
    pub fn espell_db(&self, term: &str, db: &str) -> Result<String> {
        let term = term.trim();
        let params = Params::new().with("db", db.trim()).with("term", term);

        let body = self.dispatch(Endpoint::ESpell, params)?;
        let corrected = Self::parse_espell_response(&body, term);

        let changed = corrected != term;
        info!(corrected = %corrected, changed, "ESpell completed");
        Ok(corrected)
    }

    /// First `<CorrectedQuery>` of the body, or `term` when there is none
    pub(crate) fn parse_espell_response(body: &str, term: &str) -> String {
        static CORRECTED_QUERY: OnceLock<Regex> = OnceLock::new();
        let re = CORRECTED_QUERY.get_or_init(|| {
            Regex::new(r"<CorrectedQuery>(.+)</CorrectedQuery>")
                .expect("Failed to compile CorrectedQuery regex")
        });

        re.captures(body)
            .map(|caps| caps[1].to_string())
            .filter(|corrected| !corrected.is_empty())
            .unwrap_or_else(|| term.to_string())
    }
}
