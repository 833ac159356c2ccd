//! EPost: upload identifiers to the history server

use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::params::{Params, join_ids};

use super::{Endpoint, EutilsClient};

/// History-server handle returned by EPost
///
/// Both fields are `None` when the service rejected the batch, for example
/// because the database name is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EPostResult {
    pub webenv: Option<String>,
    pub query_key: Option<u64>,
}

impl EPostResult {
    /// Both the WebEnv and the query key, if the upload was accepted
    pub fn session(&self) -> Option<(&str, u64)> {
        Some((self.webenv.as_deref()?, self.query_key?))
    }

    pub fn is_accepted(&self) -> bool {
        self.session().is_some()
    }
}

impl EutilsClient {
    /// Post `ids` to the history server of `db`
    ///
    /// A rejected upload is not an error: the returned [`EPostResult`] simply
    /// carries no WebEnv and no query key.
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
    /// use eutils_client::{EutilsClient, Params};
    ///
    /// let client = EutilsClient::new("eutilstest", "researcher@university.edu");
    /// let posted = client.epost(&[11877539, 11822933, 11871444], "pubmed", Params::new())?;
    /// if let Some((webenv, query_key)) = posted.session() {
    ///     let records = client.efetch("pubmed", webenv, query_key, Params::new())?;
    ///     println!("{:?}", records.as_xml());
    /// }
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    #[instrument(skip(self, ids, params), fields(ids_count = ids.len(), db = %db))]
    pub fn epost<I: Display>(&self, ids: &[I], db: &str, mut params: Params) -> Result<EPostResult> {
        params.set("id", join_ids(ids));
        params.set("db", db.trim());

        let body = self.dispatch(Endpoint::EPost, params)?;
        let result = Self::parse_epost_response(&body);

        match result.session() {
            Some((_, query_key)) => info!(query_key, "EPost completed"),
            None => warn!("EPost returned no history session"),
        }

        Ok(result)
    }

    pub(crate) fn parse_epost_response(body: &str) -> EPostResult {
        static QUERY_KEY: OnceLock<Regex> = OnceLock::new();
        static WEBENV: OnceLock<Regex> = OnceLock::new();

        let query_key_re = QUERY_KEY.get_or_init(|| {
            Regex::new(r"<QueryKey>(\d+)</QueryKey>").expect("Failed to compile QueryKey regex")
        });
        let webenv_re = WEBENV.get_or_init(|| {
            Regex::new(r"<WebEnv>(\S+)</WebEnv>").expect("Failed to compile WebEnv regex")
        });

        let query_key = query_key_re
            .captures(body)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .filter(|key| *key != 0);

        let webenv = webenv_re
            .captures(body)
            .map(|caps| caps[1].to_string());

        EPostResult { webenv, query_key }
    }
}
