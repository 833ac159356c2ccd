//! EInfo: database list and per-database statistics

use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, instrument};

use crate::error::Result;
use crate::params::Params;
use crate::xml::Value;

use super::{Endpoint, EutilsClient};

impl EutilsClient {
    /// List the names of all Entrez databases
    ///
    /// Calls EInfo without a database and collects every `<DbName>` in the
    /// response, in order.
    ///
    /// # Errors
    ///
    /// * `EutilsError::ConfigurationError` - If `tool` or `email` is not set
    /// * `EutilsError::RequestError` - If the HTTP request fails
    /// * `EutilsError::ApiError` - If the server answers with a non-success status
    #[instrument(skip(self))]
    pub fn database_names(&self) -> Result<Vec<String>> {
        let body = self.dispatch(Endpoint::EInfo, Params::new())?;
        let names = Self::parse_database_names(&body);

        info!(database_count = names.len(), "EInfo database list completed");
        Ok(names)
    }

    /// Field index term counts, last update and available links for `db`
    ///
    /// `db` is trimmed. A blank `db` asks for the database list instead,
    /// returned in converted form.
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
    /// let info = client.einfo("pubmed")?;
    /// let db_name = info
    ///     .get("eInfoResult")
    ///     .and_then(|r| r.get("DbInfo"))
    ///     .and_then(|d| d.get("DbName"))
    ///     .and_then(|n| n.as_str());
    /// assert_eq!(db_name, Some("pubmed"));
    /// # Ok::<(), eutils_client::EutilsError>(())
    /// ```
    #[instrument(skip(self), fields(db = %db))]
    pub fn einfo(&self, db: &str) -> Result<Value> {
        let db = db.trim();
        let mut params = Params::new();
        if !db.is_empty() {
            params.set("db", db);
        }

        let result = self.dispatch_xml(Endpoint::EInfo, params)?;

        info!(db = %db, "EInfo completed");
        Ok(result)
    }

    pub(crate) fn parse_database_names(body: &str) -> Vec<String> {
        static DB_NAME: OnceLock<Regex> = OnceLock::new();
        let re = DB_NAME.get_or_init(|| {
            Regex::new(r"<DbName>(\w+)</DbName>").expect("Failed to compile DbName regex")
        });

        re.captures_iter(body)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}
