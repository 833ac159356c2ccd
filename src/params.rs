//! Request parameters for E-utilities calls

use indexmap::IndexMap;
use std::fmt::Display;

/// Ordered form parameters sent with a request
///
/// Callers pass extra parameters (`retmax`, `sort`, `rettype`, ...) through
/// this type. Operations fill in their defaults with [`Params::set_default`],
/// so a value supplied by the caller is never replaced by a default.
///
/// # Example
///
/// ```
/// use eutils_client::Params;
///
/// let mut params = Params::new().with("retmax", 20).with("sort", "pub_date");
/// params.set_default("retmax", 10);
/// params.set_default("usehistory", "y");
///
/// assert_eq!(params.get("retmax"), Some("20"));
/// assert_eq!(params.get("usehistory"), Some("y"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: IndexMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Params::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.set(key, value);
        self
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    /// Set a parameter only if it has no value yet
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries
            .entry(key.into())
            .or_insert_with(|| value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the response will be XML, i.e. `retmode` is unset or `xml`
    pub(crate) fn wants_xml(&self) -> bool {
        self.get("retmode")
            .is_none_or(|mode| mode == "xml")
    }

    pub(crate) fn as_form(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

/// Join record identifiers into the comma-separated form NCBI expects
pub(crate) fn join_ids<I: Display>(ids: &[I]) -> String {
    ids.iter()
        .map(|id| id.to_string().trim().to_string())
        .collect::<Vec<_>>()
        .join(",")
}
