//! # E-utilities Client
//!
//! A blocking Rust client for the NCBI Entrez Programming Utilities
//! (E-utilities), the web service behind PubMed and the other Entrez databases.
//!
//! ## Features
//!
//! - **All core E-utilities**: EInfo, ESearch, EPost, ESummary, EFetch, ELink,
//!   EGQuery and ESpell
//! - **Generic XML conversion**: responses become nested, order-preserving
//!   [`Value`]s without per-endpoint models
//! - **Process-wide pacing**: every request in the process waits on one shared
//!   [`RateGate`], keeping clients under NCBI's three requests per second
//! - **Error Handling**: one error type separating configuration, parse and
//!   transport failures
//!
//! ## Quick Start
//!
//! ```no_run
//! use eutils_client::{EutilsClient, Params, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // NCBI requires a tool name and a contact email on every request
//!     let client = EutilsClient::new("my-tool", "researcher@university.edu");
//!
//!     let search = client.esearch("asthma", "pubmed", Params::new().with("retmax", 5))?;
//!     let ids: Vec<u64> = search
//!         .get("eSearchResult")
//!         .and_then(|r| r.get("IdList"))
//!         .and_then(|l| l.get("Id"))
//!         .map(|ids| ids.as_slice().iter().filter_map(Value::as_u64).collect())
//!         .unwrap_or_default();
//!
//!     let summaries = client.esummary(&ids, "pubmed", Params::new())?;
//!     println!("{}", serde_json::to_string_pretty(&summaries)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Converting XML directly
//!
//! ```
//! use eutils_client::{Value, from_xml};
//!
//! let doc = from_xml(r#"<Result><Term>autism</Term><Count units="records">42</Count></Result>"#)?;
//! let result = doc.get("Result").unwrap();
//!
//! assert_eq!(result.get("Term").and_then(Value::as_str), Some("autism"));
//! let count = result.get("Count").unwrap();
//! assert_eq!(count.get("content"), Some(&Value::Integer(42)));
//! assert_eq!(
//!     count.get("attributes").and_then(|a| a.get("units")).and_then(Value::as_str),
//!     Some("records")
//! );
//! # Ok::<(), eutils_client::EutilsError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod rate_limit;
pub mod xml;

// Re-export main types for convenience
pub use client::{EPostResult, Endpoint, EutilsClient, Payload};
pub use config::ClientConfig;
pub use error::{EutilsError, Result};
pub use params::Params;
pub use rate_limit::{DEFAULT_INTERVAL, RateGate};
pub use xml::{Value, from_xml};
