//! Generic conversion of E-utilities XML responses into nested values
//!
//! Parsing produces an owned [`XmlElement`] tree which is then folded into a
//! [`Value`]: maps keyed by tag name, lists for repeated tags and integer or
//! text scalars for leaves.

mod convert;
mod node;
mod value;

pub use convert::{ATTRIBUTES_KEY, CONTENT_KEY, convert_element, from_xml};
pub use node::{XmlElement, XmlNode, parse_document};
pub use value::{Map, Value};
