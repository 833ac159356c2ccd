use crate::error::Result;
use crate::xml::node::{XmlElement, parse_document};
use crate::xml::value::{Map, Value};

/// Key under which an element's own attributes are stored
///
/// A child element that is itself named `attributes` shares this key: when
/// the parent also has attributes, both values are collected into a list,
/// attribute map first.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Key holding the text of an element that also carries attributes
pub const CONTENT_KEY: &str = "content";

/// Convert an XML document into a nested [`Value`]
///
/// The result is a map with a single entry: the root element's tag name
/// mapped to the converted root.
///
/// # Errors
///
/// Returns `EutilsError::XmlParseError` if `xml` is not well-formed.
///
/// # Example
///
/// ```
/// use eutils_client::{Value, from_xml};
///
/// let xml = r#"<eSummaryResult>
///     <DocSum><Id>11850928</Id></DocSum>
///     <DocSum><Id>11482001</Id></DocSum>
/// </eSummaryResult>"#;
///
/// let doc = from_xml(xml).unwrap();
/// let docsums = doc.get("eSummaryResult").and_then(|r| r.get("DocSum")).unwrap();
/// assert_eq!(docsums.as_slice().len(), 2);
/// assert_eq!(docsums.at(0).and_then(|d| d.get("Id")), Some(&Value::Integer(11850928)));
/// ```
pub fn from_xml(xml: &str) -> Result<Value> {
    let root = parse_document(xml)?;
    let mut document = Map::new();
    document.insert(root.name.clone(), convert_element(&root));
    Ok(Value::Map(document))
}

/// Convert a single element, recursing into its children
pub fn convert_element(element: &XmlElement) -> Value {
    let has_child_elements = element.has_child_elements();

    if !has_child_elements && element.attributes.is_empty() {
        let text = element.text();
        return if text.is_empty() {
            Value::Map(Map::new())
        } else {
            Value::from_scalar(&text)
        };
    }

    let mut map = Map::new();

    if !element.attributes.is_empty() {
        let attributes = element
            .attributes
            .iter()
            .map(|(name, value)| (name.clone(), Value::from_scalar(value.trim())))
            .collect();
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Map(attributes));
    }

    if has_child_elements {
        // loose text next to child elements is not kept
        for child in element.child_elements() {
            insert_repeated(&mut map, &child.name, convert_element(child));
        }
    } else {
        let text = element.text();
        if !text.is_empty() {
            map.insert(CONTENT_KEY.to_string(), Value::from_scalar(&text));
        }
    }

    Value::Map(map)
}

/// Insert `value` under `key`, collecting repeated keys into a list
fn insert_repeated(map: &mut Map, key: &str, value: Value) {
    match map.get_mut(key) {
        None => {
            map.insert(key.to_string(), value);
        }
        Some(Value::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::List(Vec::with_capacity(2)));
            if let Value::List(items) = existing {
                items.push(first);
                items.push(value);
            }
        }
    }
}
