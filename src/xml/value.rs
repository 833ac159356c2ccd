use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping used for converted elements
pub type Map = IndexMap<String, Value>;

/// A converted XML value
///
/// Elements become [`Value::Map`]s keyed by child tag name in document order,
/// tags that repeat under one parent become a [`Value::List`], and leaf text
/// becomes either [`Value::Integer`] or [`Value::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(u64),
    Text(String),
    Map(Map),
    List(Vec<Value>),
}

impl Value {
    /// Convert a scalar string, turning plain unsigned decimals into integers
    ///
    /// Values with a leading zero, a sign or a fractional part stay text,
    /// as do decimals too large for `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use eutils_client::Value;
    ///
    /// assert_eq!(Value::from_scalar("42"), Value::Integer(42));
    /// assert_eq!(Value::from_scalar("007"), Value::Text("007".to_string()));
    /// assert_eq!(Value::from_scalar("-1"), Value::Text("-1".to_string()));
    /// ```
    pub fn from_scalar(text: &str) -> Value {
        if is_unsigned_decimal(text) {
            if let Ok(n) = text.parse::<u64>() {
                return Value::Integer(n);
            }
        }
        Value::Text(text.to_string())
    }

    /// Look up a key of a map value
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Look up an element of a list value
    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Value::List(items) => items.get(index),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// View a value as a sequence regardless of whether its tag repeated
    ///
    /// A list yields its items; any other value yields itself once.
    pub fn as_slice(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Number of entries of a map or list; scalars count as one
    pub fn len(&self) -> usize {
        match self {
            Value::Map(map) => map.len(),
            Value::List(items) => items.len(),
            Value::Integer(_) | Value::Text(_) => 1,
        }
    }

    /// True for an empty map or list
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Map(map) => map.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Integer(_) | Value::Text(_) => false,
        }
    }
}

fn is_unsigned_decimal(text: &str) -> bool {
    !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text.len() == 1 || !text.starts_with('0'))
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Integer(n) => serde_json::Value::from(n),
            Value::Text(s) => serde_json::Value::String(s),
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
        }
    }
}
