use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single posture attribute value.
///
/// Attributes are boolean by convention, but the documents allow strings and
/// the merge copies whatever it is given without coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Text(String),
}

impl AttributeValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(value) => Some(*value),
            AttributeValue::Text(_) => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(value) => write!(f, "{}", value),
            AttributeValue::Text(value) => write!(f, "\"{}\"", value),
        }
    }
}

/// Attribute name to value. Sorted by name so serialized postures are stable.
pub type AttributeMap = BTreeMap<String, AttributeValue>;
