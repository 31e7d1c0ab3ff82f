//! Opaque entity references.

use serde::{Deserialize, Serialize};

/// An opaque identifier returned by a creation action.
///
/// The services under verification return JSON integers today, but the
/// harness treats the value as opaque: it is only ever echoed back into
/// later URLs and request bodies, so string identifiers work unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    /// Numeric identifier.
    Int(i64),
    /// String identifier.
    Str(String),
}

impl EntityRef {
    /// Extracts an entity reference from a JSON value, accepting integers
    /// and strings.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(EntityRef::Int),
            serde_json::Value::String(s) => Some(EntityRef::Str(s.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Int(n) => write!(f, "{n}"),
            EntityRef::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for EntityRef {
    fn from(n: i64) -> Self {
        EntityRef::Int(n)
    }
}

impl From<String> for EntityRef {
    fn from(s: String) -> Self {
        EntityRef::Str(s)
    }
}

impl From<&str> for EntityRef {
    fn from(s: &str) -> Self {
        EntityRef::Str(s.to_string())
    }
}
