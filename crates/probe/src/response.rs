//! Structured probe responses.

use common::EntityRef;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ProbeError;

/// What a single probe attempt observed: the status code and the parsed
/// JSON body. Bodies that are empty or not JSON decode to [`Value::Null`].
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProbeResponse {
    /// Looks up a field by dot-separated path (`"name.first"`).
    pub fn extract(&self, path: &str) -> Result<&Value, ProbeError> {
        let mut current = &self.body;
        for segment in path.split('.') {
            current = current.get(segment).ok_or_else(|| ProbeError::MissingField {
                path: path.to_string(),
            })?;
        }
        Ok(current)
    }

    /// Extracts a string field.
    pub fn extract_str(&self, path: &str) -> Result<&str, ProbeError> {
        self.extract(path)?
            .as_str()
            .ok_or_else(|| ProbeError::UnexpectedType {
                path: path.to_string(),
                expected: "string",
            })
    }

    /// Extracts an entity reference (integer or string id).
    pub fn entity_ref(&self, path: &str) -> Result<EntityRef, ProbeError> {
        let value = self.extract(path)?;
        EntityRef::from_json(value).ok_or_else(|| ProbeError::UnexpectedType {
            path: path.to_string(),
            expected: "integer or string id",
        })
    }
}
