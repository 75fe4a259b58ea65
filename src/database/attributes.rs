use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::database::repository::RepositoryError;

/// Schema-less key/value structure persisted as a single blob column
/// (geo points, pickup windows, auto-acceptance rules, ingredient lists).
///
/// The service layer never looks inside; only the codec below turns it
/// into bytes and back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Wrap a list of attribute maps under a single key, e.g. `{"ingredients": [...]}`
    pub fn wrap_list(key: &str, items: &[Attributes]) -> Self {
        let list = items
            .iter()
            .map(|item| Value::Object(item.0.clone().into_iter().collect()))
            .collect::<Vec<_>>();
        let mut wrapped = Self::new();
        if !list.is_empty() {
            wrapped.insert(key, Value::Array(list));
        }
        wrapped
    }

    /// Inverse of `wrap_list`. Non-object list elements are skipped.
    pub fn unwrap_list(&self, key: &str) -> Vec<Attributes> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(Attributes::from(map.clone())),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How the codec treats a blob that is not a JSON object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Malformed blobs decode to an empty map (logged)
    #[default]
    Tolerant,
    /// Malformed blobs surface as `RepositoryError::CorruptAttributes`
    Strict,
}

/// Encodes attribute maps to the persisted blob form and back
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeCodec {
    policy: DecodePolicy,
}

impl AttributeCodec {
    pub fn new(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    /// Empty or absent maps encode to SQL NULL, never to `{}`
    pub fn encode(&self, attributes: Option<&Attributes>) -> Option<Vec<u8>> {
        match attributes {
            // String-keyed maps of JSON values always serialize
            Some(attributes) if !attributes.is_empty() => serde_json::to_vec(attributes).ok(),
            _ => None,
        }
    }

    /// NULL, zero-length and JSON `null` blobs decode to an empty map
    pub fn decode(
        &self,
        column: &'static str,
        raw: Option<&[u8]>,
    ) -> Result<Attributes, RepositoryError> {
        let bytes = match raw {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(Attributes::new()),
        };

        if std::str::from_utf8(bytes).map(str::trim) == Ok("null") {
            return Ok(Attributes::new());
        }

        match serde_json::from_slice::<Attributes>(bytes) {
            Ok(attributes) => Ok(attributes),
            Err(e) => match self.policy {
                DecodePolicy::Tolerant => {
                    tracing::warn!(column, error = %e, "discarding malformed attribute blob");
                    Ok(Attributes::new())
                }
                DecodePolicy::Strict => Err(RepositoryError::CorruptAttributes { column }),
            },
        }
    }
}
