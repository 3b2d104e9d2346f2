use std::ops::Index;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// An ordered mapping from string keys to arbitrary values, parsed from a YAML or JSON file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Map<String, Value>);

impl ConfigDocument {
    /// Returns the value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Deserialize the value stored under `key` into `T`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;

        T::deserialize(value).map_err(|source| ConfigError::InvalidValue {
            key: key.to_string(),
            source,
        })
    }

    /// Walk a dotted path (e.g. `model.params.learning_rate`) through nested mappings
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut keys = path.split('.');
        let mut current = self.0.get(keys.next()?)?;

        for key in keys {
            current = current.as_object()?.get(key)?;
        }

        Some(current)
    }

    /// Returns the nested mapping under `key` as its own document
    pub fn section(&self, key: &str) -> Result<ConfigDocument, ConfigError> {
        let value = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;

        match value {
            Value::Object(map) => Ok(Self(map.clone())),
            _ => Err(ConfigError::NotAMapping(key.to_string())),
        }
    }

    /// Convert the whole document into a typed configuration struct
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0))
    }

    /// Whether the document contains `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over the top-level keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Iterate over the top-level entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The number of top-level keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document has no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the document, returning the underlying map
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Missing keys index to `Value::Null`, mirroring `serde_json::Value`
impl Index<&str> for ConfigDocument {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.0.get(key).unwrap_or(&NULL)
    }
}

impl From<Map<String, Value>> for ConfigDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for ConfigDocument {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConfigError::NotAMapping(kind_of(&other).to_string())),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ConfigDocument {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Config Error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The requested key is not present
    #[error("no value found for key {0}")]
    MissingKey(String),

    /// The value exists but does not have the requested type
    #[error("invalid value for key {key}: {source}")]
    InvalidValue {
        /// The key that was looked up
        key: String,

        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A mapping was expected, but something else was found
    #[error("expected a mapping, found {0}")]
    NotAMapping(String),
}
