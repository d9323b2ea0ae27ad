use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ChainError;

/// A configuration document: any number of catalogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogsConfig {
    #[serde(default, rename = "catalog")]
    pub catalogs: Vec<CatalogConfig>,
}

/// One catalog. Without a name it populates the default catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandConfig>,
}

/// One command entry.
///
/// `type` selects a registered command type; `properties` configure it.
/// Entries of type `chain` list their links under `command`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    /// Registration name. Required for top-level entries; a label only
    /// inside a chain.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandConfig>,
}

impl CommandConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        CommandConfig {
            name: None,
            kind: kind.into(),
            properties: Map::new(),
            commands: Vec::new(),
        }
    }

    /// Deserialize `properties` into a typed struct.
    pub fn properties_as<T: DeserializeOwned>(&self) -> Result<T, ChainError> {
        serde_json::from_value(Value::Object(self.properties.clone())).map_err(|e| {
            ChainError::Config(format!("{}: invalid properties: {}", self.label(), e))
        })
    }

    /// Name if present, otherwise the type; used in error messages.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}
