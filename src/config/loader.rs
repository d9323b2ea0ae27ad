use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::model::CatalogsConfig;
use super::types::CommandTypes;
use crate::catalog::{Catalog, CatalogFactory};
use crate::command::Link;
use crate::error::ChainError;

/// Populates a [`CatalogFactory`] from configuration documents.
///
/// Catalogs that already exist in the factory are extended rather than
/// replaced; commands registered under an existing name overwrite it.
pub struct ConfigLoader {
    catalogs: Arc<CatalogFactory>,
    types: CommandTypes,
}

impl ConfigLoader {
    /// A loader using the built-in command types.
    pub fn new(catalogs: Arc<CatalogFactory>) -> Self {
        ConfigLoader {
            catalogs,
            types: CommandTypes::new(),
        }
    }

    /// Replace the command type registry.
    pub fn with_types(mut self, types: CommandTypes) -> Self {
        self.types = types;
        self
    }

    pub fn catalogs(&self) -> &Arc<CatalogFactory> {
        &self.catalogs
    }

    /// Apply a parsed document.
    ///
    /// Each catalog's commands are all built before any is registered, so
    /// a failing entry leaves that catalog untouched.
    pub fn load(&self, config: &CatalogsConfig) -> Result<(), ChainError> {
        for catalog_config in &config.catalogs {
            let mut built: Vec<(String, Link)> = Vec::with_capacity(catalog_config.commands.len());
            for command in &catalog_config.commands {
                let name = command.name.clone().ok_or_else(|| {
                    ChainError::Config(format!(
                        "{}: top-level commands need a name",
                        command.label()
                    ))
                })?;
                built.push((name, self.types.build(command, &self.catalogs)?));
            }

            let catalog = self.catalog_for(catalog_config.name.as_deref());
            let count = built.len();
            for (name, link) in built {
                catalog.add_command(name, link);
            }
            info!(
                catalog = catalog_config.name.as_deref().unwrap_or("<default>"),
                commands = count,
                "loaded catalog"
            );
        }
        Ok(())
    }

    /// Parse and apply a JSON document.
    pub fn load_json(&self, source: &str) -> Result<(), ChainError> {
        let config: CatalogsConfig = serde_json::from_str(source)
            .map_err(|e| ChainError::Config(format!("invalid JSON configuration: {}", e)))?;
        self.load(&config)
    }

    /// Parse and apply a TOML document.
    #[cfg(feature = "toml")]
    pub fn load_toml(&self, source: &str) -> Result<(), ChainError> {
        let config: CatalogsConfig = toml::from_str(source)
            .map_err(|e| ChainError::Config(format!("invalid TOML configuration: {}", e)))?;
        self.load(&config)
    }

    /// Read a file and apply it, choosing the format by extension.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<(), ChainError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ChainError::Config(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => self.load_json(&source),
            #[cfg(feature = "toml")]
            Some("toml") => self.load_toml(&source),
            _ => Err(ChainError::Config(format!(
                "{}: unsupported configuration format",
                path.display()
            ))),
        }
    }

    fn catalog_for(&self, name: Option<&str>) -> Arc<Catalog> {
        let existing = match name {
            Some(name) => self.catalogs.catalog(name),
            None => self.catalogs.default_catalog(),
        };
        if let Some(catalog) = existing {
            return catalog;
        }

        let catalog = Arc::new(Catalog::new());
        match name {
            Some(name) => self.catalogs.add_catalog(name, catalog.clone()),
            None => self.catalogs.set_default_catalog(catalog.clone()),
        }
        catalog
    }
}
