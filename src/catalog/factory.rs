use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::catalog::Catalog;
use crate::command::Link;
use crate::error::ChainError;

/// Separates the catalog name from the command name in a composite id.
pub const DELIMITER: char = ':';

/// A registry of catalogs: one optional default plus any number of named
/// ones.
///
/// Share it with `Arc` and hand it to whatever resolves commands by name,
/// e.g. [`LookupCommand`](crate::generic::LookupCommand).
#[derive(Default)]
pub struct CatalogFactory {
    default: RwLock<Option<Arc<Catalog>>>,
    catalogs: DashMap<String, Arc<Catalog>>,
}

impl CatalogFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default catalog, if one has been set.
    pub fn default_catalog(&self) -> Option<Arc<Catalog>> {
        self.default.read().clone()
    }

    pub fn set_default_catalog(&self, catalog: Arc<Catalog>) {
        debug!("setting default catalog");
        *self.default.write() = Some(catalog);
    }

    /// The catalog registered under `name`, if any.
    pub fn catalog(&self, name: &str) -> Option<Arc<Catalog>> {
        self.catalogs.get(name).map(|entry| entry.value().clone())
    }

    /// Register `catalog` under `name`, replacing any previous entry.
    pub fn add_catalog(&self, name: impl Into<String>, catalog: Arc<Catalog>) {
        let name = name.into();
        debug!(catalog = %name, "registering catalog");
        self.catalogs.insert(name, catalog);
    }

    /// Names of the registered catalogs, sorted. The default catalog is
    /// not included.
    pub fn catalog_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.catalogs.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Resolve a composite id of the form `catalog:command` or `command`.
    ///
    /// A bare name is looked up in the default catalog. A missing catalog
    /// or command yields `Ok(None)`; more than one delimiter is an
    /// argument error.
    pub fn command(&self, id: &str) -> Result<Option<Link>, ChainError> {
        let (catalog_name, command_name) = split_id(id)?;

        let catalog = match catalog_name {
            Some(name) => {
                let catalog = self.catalog(name);
                if catalog.is_none() {
                    warn!(catalog = %name, id, "no catalog registered under this name");
                }
                catalog
            }
            None => {
                let catalog = self.default_catalog();
                if catalog.is_none() {
                    warn!(id, "no default catalog registered");
                }
                catalog
            }
        };

        Ok(catalog.and_then(|catalog| catalog.command(command_name)))
    }

    /// Drop every catalog, including the default.
    pub fn clear(&self) {
        debug!("clearing catalogs");
        *self.default.write() = None;
        self.catalogs.clear();
    }
}

/// Split a composite id into its optional catalog part and command part.
pub(crate) fn split_id(id: &str) -> Result<(Option<&str>, &str), ChainError> {
    match id.split_once(DELIMITER) {
        None => Ok((None, id)),
        Some((_, command)) if command.contains(DELIMITER) => Err(ChainError::InvalidArgument(
            format!(
                "command id '{}' has more than one '{}' delimiter",
                id, DELIMITER
            ),
        )),
        Some((catalog, command)) => Ok((Some(catalog), command)),
    }
}
