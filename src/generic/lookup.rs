use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, CatalogFactory};
use crate::command::{Command, Filter, Link};
use crate::context::{Context, ContextExt};
use crate::error::ChainError;

/// Looks up a command in a catalog at execution time and runs it.
///
/// The catalog is the one named by `catalog_name`, or the factory's
/// default. The command name is either configured with `name` or read
/// from the context under `name_key`. When the resolved command is a
/// filter, its `postprocess` runs when this command is postprocessed.
///
/// ## Example
///
/// ```ignore
/// let lookup = LookupCommand::new(factory.clone())
///     .catalog_name("auth")
///     .name_key("auth.flow")
///     .optional(true)
///     .ignore_execute_result(true);
/// ```
#[derive(Clone)]
pub struct LookupCommand {
    factory: Arc<CatalogFactory>,
    catalog_name: Option<String>,
    name: Option<String>,
    name_key: Option<String>,
    optional: bool,
    ignore_execute_result: bool,
    ignore_postprocess_result: bool,
}

impl LookupCommand {
    pub fn new(factory: Arc<CatalogFactory>) -> Self {
        LookupCommand {
            factory,
            catalog_name: None,
            name: None,
            name_key: None,
            optional: false,
            ignore_execute_result: false,
            ignore_postprocess_result: false,
        }
    }

    /// Look in this catalog instead of the default one.
    pub fn catalog_name(mut self, name: impl Into<String>) -> Self {
        self.catalog_name = Some(name.into());
        self
    }

    /// Run the command registered under this name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Read the command name from this context key when no `name` is set.
    pub fn name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = Some(key.into());
        self
    }

    /// Treat a missing catalog or command as a no-op instead of an error.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Always return `false` from `execute`, whatever the looked-up
    /// command returned, so the enclosing chain keeps going.
    pub fn ignore_execute_result(mut self, ignore: bool) -> Self {
        self.ignore_execute_result = ignore;
        self
    }

    /// Always return `false` from `postprocess`, so the looked-up filter
    /// cannot mark an error as handled.
    pub fn ignore_postprocess_result(mut self, ignore: bool) -> Self {
        self.ignore_postprocess_result = ignore;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    fn resolve_catalog(&self) -> Result<Option<Arc<Catalog>>, ChainError> {
        let catalog = match &self.catalog_name {
            Some(name) => self.factory.catalog(name),
            None => self.factory.default_catalog(),
        };
        if catalog.is_some() || self.optional {
            return Ok(catalog);
        }
        Err(ChainError::InvalidArgument(match &self.catalog_name {
            Some(name) => format!("cannot find catalog '{}'", name),
            None => "cannot find default catalog".to_string(),
        }))
    }

    fn command_name(&self, context: &dyn Context) -> Option<String> {
        self.name.clone().or_else(|| {
            self.name_key
                .as_deref()
                .and_then(|key| context.get_str(key))
        })
    }

    /// Resolve the target link, or `None` when optional and missing.
    fn resolve(&self, context: &dyn Context) -> Result<Option<Link>, ChainError> {
        let Some(catalog) = self.resolve_catalog()? else {
            debug!(catalog = ?self.catalog_name, "optional lookup: catalog missing");
            return Ok(None);
        };

        let Some(name) = self.command_name(context) else {
            if self.optional {
                debug!("optional lookup: no command name");
                return Ok(None);
            }
            return Err(ChainError::InvalidArgument("no command name".to_string()));
        };

        match catalog.command(&name) {
            Some(link) => {
                debug!(command = %name, catalog = ?self.catalog_name, "resolved lookup");
                Ok(Some(link))
            }
            None if self.optional => {
                debug!(command = %name, "optional lookup: command missing");
                Ok(None)
            }
            None => Err(ChainError::InvalidArgument(match &self.catalog_name {
                Some(catalog) => format!("cannot find command '{}' in catalog '{}'", name, catalog),
                None => format!("cannot find command '{}' in default catalog", name),
            })),
        }
    }
}

impl Command for LookupCommand {
    fn execute(&self, context: &mut dyn Context) -> Result<bool, ChainError> {
        let Some(link) = self.resolve(context)? else {
            return Ok(false);
        };
        let result = link.execute(context)?;
        Ok(result && !self.ignore_execute_result)
    }
}

impl Filter for LookupCommand {
    fn postprocess(
        &self,
        context: &mut dyn Context,
        error: Option<&ChainError>,
    ) -> Result<bool, ChainError> {
        let Some(Link::Filter(filter)) = self.resolve(context)? else {
            return Ok(false);
        };
        let result = filter.postprocess(context, error)?;
        Ok(result && !self.ignore_postprocess_result)
    }
}
