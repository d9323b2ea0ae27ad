use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::model::CommandConfig;
use crate::catalog::CatalogFactory;
use crate::chain::Chain;
use crate::command::Link;
use crate::error::ChainError;
use crate::generic::{CopyCommand, LookupCommand, RemoveCommand};

/// Builds a link from a configuration entry.
///
/// Receives the registry itself so container types can build their
/// children, and the catalog factory that lookups resolve against.
pub type CommandFactory =
    dyn Fn(&CommandConfig, &CommandTypes, &Arc<CatalogFactory>) -> Result<Link, ChainError>
        + Send
        + Sync;

/// Registry of command types available to configuration documents.
///
/// `new()` includes the built-in types `chain`, `copy`, `remove` and
/// `lookup`; add your own with [`register`](Self::register), or with
/// [`register_container`](Self::register_container) for types whose
/// entries list child commands.
///
/// ## Example
///
/// ```ignore
/// let types = CommandTypes::new().register("audit", |config, _, _| {
///     let props = config.properties_as::<AuditProperties>()?;
///     Ok(Link::filter(AuditFilter::new(props.channel)))
/// });
/// ```
pub struct CommandTypes {
    factories: HashMap<String, Registration>,
}

struct Registration {
    factory: Box<CommandFactory>,
    nests: bool,
}

impl CommandTypes {
    /// A registry with the built-in types.
    pub fn new() -> Self {
        Self::empty()
            .register_container("chain", build_chain)
            .register("copy", build_copy)
            .register("remove", build_remove)
            .register("lookup", build_lookup)
    }

    /// A registry with no types at all.
    pub fn empty() -> Self {
        CommandTypes {
            factories: HashMap::new(),
        }
    }

    /// Register a command type, replacing any previous one of that name.
    ///
    /// Uses builder pattern — returns `self` for chaining.
    pub fn register<F>(self, name: &str, factory: F) -> Self
    where
        F: Fn(&CommandConfig, &CommandTypes, &Arc<CatalogFactory>) -> Result<Link, ChainError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(name, Box::new(factory), false)
    }

    /// Register a command type whose entries may list child commands under
    /// `command`. The factory builds the children itself, usually with
    /// [`build`](Self::build).
    pub fn register_container<F>(self, name: &str, factory: F) -> Self
    where
        F: Fn(&CommandConfig, &CommandTypes, &Arc<CatalogFactory>) -> Result<Link, ChainError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(name, Box::new(factory), true)
    }

    fn insert(mut self, name: &str, factory: Box<CommandFactory>, nests: bool) -> Self {
        self.factories
            .insert(name.to_string(), Registration { factory, nests });
        self
    }

    /// Build the link described by `config`.
    pub fn build(
        &self,
        config: &CommandConfig,
        catalogs: &Arc<CatalogFactory>,
    ) -> Result<Link, ChainError> {
        let registration = self.factories.get(&config.kind).ok_or_else(|| {
            ChainError::Config(format!(
                "{}: unknown command type '{}'",
                config.label(),
                config.kind
            ))
        })?;
        if !registration.nests && !config.commands.is_empty() {
            return Err(ChainError::Config(format!(
                "{}: type '{}' cannot contain commands",
                config.label(),
                config.kind
            )));
        }
        (registration.factory)(config, self, catalogs)
    }

    /// Registered type names, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        types.sort();
        types
    }
}

impl Default for CommandTypes {
    fn default() -> Self {
        Self::new()
    }
}

fn build_chain(
    config: &CommandConfig,
    types: &CommandTypes,
    catalogs: &Arc<CatalogFactory>,
) -> Result<Link, ChainError> {
    if !config.properties.is_empty() {
        return Err(ChainError::Config(format!(
            "{}: chains take no properties",
            config.label()
        )));
    }
    let links = config
        .commands
        .iter()
        .map(|child| types.build(child, catalogs))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Chain::new(links).into())
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CopyProperties {
    #[serde(default)]
    from_key: Option<String>,
    #[serde(default)]
    to_key: Option<String>,
    #[serde(default)]
    value: Option<Value>,
}

fn build_copy(
    config: &CommandConfig,
    _types: &CommandTypes,
    _catalogs: &Arc<CatalogFactory>,
) -> Result<Link, ChainError> {
    let props: CopyProperties = config.properties_as()?;
    let mut command = CopyCommand::new();
    if let Some(key) = props.from_key {
        command = command.from_key(key);
    }
    if let Some(key) = props.to_key {
        command = command.to_key(key);
    }
    if let Some(value) = props.value {
        command = command.value(value);
    }
    Ok(Link::command(command))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoveProperties {
    #[serde(default)]
    from_key: Option<String>,
}

fn build_remove(
    config: &CommandConfig,
    _types: &CommandTypes,
    _catalogs: &Arc<CatalogFactory>,
) -> Result<Link, ChainError> {
    let props: RemoveProperties = config.properties_as()?;
    Ok(Link::command(match props.from_key {
        Some(key) => RemoveCommand::new(key),
        None => RemoveCommand::default(),
    }))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LookupProperties {
    #[serde(default)]
    catalog_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    name_key: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    ignore_execute_result: bool,
    #[serde(default)]
    ignore_postprocess_result: bool,
}

fn build_lookup(
    config: &CommandConfig,
    _types: &CommandTypes,
    catalogs: &Arc<CatalogFactory>,
) -> Result<Link, ChainError> {
    let props: LookupProperties = config.properties_as()?;
    let mut command = LookupCommand::new(catalogs.clone())
        .optional(props.optional)
        .ignore_execute_result(props.ignore_execute_result)
        .ignore_postprocess_result(props.ignore_postprocess_result);
    if let Some(catalog) = props.catalog_name {
        command = command.catalog_name(catalog);
    }
    if let Some(name) = props.name {
        command = command.name(name);
    }
    if let Some(key) = props.name_key {
        command = command.name_key(key);
    }
    Ok(Link::filter(command))
}
