use std::fmt;

use dashmap::DashMap;
use tracing::debug;

use crate::command::Link;

/// A name → command registry.
///
/// The same link may be registered under several names or in several
/// catalogs. Registering a name again replaces the previous entry; there is
/// no removal.
#[derive(Default)]
pub struct Catalog {
    commands: DashMap<String, Link>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `link` under `name`, replacing any previous entry.
    pub fn add_command(&self, name: impl Into<String>, link: impl Into<Link>) {
        let name = name.into();
        debug!(command = %name, "registering command");
        self.commands.insert(name, link.into());
    }

    /// Register a link and return `self`, for building catalogs inline.
    pub fn with_command(self, name: impl Into<String>, link: impl Into<Link>) -> Self {
        self.add_command(name, link);
        self
    }

    /// The link registered under `name`, if any.
    pub fn command(&self, name: &str) -> Option<Link> {
        self.commands.get(name).map(|entry| entry.value().clone())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("commands", &self.names())
            .finish()
    }
}
