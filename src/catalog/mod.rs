//! catalog — named command registries.
//!
//! A [`Catalog`] maps names to links. A [`CatalogFactory`] holds a default
//! catalog plus named ones and resolves composite ids such as
//! `"web:login"`. [`CatalogScopes`] keeps one factory per isolation key.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use command_chain::{Catalog, CatalogFactory, Chain};
//!
//! let web = Catalog::new().with_command("login", Chain::builder().command(Login).build());
//! let factory = Arc::new(CatalogFactory::new());
//! factory.add_catalog("web", Arc::new(web));
//!
//! let login = factory.command("web:login")?.expect("registered");
//! ```

#[allow(clippy::module_inception)]
mod catalog;
mod factory;
mod scopes;

pub use catalog::Catalog;
pub use factory::{CatalogFactory, DELIMITER};
pub use scopes::{CatalogScopes, DEFAULT_SCOPE};
