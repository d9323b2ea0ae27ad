//! config — declarative catalog configuration.
//!
//! Describe catalogs, chains and commands in JSON (or TOML with the `toml`
//! feature) and load them into a [`CatalogFactory`](crate::CatalogFactory).
//!
//! ```toml
//! [[catalog]]
//! name = "web"
//!
//!   [[catalog.command]]
//!   name = "main"
//!   type = "chain"
//!
//!     [[catalog.command.command]]
//!     type = "copy"
//!     properties = { from_key = "input", to_key = "output" }
//!
//!     [[catalog.command.command]]
//!     type = "lookup"
//!     properties = { catalog_name = "auth", name = "check", optional = true }
//! ```
//!
//! A catalog without a name populates the default catalog.

mod loader;
mod model;
mod types;

pub use loader::ConfigLoader;
pub use model::{CatalogConfig, CatalogsConfig, CommandConfig};
pub use types::{CommandFactory, CommandTypes};
