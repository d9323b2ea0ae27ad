//! Chain of Responsibility: assemble named commands into chains that share
//! a mutable context, with filter cleanup hooks and catalog lookup.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use command_chain::{Catalog, CatalogFactory, Chain, Command, MapContext};
//!
//! let chain = Chain::builder()
//!     .filter(Timing::default())
//!     .command_fn(|ctx| {
//!         ctx.put("greeting", json!("hello"))?;
//!         Ok(false)
//!     })
//!     .build();
//!
//! let factory = Arc::new(CatalogFactory::new());
//! factory.add_catalog("web", Arc::new(Catalog::new().with_command("greet", chain)));
//!
//! let mut ctx = MapContext::new();
//! if let Some(greet) = factory.command("web:greet")? {
//!     greet.execute(&mut ctx)?;
//! }
//! ```

extern crate self as command_chain;

mod catalog;
mod chain;
mod command;
mod context;
mod error;

pub mod attributes;
#[cfg(feature = "config")]
pub mod config;
pub mod generic;

pub use catalog::{Catalog, CatalogFactory, CatalogScopes, DEFAULT_SCOPE, DELIMITER};
pub use chain::{Chain, ChainBuilder};
pub use command::{Command, Filter, FnCommand, Link};
pub use context::{Context, ContextBase, ContextExt, Entries, MapContext, Properties, Property};
pub use error::ChainError;

/// Derive a property table from a struct's named fields.
pub use command_chain_macros::Properties;

#[doc(hidden)]
pub mod __private {
    use serde::de::DeserializeOwned;
    use serde::Serialize;

    pub use serde_json::Value;

    use crate::ChainError;

    /// Unserializable property values read as null.
    pub fn to_value<T: Serialize>(name: &str, value: &T) -> Value {
        serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::warn!(
                property = name,
                error = %e,
                "property value is not representable as JSON"
            );
            Value::Null
        })
    }

    pub fn from_value<T: DeserializeOwned>(name: &str, value: Value) -> Result<T, ChainError> {
        serde_json::from_value(value)
            .map_err(|e| ChainError::InvalidArgument(format!("property '{}': {}", name, e)))
    }
}
