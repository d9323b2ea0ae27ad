//! attributes — map views over host attribute containers.
//!
//! Host environments (request, session and application scopes of a web
//! container, say) expose attributes through [`AttributeStore`].
//! [`ScopeMap`] turns any store into a [`Context`](crate::Context) so
//! commands can read and write it directly; [`ReadOnly`] wraps a context
//! whose mutation methods must refuse with
//! [`ChainError::Unsupported`](crate::ChainError::Unsupported).

mod read_only;
mod scope_map;
mod store;

pub use read_only::ReadOnly;
pub use scope_map::ScopeMap;
pub use store::{AttributeStore, InMemoryAttributes};
