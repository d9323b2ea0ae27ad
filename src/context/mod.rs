//! Context — the shared, mutable state a chain's commands operate on.
//!
//! [`Context`] is the map contract every command sees. [`ContextBase`] is
//! the stock implementation: free-form attributes plus typed fields
//! ("properties") that are visible as ordinary map entries under their
//! property name.
//!
//! ## Example
//!
//! ```ignore
//! use command_chain::{Context, ContextBase, Properties};
//!
//! #[derive(Default, Properties)]
//! struct Request {
//!     path: String,
//!     #[property(read_only)]
//!     attempts: u32,
//! }
//!
//! let mut ctx = ContextBase::<Request>::new();
//! ctx.put("path", json!("/orders"))?;          // writes the field
//! assert_eq!(ctx.properties().path, "/orders");
//! ctx.put("user", json!("pat"))?;              // free-form attribute
//! ```

mod base;
mod entries;
mod property;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ChainError;

pub use base::{ContextBase, MapContext};
pub use entries::Entries;
pub use property::{Properties, Property};

/// A string-keyed map of JSON values shared by the commands of a chain.
///
/// Implementations may redirect some keys to typed storage, or refuse
/// mutation altogether; both report failures through [`ChainError`].
pub trait Context {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, returning the previous value.
    fn put(&mut self, key: &str, value: Value) -> Result<Option<Value>, ChainError>;

    /// Remove `key`, returning the value it held.
    fn remove(&mut self, key: &str) -> Result<Option<Value>, ChainError>;

    fn contains_key(&self, key: &str) -> bool;

    fn contains_value(&self, value: &Value) -> bool;

    /// Every key currently present, in iteration order.
    fn keys(&self) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every removable entry.
    fn clear(&mut self) -> Result<(), ChainError>;

    /// Store every pair in turn, stopping at the first failure.
    fn put_all(&mut self, entries: Vec<(String, Value)>) -> Result<(), ChainError> {
        for (key, value) in entries {
            self.put(&key, value)?;
        }
        Ok(())
    }
}

/// Typed convenience helpers available on every [`Context`].
pub trait ContextExt: Context {
    /// Deserialize the value under `key` into `T`.
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ChainError> {
        match self.get(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ChainError::InvalidArgument(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`.
    fn put_as<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<Option<Value>, ChainError> {
        let value = serde_json::to_value(value)?;
        self.put(key, value)
    }

    /// The value under `key` if it is a string.
    fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl<C: Context + ?Sized> ContextExt for C {}
