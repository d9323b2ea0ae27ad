use serde_json::Value;

use crate::context::Context;
use crate::error::ChainError;

/// Read-only wrapper around any [`Context`].
///
/// Reads pass through; `put`, `remove` and `clear` fail with
/// [`ChainError::Unsupported`].
#[derive(Debug, Clone, Default)]
pub struct ReadOnly<C> {
    inner: C,
}

impl<C: Context> ReadOnly<C> {
    pub fn new(inner: C) -> Self {
        ReadOnly { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Context> Context for ReadOnly<C> {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, _value: Value) -> Result<Option<Value>, ChainError> {
        Err(ChainError::Unsupported(format!("cannot put '{}' into a read-only map", key)))
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>, ChainError> {
        Err(ChainError::Unsupported(format!("cannot remove '{}' from a read-only map", key)))
    }

    fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    fn contains_value(&self, value: &Value) -> bool {
        self.inner.contains_value(value)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) -> Result<(), ChainError> {
        Err(ChainError::Unsupported("cannot clear a read-only map".to_string()))
    }
}
