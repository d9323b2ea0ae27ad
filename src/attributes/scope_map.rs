use serde_json::Value;

use super::store::AttributeStore;
use crate::context::Context;
use crate::error::ChainError;

/// Read/write [`Context`] view over an [`AttributeStore`].
#[derive(Debug, Clone, Default)]
pub struct ScopeMap<S> {
    store: S,
}

impl<S: AttributeStore> ScopeMap<S> {
    pub fn new(store: S) -> Self {
        ScopeMap { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: AttributeStore> Context for ScopeMap<S> {
    fn get(&self, key: &str) -> Option<Value> {
        self.store.attribute(key)
    }

    fn put(&mut self, key: &str, value: Value) -> Result<Option<Value>, ChainError> {
        let previous = self.store.attribute(key);
        self.store.set_attribute(key, value);
        Ok(previous)
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>, ChainError> {
        let previous = self.store.attribute(key);
        self.store.remove_attribute(key);
        Ok(previous)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.store.attribute(key).is_some()
    }

    fn contains_value(&self, value: &Value) -> bool {
        self.store
            .attribute_names()
            .iter()
            .any(|name| self.store.attribute(name).as_ref() == Some(value))
    }

    fn keys(&self) -> Vec<String> {
        self.store.attribute_names()
    }

    fn len(&self) -> usize {
        self.store.attribute_names().len()
    }

    fn clear(&mut self) -> Result<(), ChainError> {
        for name in self.store.attribute_names() {
            self.store.remove_attribute(&name);
        }
        Ok(())
    }
}
