use serde_json::Value;

use super::base::ContextBase;
use super::property::Properties;
use super::Context;
use crate::error::ChainError;

/// Live view over every entry of a [`ContextBase`], properties included.
///
/// Reads see the current property values; writes and removals are routed
/// back through the context, so removing a property key through the view
/// fails exactly as it does on the context.
pub struct Entries<'a, P> {
    ctx: &'a mut ContextBase<P>,
}

impl<'a, P: Properties> Entries<'a, P> {
    pub(super) fn new(ctx: &'a mut ContextBase<P>) -> Self {
        Entries { ctx }
    }

    pub fn len(&self) -> usize {
        self.ctx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctx.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.ctx.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.ctx.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.ctx.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.ctx.values()
    }

    /// Replace the value of an existing entry.
    pub fn set_value(&mut self, key: &str, value: Value) -> Result<Option<Value>, ChainError> {
        if !self.ctx.contains_key(key) {
            return Err(ChainError::InvalidArgument(format!("no entry for '{}'", key)));
        }
        self.ctx.put(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<Value>, ChainError> {
        self.ctx.remove(key)
    }

    /// Remove the first entry whose value equals `value`. Returns whether
    /// an entry was removed.
    pub fn remove_value(&mut self, value: &Value) -> Result<bool, ChainError> {
        let key = self
            .ctx
            .entries
            .iter()
            .find(|(_, slot)| self.ctx.slot_value(slot).as_ref() == Some(value))
            .map(|(key, _)| key.clone());
        match key {
            Some(key) => {
                self.ctx.remove(&key)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Keep only the entries for which `keep` returns `true`.
    ///
    /// Fails without removing anything if a property entry would have to
    /// go.
    pub fn retain<F>(&mut self, mut keep: F) -> Result<(), ChainError>
    where
        F: FnMut(&str, &Value) -> bool,
    {
        let doomed: Vec<String> = self
            .ctx
            .iter()
            .filter(|(key, value)| !keep(*key, value))
            .map(|(key, _)| key.to_string())
            .collect();

        if let Some(key) = doomed.iter().find(|key| self.ctx.is_property(key)) {
            return Err(ChainError::Unsupported(format!(
                "property '{}' cannot be removed",
                key
            )));
        }
        for key in &doomed {
            self.ctx.remove(key)?;
        }
        Ok(())
    }

    /// Remove every attribute; properties stay.
    pub fn clear(&mut self) -> Result<(), ChainError> {
        self.ctx.clear()
    }
}
