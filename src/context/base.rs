use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::entries::Entries;
use super::property::{Properties, Property};
use super::Context;
use crate::error::ChainError;

/// Backing-store slot. Property keys hold a marker pointing into the
/// property table; their values are never stored here.
#[derive(Clone)]
pub(super) enum Slot {
    Property(usize),
    Value(Value),
}

/// A [`Context`] whose typed fields double as map entries.
///
/// The property table of `P` is resolved once at construction: every
/// property name is seeded into the ordered backing store with a marker
/// slot, so it is always present, can be overwritten through the map but
/// never removed. Every other key is ordinary free-form storage.
#[derive(Clone)]
pub struct ContextBase<P = ()> {
    properties: P,
    pub(super) entries: IndexMap<String, Slot>,
}

/// A context with no properties: a plain ordered map.
pub type MapContext = ContextBase<()>;

impl<P: Properties + Default> ContextBase<P> {
    /// Create a context with default property values and no attributes.
    pub fn new() -> Self {
        Self::with_properties(P::default())
    }
}

impl<P: Properties + Default> Default for ContextBase<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Properties> ContextBase<P> {
    /// Create a context around existing property values.
    pub fn with_properties(properties: P) -> Self {
        let table = P::properties();
        let mut entries = IndexMap::with_capacity(table.len());
        for (index, property) in table.iter().enumerate() {
            let previous = entries.insert(property.name.to_string(), Slot::Property(index));
            debug_assert!(
                previous.is_none(),
                "duplicate property name '{}' in property table",
                property.name
            );
        }
        ContextBase {
            properties,
            entries,
        }
    }

    /// Typed access to the property fields.
    pub fn properties(&self) -> &P {
        &self.properties
    }

    /// Typed mutable access to the property fields. Changes are visible
    /// through the map immediately.
    pub fn properties_mut(&mut self) -> &mut P {
        &mut self.properties
    }

    pub fn into_properties(self) -> P {
        self.properties
    }

    /// True if `key` is backed by a property rather than free-form storage.
    pub fn is_property(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Slot::Property(_)))
    }

    /// Iterate over the full logical content: attributes and properties,
    /// in insertion order. Unreadable properties yield `Value::Null`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.entries
            .iter()
            .map(move |(key, slot)| (key.as_str(), self.slot_value(slot).unwrap_or(Value::Null)))
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Live view over the entries; removals and writes go through the
    /// property table.
    pub fn entries(&mut self) -> Entries<'_, P> {
        Entries::new(self)
    }

    /// Snapshot of the logical content as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    fn property(index: usize) -> &'static Property<P> {
        &P::properties()[index]
    }

    pub(super) fn slot_value(&self, slot: &Slot) -> Option<Value> {
        match slot {
            Slot::Value(value) => Some(value.clone()),
            Slot::Property(index) => Self::property(*index)
                .get
                .map(|get| get(&self.properties)),
        }
    }
}

impl<P: Properties> Context for ContextBase<P> {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).and_then(|slot| self.slot_value(slot))
    }

    fn put(&mut self, key: &str, value: Value) -> Result<Option<Value>, ChainError> {
        if let Some(Slot::Property(index)) = self.entries.get(key) {
            let property = Self::property(*index);
            let set = property.set.ok_or_else(|| {
                ChainError::Unsupported(format!("property '{}' is not writable", key))
            })?;
            let previous = property.get.map(|get| get(&self.properties));
            set(&mut self.properties, value)?;
            return Ok(previous);
        }

        let previous = self.entries.insert(key.to_string(), Slot::Value(value));
        Ok(previous.and_then(|slot| match slot {
            Slot::Value(value) => Some(value),
            Slot::Property(_) => None,
        }))
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>, ChainError> {
        if self.is_property(key) {
            return Err(ChainError::Unsupported(format!(
                "property '{}' cannot be removed",
                key
            )));
        }
        Ok(match self.entries.shift_remove(key) {
            Some(Slot::Value(value)) => Some(value),
            _ => None,
        })
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn contains_value(&self, value: &Value) -> bool {
        self.entries.values().any(|slot| match slot {
            Slot::Value(stored) => stored == value,
            Slot::Property(index) => Self::property(*index)
                .get
                .is_some_and(|get| get(&self.properties) == *value),
        })
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) -> Result<(), ChainError> {
        self.entries.retain(|_, slot| matches!(slot, Slot::Property(_)));
        Ok(())
    }
}

impl<P: Properties> Serialize for ContextBase<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

impl<P: Properties> fmt::Debug for ContextBase<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(String, Value)> for MapContext {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut ctx = MapContext::new();
        for (key, value) in iter {
            ctx.entries.insert(key, Slot::Value(value));
        }
        ctx
    }
}
