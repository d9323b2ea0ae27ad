use indexmap::IndexMap;
use serde_json::Value;

/// An attribute container such as a request, session or application scope
/// of a host environment.
pub trait AttributeStore {
    fn attribute(&self, name: &str) -> Option<Value>;

    fn set_attribute(&mut self, name: &str, value: Value);

    fn remove_attribute(&mut self, name: &str);

    fn attribute_names(&self) -> Vec<String>;
}

impl<S: AttributeStore + ?Sized> AttributeStore for &mut S {
    fn attribute(&self, name: &str) -> Option<Value> {
        (**self).attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: Value) {
        (**self).set_attribute(name, value)
    }

    fn remove_attribute(&mut self, name: &str) {
        (**self).remove_attribute(name)
    }

    fn attribute_names(&self) -> Vec<String> {
        (**self).attribute_names()
    }
}

/// In-memory attribute store that keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttributes {
    attributes: IndexMap<String, Value>,
}

impl InMemoryAttributes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for InMemoryAttributes {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.shift_remove(name);
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }
}

impl FromIterator<(String, Value)> for InMemoryAttributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        InMemoryAttributes {
            attributes: iter.into_iter().collect(),
        }
    }
}
