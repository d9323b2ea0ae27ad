use serde_json::Value;

use crate::error::ChainError;

/// Reads a property from its owning struct.
pub type Getter<T> = fn(&T) -> Value;

/// Writes a property on its owning struct.
pub type Setter<T> = fn(&mut T, Value) -> Result<(), ChainError>;

/// One entry of a property table: a name and its accessors.
///
/// A property with no getter reads as absent; one with no setter refuses
/// writes with [`ChainError::Unsupported`].
pub struct Property<T> {
    pub name: &'static str,
    pub get: Option<Getter<T>>,
    pub set: Option<Setter<T>>,
}

impl<T> Property<T> {
    pub const fn read_write(name: &'static str, get: Getter<T>, set: Setter<T>) -> Self {
        Property {
            name,
            get: Some(get),
            set: Some(set),
        }
    }

    pub const fn read_only(name: &'static str, get: Getter<T>) -> Self {
        Property {
            name,
            get: Some(get),
            set: None,
        }
    }

    pub const fn write_only(name: &'static str, set: Setter<T>) -> Self {
        Property {
            name,
            get: None,
            set: Some(set),
        }
    }

    pub fn is_readable(&self) -> bool {
        self.get.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.set.is_some()
    }
}

/// The static property table of a context type.
///
/// Usually derived with `#[derive(Properties)]`; implement by hand for
/// computed properties.
pub trait Properties: Sized + 'static {
    fn properties() -> &'static [Property<Self>];
}

impl Properties for () {
    fn properties() -> &'static [Property<Self>] {
        &[]
    }
}
