use serde_json::Value;

use crate::command::Command;
use crate::context::Context;
use crate::error::ChainError;

/// Copies a value into `to_key`: either a configured non-null literal or
/// whatever is stored under `from_key`. A null source removes `to_key` instead.
/// Always delegates onward.
#[derive(Debug, Clone, Default)]
pub struct CopyCommand {
    from_key: Option<String>,
    to_key: Option<String>,
    value: Option<Value>,
}

impl CopyCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_key(mut self, key: impl Into<String>) -> Self {
        self.from_key = Some(key.into());
        self
    }

    pub fn to_key(mut self, key: impl Into<String>) -> Self {
        self.to_key = Some(key.into());
        self
    }

    /// Copy this literal instead of reading `from_key`.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl Command for CopyCommand {
    fn execute(&self, context: &mut dyn Context) -> Result<bool, ChainError> {
        let Some(to_key) = self.to_key.as_deref() else {
            return Ok(false);
        };

        // A null literal counts as unset.
        let value = match &self.value {
            Some(value) if !value.is_null() => Some(value.clone()),
            _ => self.from_key.as_deref().and_then(|key| context.get(key)),
        };

        match value {
            Some(value) if !value.is_null() => {
                context.put(to_key, value)?;
            }
            _ => {
                context.remove(to_key)?;
            }
        }
        Ok(false)
    }
}
