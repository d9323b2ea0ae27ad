use crate::command::Command;
use crate::context::Context;
use crate::error::ChainError;

/// Removes `from_key` from the context. Always delegates onward.
#[derive(Debug, Clone, Default)]
pub struct RemoveCommand {
    from_key: Option<String>,
}

impl RemoveCommand {
    pub fn new(from_key: impl Into<String>) -> Self {
        RemoveCommand {
            from_key: Some(from_key.into()),
        }
    }
}

impl Command for RemoveCommand {
    fn execute(&self, context: &mut dyn Context) -> Result<bool, ChainError> {
        if let Some(key) = self.from_key.as_deref() {
            context.remove(key)?;
        }
        Ok(false)
    }
}
