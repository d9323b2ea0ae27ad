//! Error type shared by commands, chains, contexts and catalogs.

use std::error::Error;

/// Error returned by every fallible operation in the crate.
///
/// Command implementations are free to return any variant; a chain hands
/// the first error raised by a command back to its caller unchanged unless
/// a filter reports it as handled.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A precondition on the arguments of a call was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The operation exists structurally but is not available on this
    /// value (removing a property key, writing through a read-only view).
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    /// A catalog configuration document could not be applied.
    #[error("configuration error: {0}")]
    Config(String),
    /// A command failed while executing.
    #[error("command failed: {0}")]
    Failed(String),
    /// Any other error raised by a command.
    #[error(transparent)]
    Other(Box<dyn Error + Send + Sync>),
}

impl ChainError {
    /// Shorthand for [`ChainError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        ChainError::Failed(message.into())
    }

    /// Wrap a foreign error.
    pub fn other<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        ChainError::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::InvalidArgument(err.to_string())
    }
}
