//! Commands, filters and the tagged link a chain or catalog holds.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::ChainError;

/// A unit of work run against a [`Context`].
///
/// Returning `Ok(true)` means processing is complete and the owning chain
/// stops; `Ok(false)` hands the context to the next command.
///
/// Implementations are shared between chains and threads, so they must
/// not keep per-request state. Everything that belongs to one unit of
/// work lives in the context.
pub trait Command: Send + Sync {
    fn execute(&self, context: &mut dyn Context) -> Result<bool, ChainError>;
}

/// A command whose owning chain calls [`Filter::postprocess`] during the
/// unwind, whether the forward walk succeeded or failed.
pub trait Filter: Command {
    /// Clean up after the forward walk.
    ///
    /// `error` is the error that stopped the chain, if any. Returning
    /// `Ok(true)` marks that error as handled so the chain does not
    /// return it. An `Err` is logged and ignored by the chain.
    fn postprocess(
        &self,
        context: &mut dyn Context,
        error: Option<&ChainError>,
    ) -> Result<bool, ChainError>;
}

/// A chain element: either a plain command or one with a cleanup hook.
#[derive(Clone)]
pub enum Link {
    Command(Arc<dyn Command>),
    Filter(Arc<dyn Filter>),
}

impl Link {
    /// Wrap a plain command.
    pub fn command<C: Command + 'static>(command: C) -> Self {
        Link::Command(Arc::new(command))
    }

    /// Wrap a filter.
    pub fn filter<F: Filter + 'static>(filter: F) -> Self {
        Link::Filter(Arc::new(filter))
    }

    /// Wrap a closure as a plain command.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Context) -> Result<bool, ChainError> + Send + Sync + 'static,
    {
        Link::Command(Arc::new(FnCommand(f)))
    }

    /// The filter behind this link, if it has a cleanup hook.
    pub fn as_filter(&self) -> Option<&Arc<dyn Filter>> {
        match self {
            Link::Filter(filter) => Some(filter),
            Link::Command(_) => None,
        }
    }

    pub fn is_filter(&self) -> bool {
        matches!(self, Link::Filter(_))
    }

    /// True when both links point at the same command instance.
    pub fn ptr_eq(&self, other: &Link) -> bool {
        match (self, other) {
            (Link::Command(a), Link::Command(b)) => Arc::ptr_eq(a, b),
            (Link::Filter(a), Link::Filter(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Command for Link {
    fn execute(&self, context: &mut dyn Context) -> Result<bool, ChainError> {
        match self {
            Link::Command(command) => command.execute(context),
            Link::Filter(filter) => filter.execute(context),
        }
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Command(_) => f.write_str("Link::Command"),
            Link::Filter(_) => f.write_str("Link::Filter"),
        }
    }
}

impl From<Arc<dyn Command>> for Link {
    fn from(command: Arc<dyn Command>) -> Self {
        Link::Command(command)
    }
}

impl From<Arc<dyn Filter>> for Link {
    fn from(filter: Arc<dyn Filter>) -> Self {
        Link::Filter(filter)
    }
}

/// Adapter that runs a closure as a [`Command`].
pub struct FnCommand<F>(pub F);

impl<F> Command for FnCommand<F>
where
    F: Fn(&mut dyn Context) -> Result<bool, ChainError> + Send + Sync,
{
    fn execute(&self, context: &mut dyn Context) -> Result<bool, ChainError> {
        (self.0)(context)
    }
}
