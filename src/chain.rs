//! Chain — an ordered, immutable sequence of links with forward-execute /
//! reverse-postprocess semantics.
//!
//! ## Example
//!
//! ```ignore
//! use command_chain::{Chain, Command, Context, MapContext};
//!
//! let chain = Chain::builder()
//!     .filter(TransactionFilter::default())
//!     .command(LoadUser)
//!     .command(RenderPage)
//!     .build();
//!
//! let mut ctx = MapContext::new();
//! let done = chain.execute(&mut ctx)?;
//! ```

use std::sync::Arc;

use tracing::{trace, warn};

use crate::command::{Command, Filter, Link};
use crate::context::Context;
use crate::error::ChainError;

/// Accumulates links and produces an immutable [`Chain`].
#[derive(Default, Clone)]
pub struct ChainBuilder {
    links: Vec<Link>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link.
    pub fn add_command(&mut self, link: impl Into<Link>) -> &mut Self {
        self.links.push(link.into());
        self
    }

    /// Append a link.
    ///
    /// Uses builder pattern — returns `self` for chaining.
    pub fn link(mut self, link: impl Into<Link>) -> Self {
        self.links.push(link.into());
        self
    }

    /// Append a plain command.
    pub fn command<C: Command + 'static>(self, command: C) -> Self {
        self.link(Link::command(command))
    }

    /// Append a filter; its `postprocess` runs during the unwind.
    pub fn filter<F: Filter + 'static>(self, filter: F) -> Self {
        self.link(Link::filter(filter))
    }

    /// Append a closure as a plain command.
    pub fn command_fn<F>(self, f: F) -> Self
    where
        F: Fn(&mut dyn Context) -> Result<bool, ChainError> + Send + Sync + 'static,
    {
        self.link(Link::from_fn(f))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Freeze the accumulated links into a chain.
    pub fn build(self) -> Chain {
        Chain {
            links: self.links.into(),
        }
    }
}

/// An ordered list of links executed as one command.
///
/// A chain is itself a [`Command`], so it can be registered in a catalog or
/// nested inside another chain. Its link list never changes after
/// construction; cloning shares it.
#[derive(Clone)]
pub struct Chain {
    links: Arc<[Link]>,
}

impl Default for Chain {
    fn default() -> Self {
        Chain::new(Vec::new())
    }
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Build a chain directly from a list of links.
    pub fn new(links: impl IntoIterator<Item = Link>) -> Self {
        Chain {
            links: links.into_iter().collect(),
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Command for Chain {
    /// Run every link in order until one returns `true` or fails, then call
    /// `postprocess` on the filters among the executed links in reverse.
    ///
    /// The error from the forward walk is returned unless some filter
    /// reports it handled. Errors from `postprocess` are logged and
    /// dropped.
    fn execute(&self, context: &mut dyn Context) -> Result<bool, ChainError> {
        let links = &self.links[..];
        let mut saved_result = false;
        let mut saved_error: Option<ChainError> = None;

        let mut index = 0;
        while index < links.len() {
            trace!(index, "executing link");
            match links[index].execute(context) {
                Ok(true) => {
                    saved_result = true;
                    break;
                }
                Ok(false) => index += 1,
                Err(err) => {
                    saved_error = Some(err);
                    break;
                }
            }
        }

        // Walked off the end: the last executed link is the final one.
        let last = if index >= links.len() {
            links.len().checked_sub(1)
        } else {
            Some(index)
        };

        let mut handled = false;
        if let Some(last) = last {
            for (position, link) in links[..=last].iter().enumerate().rev() {
                let Some(filter) = link.as_filter() else {
                    continue;
                };
                trace!(index = position, "postprocessing filter");
                match filter.postprocess(context, saved_error.as_ref()) {
                    Ok(result) => handled |= result,
                    Err(err) => {
                        warn!(index = position, error = %err, "postprocess failed; ignoring")
                    }
                }
            }
        }

        match saved_error {
            Some(err) if !handled => Err(err),
            _ => Ok(saved_result),
        }
    }
}

impl From<Chain> for Link {
    fn from(chain: Chain) -> Self {
        Link::command(chain)
    }
}

impl From<ChainBuilder> for Chain {
    fn from(builder: ChainBuilder) -> Self {
        builder.build()
    }
}
