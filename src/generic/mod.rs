//! Reusable commands built on catalogs and contexts.

mod copy;
mod lookup;
mod remove;

pub use copy::CopyCommand;
pub use lookup::LookupCommand;
pub use remove::RemoveCommand;
