//! Accessor chains

pub(crate) mod context;
mod entry;
mod node;
mod slot;

pub use entry::{start, start_cached, start_uncached};
pub use node::Node;
pub use slot::Slot;
