//! Entry points on the process-wide cache

use super::node::Node;
use crate::errors::Result;
use crate::features::cache::ChainCache;
use std::sync::Arc;

/// Start a chain on [`ChainCache::global`], cached unless `GETTY_CACHED_BY_DEFAULT` says otherwise
pub fn start<R>(root: impl Into<Option<Arc<R>>>) -> Result<Node<R>>
where
    R: Send + Sync + 'static,
{
    ChainCache::global().start(root)
}

pub fn start_cached<R>(root: impl Into<Option<Arc<R>>>) -> Result<Node<R>>
where
    R: Send + Sync + 'static,
{
    ChainCache::global().start_cached(root)
}

pub fn start_uncached<R>(root: impl Into<Option<Arc<R>>>) -> Result<Node<R>>
where
    R: Send + Sync + 'static,
{
    ChainCache::global().start_uncached(root)
}
