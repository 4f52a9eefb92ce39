//! State shared by every node of one chain

use crate::errors::ChainError;
use crate::features::cache::identity::RootRef;
use crate::features::cache::{ChainCache, Partition};
use crate::features::recovery::policy::FailureSink;
use std::sync::{Arc, Weak};

/// The chain a node belongs to
///
/// Holds the cache weakly; a chain outliving its cache keeps working uncached.
pub(crate) struct ChainContext {
    cache: Weak<ChainCache>,
    root: RootRef,
    cached: bool,
    catch_panics: bool,
    log_swallowed: bool,
}

impl ChainContext {
    pub(crate) fn new(cache: &Arc<ChainCache>, root: RootRef, cached: bool) -> Self {
        let config = cache.config();
        Self {
            cache: Arc::downgrade(cache),
            root,
            cached,
            catch_panics: config.catch_panics,
            log_swallowed: config.log_swallowed_failures,
        }
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.cached
    }

    pub(crate) fn root(&self) -> &RootRef {
        &self.root
    }

    pub(crate) fn cache(&self) -> Option<Arc<ChainCache>> {
        self.cache.upgrade()
    }

    /// The cache and this chain's current partition, for cached chains only
    pub(crate) fn partition(&self) -> Option<(Arc<ChainCache>, Arc<Partition>)> {
        if !self.cached {
            return None;
        }
        let cache = self.cache()?;
        let partition = cache.partition(&self.root)?;
        Some((cache, partition))
    }
}

impl FailureSink for ChainContext {
    fn catch_panics(&self) -> bool {
        self.catch_panics
    }

    fn swallowed(&self, failure: &ChainError) {
        if let Some(cache) = self.cache() {
            cache.metrics().swallowed_failures.inc();
        }
        if self.log_swallowed {
            tracing::debug!(root = ?self.root.key(), error = %failure, "accessor failure swallowed");
        }
    }
}

impl std::fmt::Debug for ChainContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainContext")
            .field("root", &self.root)
            .field("cached", &self.cached)
            .finish()
    }
}
