//! Chain cache: root identity -> partition
//!
//! Two-level, identity-keyed and lock-sharded:
//!
//! ```text
//! ChainCache
//!   └─ DashMap<RootKey, Arc<Partition>>
//!        └─ DashMap<NodeKey, node>
//! ```
//!
//! Partitions are created lazily by the first walk from a root and removed as a
//! whole by a consuming `get()`, by [`ChainCache::evict`], [`ChainCache::clear`]
//! or [`ChainCache::sweep_orphans`].

use super::identity::{RootKey, RootRef};
use super::metrics::ChainCacheMetrics;
use super::partition::Partition;
use crate::config::{ChainConfig, ConfigResult};
use crate::errors::{ChainError, Result};
use crate::features::chain::Node;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static GLOBAL: Lazy<Arc<ChainCache>> = Lazy::new(|| {
    let config = ChainConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid chain cache environment, using defaults");
        ChainConfig::default()
    });
    ChainCache::new(config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "chain cache setup failed, using defaults");
        ChainCache::with_defaults()
    })
});

/// Identity-keyed cache of chain nodes
pub struct ChainCache {
    partitions: DashMap<RootKey, Arc<Partition>>,
    config: ChainConfig,
    metrics: ChainCacheMetrics,
}

impl ChainCache {
    /// Create a cache
    ///
    /// Fails if `config` does not validate or its metrics namespace is rejected
    /// by prometheus.
    pub fn new(config: ChainConfig) -> ConfigResult<Arc<Self>> {
        config.validate()?;
        let metrics = ChainCacheMetrics::new(&config.metrics_namespace)?;

        Ok(Arc::new(Self {
            partitions: DashMap::new(),
            config,
            metrics,
        }))
    }

    /// Cache with [`ChainConfig::default`]
    ///
    /// # Panics
    ///
    /// Only if the default config stopped validating, which
    /// `test_with_defaults_builds` guards against.
    pub fn with_defaults() -> Arc<Self> {
        Self::new(ChainConfig::default()).expect("default chain config is valid")
    }

    /// Process-wide cache used by the free entry points
    ///
    /// Configured from `GETTY_*` environment variables on first use. Partitions
    /// live until a consuming `get()`; call [`clear`](Self::clear) or
    /// [`sweep_orphans`](Self::sweep_orphans) to bound it otherwise.
    pub fn global() -> &'static Arc<ChainCache> {
        &GLOBAL
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn metrics(&self) -> &ChainCacheMetrics {
        &self.metrics
    }

    // ═══════════════════════════════════════════════════════════════════
    // Entry points
    // ═══════════════════════════════════════════════════════════════════

    /// Start a chain, cached or not according to `cached_by_default`
    pub fn start<R>(self: &Arc<Self>, root: impl Into<Option<Arc<R>>>) -> Result<Node<R>>
    where
        R: Send + Sync + 'static,
    {
        if self.config.cached_by_default {
            self.start_cached(root)
        } else {
            self.start_uncached(root)
        }
    }

    /// Start a chain whose nodes are shared through this cache
    pub fn start_cached<R>(self: &Arc<Self>, root: impl Into<Option<Arc<R>>>) -> Result<Node<R>>
    where
        R: Send + Sync + 'static,
    {
        let root = root.into().ok_or(ChainError::InvalidRoot)?;
        Ok(Node::root(self, root, true))
    }

    /// Start a chain that never populates the cache
    pub fn start_uncached<R>(self: &Arc<Self>, root: impl Into<Option<Arc<R>>>) -> Result<Node<R>>
    where
        R: Send + Sync + 'static,
    {
        let root = root.into().ok_or(ChainError::InvalidRoot)?;
        Ok(Node::root(self, root, false))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Partitions
    // ═══════════════════════════════════════════════════════════════════

    /// Partition for `root`, created if missing
    ///
    /// `None` once the root has been dropped: its address is still reserved by
    /// the probe, but nothing can start a new walk from it.
    pub(crate) fn partition(&self, root: &RootRef) -> Option<Arc<Partition>> {
        if !root.is_alive() {
            return None;
        }

        let mut created = false;
        let partition = self
            .partitions
            .entry(root.key())
            .or_insert_with(|| {
                created = true;
                Arc::new(Partition::new(root.clone()))
            })
            .value()
            .clone();

        if created {
            self.metrics.partitions_created.inc();
            self.metrics.live_partitions.inc();
            tracing::trace!(root = ?root.key(), "chain partition created");
        }
        Some(partition)
    }

    /// Drop the partition for `root`
    ///
    /// Returns whether one was present. Handles on its nodes stay valid; the
    /// next walk from `root` starts a new partition.
    pub fn evict<R: ?Sized + 'static>(&self, root: &Arc<R>) -> bool {
        self.evict_key(&RootKey::of(root))
    }

    pub(crate) fn evict_key(&self, key: &RootKey) -> bool {
        match self.partitions.remove(key) {
            Some((_, partition)) => {
                self.metrics.evictions.inc();
                self.metrics.live_partitions.dec();
                tracing::debug!(root = ?key, released = partition.len(), "chain partition evicted");
                true
            }
            None => false,
        }
    }

    /// Drop every partition
    pub fn clear(&self) {
        let mut released = 0;
        self.partitions.retain(|_, _| {
            released += 1;
            false
        });
        self.metrics.live_partitions.sub(released as i64);

        if released > 0 {
            tracing::debug!("chain cache cleared {} partitions", released);
        }
    }

    /// Drop partitions whose root is no longer held outside the cache
    ///
    /// Returns the number of partitions removed.
    pub fn sweep_orphans(&self) -> usize {
        let candidates: Vec<(RootKey, Arc<Partition>)> = self
            .partitions
            .iter()
            .filter(|entry| entry.value().is_orphaned())
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        let mut swept = 0;
        for (key, partition) in candidates {
            let removed = self.partitions.remove_if(&key, |_, current| {
                Arc::ptr_eq(current, &partition) && current.is_orphaned()
            });
            if removed.is_some() {
                swept += 1;
            }
        }

        if swept > 0 {
            tracing::debug!("chain cache swept {} orphan partitions", swept);
            self.metrics.orphans_swept.inc_by(swept as u64);
            self.metrics.live_partitions.sub(swept as i64);
        }
        swept
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Number of live partitions
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn contains_root<R: ?Sized + 'static>(&self, root: &Arc<R>) -> bool {
        self.partitions.contains_key(&RootKey::of(root))
    }

    /// Nodes cached for `root` (0 if it has no partition)
    pub fn node_count<R: ?Sized + 'static>(&self, root: &Arc<R>) -> usize {
        self.partitions
            .get(&RootKey::of(root))
            .map(|partition| partition.len())
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn partition_of<R: ?Sized + 'static>(&self, root: &Arc<R>) -> Option<Arc<Partition>> {
        self.partitions
            .get(&RootKey::of(root))
            .map(|partition| Arc::clone(partition.value()))
    }
}

impl std::fmt::Debug for ChainCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainCache")
            .field("partitions", &self.partitions.len())
            .field("config", &self.config)
            .finish()
    }
}
