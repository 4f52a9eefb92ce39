//! Prometheus metrics for the chain cache
//!
//! Metrics are created unregistered so that several caches can coexist in one
//! process; call [`ChainCacheMetrics::register`] to expose one cache's set.

use prometheus::{IntCounter, IntGauge, Opts, Registry};

#[derive(Clone)]
pub struct ChainCacheMetrics {
    pub partitions_created: IntCounter,
    pub nodes_created: IntCounter,
    pub node_hits: IntCounter,
    pub evictions: IntCounter,
    pub orphans_swept: IntCounter,
    pub swallowed_failures: IntCounter,
    pub live_partitions: IntGauge,
}

impl ChainCacheMetrics {
    pub fn new(namespace: &str) -> prometheus::Result<Self> {
        let opts = |name: &str, help: &str| Opts::new(name, help).namespace(namespace);

        Ok(Self {
            partitions_created: IntCounter::with_opts(opts(
                "chain_partitions_created_total",
                "Per-root partitions created",
            ))?,
            nodes_created: IntCounter::with_opts(opts(
                "chain_nodes_created_total",
                "Cached chain nodes created",
            ))?,
            node_hits: IntCounter::with_opts(opts(
                "chain_node_hits_total",
                "Chain steps served by an existing node",
            ))?,
            evictions: IntCounter::with_opts(opts(
                "chain_evictions_total",
                "Partitions evicted by get() or evict()",
            ))?,
            orphans_swept: IntCounter::with_opts(opts(
                "chain_orphans_swept_total",
                "Partitions removed because their root was dropped",
            ))?,
            swallowed_failures: IntCounter::with_opts(opts(
                "chain_swallowed_failures_total",
                "Accessor failures turned into absence without a handler",
            ))?,
            live_partitions: IntGauge::with_opts(opts(
                "chain_live_partitions",
                "Partitions currently held by the cache",
            ))?,
        })
    }

    /// Expose these metrics through `registry`
    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.partitions_created.clone()))?;
        registry.register(Box::new(self.nodes_created.clone()))?;
        registry.register(Box::new(self.node_hits.clone()))?;
        registry.register(Box::new(self.evictions.clone()))?;
        registry.register(Box::new(self.orphans_swept.clone()))?;
        registry.register(Box::new(self.swallowed_failures.clone()))?;
        registry.register(Box::new(self.live_partitions.clone()))?;
        Ok(())
    }

    /// Share of cached steps answered by an existing node
    pub fn hit_rate(&self) -> f64 {
        let hits = self.node_hits.get() as f64;
        let total = hits + self.nodes_created.get() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

impl std::fmt::Debug for ChainCacheMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainCacheMetrics")
            .field("partitions_created", &self.partitions_created.get())
            .field("nodes_created", &self.nodes_created.get())
            .field("node_hits", &self.node_hits.get())
            .field("evictions", &self.evictions.get())
            .field("live_partitions", &self.live_partitions.get())
            .finish()
    }
}
