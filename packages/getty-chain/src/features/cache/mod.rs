//! Identity-keyed chain cache
//!
//! - **identity**: root and node keys (allocation address + `TypeId`)
//! - **partition**: the nodes of one root's chain
//! - **chain_cache**: root -> partition, eviction and orphan sweeping
//! - **metrics**: prometheus counters per cache

mod chain_cache;
pub(crate) mod identity;
mod metrics;
pub(crate) mod partition;

pub use chain_cache::ChainCache;
pub use identity::RootKey;
pub use metrics::ChainCacheMetrics;
pub use partition::Partition;
