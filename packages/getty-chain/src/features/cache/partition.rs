//! Per-root partition of cached nodes

use super::identity::{NodeKey, RootRef};
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

type ErasedNode = Arc<dyn Any + Send + Sync>;

/// All nodes reached from one root
///
/// A partition is only ever dropped as a whole: eviction removes it from the
/// cache and never clears it in place.
pub struct Partition {
    root: RootRef,
    nodes: DashMap<NodeKey, ErasedNode>,
}

/// Result of a node lookup
pub(crate) struct Lookup<N> {
    pub node: Arc<N>,
    pub created: bool,
}

impl Partition {
    pub(crate) fn new(root: RootRef) -> Self {
        Self {
            root,
            nodes: DashMap::new(),
        }
    }

    /// Node stored under `key`, created with `constructor` if missing
    ///
    /// At most one node is ever stored per key. `constructor` runs while the
    /// key's shard is locked and must not touch this partition.
    /// Returns `None` if the stored node is not an `N`.
    pub(crate) fn get_or_create_node<N, F>(&self, key: NodeKey, constructor: F) -> Option<Lookup<N>>
    where
        N: Any + Send + Sync,
        F: FnOnce() -> N,
    {
        let mut created = false;
        let erased = self
            .nodes
            .entry(key)
            .or_insert_with(|| {
                created = true;
                Arc::new(constructor()) as ErasedNode
            })
            .value()
            .clone();

        erased
            .downcast::<N>()
            .ok()
            .map(|node| Lookup { node, created })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// No one outside this partition still holds the root
    ///
    /// The partition's own root nodes each hold one strong reference; anything
    /// above that count belongs to a caller.
    pub(crate) fn is_orphaned(&self) -> bool {
        let strong = self.root.strong_count();
        if strong == 0 {
            return true;
        }
        let root_key = self.root.key();
        let held_here = self
            .nodes
            .iter()
            .filter(|entry| entry.key().holds(&root_key))
            .count();
        strong <= held_here
    }
}

impl std::fmt::Debug for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Partition")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}
