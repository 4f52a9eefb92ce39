//! Chain nodes
//!
//! A [`Node`] is an immutable handle on one step of a chain: the step's value
//! (possibly absent), the chain it belongs to and its recovery mode. Every
//! `then*` call runs one accessor against the value and yields the next node.
//! In a cached chain that node is looked up by the identity of the new value
//! inside the root's partition, so repeated walks share nodes.

use super::context::ChainContext;
use super::slot::Slot;
use crate::errors::Result;
use crate::features::cache::identity::{NodeKey, RootRef};
use crate::features::cache::partition::Lookup;
use crate::features::cache::ChainCache;
use crate::features::recovery::policy::{resolve, Policy};
use crate::features::recovery::{Fallback, FailureHandler, Outcome, RecoveryMode};
use std::fmt;
use std::sync::Arc;

pub(crate) struct NodeInner<T: ?Sized> {
    slot: Slot<T>,
    mode: RecoveryMode,
    chain: Arc<ChainContext>,
}

/// One step of a chain
pub struct Node<T: ?Sized> {
    inner: Arc<NodeInner<T>>,
}

impl<T> Node<T>
where
    T: Send + Sync + 'static,
{
    pub(crate) fn root(cache: &Arc<ChainCache>, root: Arc<T>, cached: bool) -> Self {
        let chain = Arc::new(ChainContext::new(cache, RootRef::new(&root), cached));
        Node::attach(&chain, Slot::Present(root), RecoveryMode::Unhandled)
    }
}

impl<T> Node<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// Node for `slot` in `chain`, shared through the partition when cached
    fn attach(chain: &Arc<ChainContext>, slot: Slot<T>, mode: RecoveryMode) -> Self {
        if let Some((cache, partition)) = chain.partition() {
            let key = NodeKey::for_value(slot.as_arc(), mode);
            let lookup = partition.get_or_create_node(key, || NodeInner {
                slot: slot.clone(),
                mode,
                chain: Arc::clone(chain),
            });

            if let Some(Lookup { node, created }) = lookup {
                if created {
                    cache.metrics().nodes_created.inc();
                    tracing::trace!(
                        root = ?chain.root().key(),
                        %mode,
                        present = node.slot.is_present(),
                        "chain node created"
                    );
                } else {
                    cache.metrics().node_hits.inc();
                }
                return Node { inner: node };
            }
        }

        Node {
            inner: Arc::new(NodeInner {
                slot,
                mode,
                chain: Arc::clone(chain),
            }),
        }
    }

    fn advance<R>(&self, value: Option<Arc<R>>, mode: RecoveryMode) -> Node<R>
    where
        R: ?Sized + Send + Sync + 'static,
    {
        Node::attach(&self.inner.chain, Slot::from(value), mode)
    }

    fn step<R, O, F>(
        &self,
        accessor: F,
        policy: Policy<'_, T, R>,
        handler: Option<&dyn FailureHandler<T, R>>,
        mode: RecoveryMode,
    ) -> Node<R>
    where
        R: ?Sized + Send + Sync + 'static,
        F: FnOnce(&T) -> O,
        O: Outcome<Value = Arc<R>>,
    {
        // Only RequireNonNull without a handler returns Err; that path is then_non_null.
        let value = resolve(
            self.inner.slot.value(),
            accessor,
            policy,
            handler,
            &*self.inner.chain,
        )
        .unwrap_or_default();
        self.advance(value, mode)
    }

    /// Apply `accessor`; failures and absence yield an absent node
    pub fn then<R, O, F>(&self, accessor: F) -> Node<R>
    where
        R: ?Sized + Send + Sync + 'static,
        F: FnOnce(&T) -> O,
        O: Outcome<Value = Arc<R>>,
    {
        self.step(accessor, Policy::PropagateAbsent, None, self.mode())
    }

    /// Apply `accessor`, routing failures through `handler`
    ///
    /// The resulting node is in [`RecoveryMode::Handled`].
    pub fn then_handled<R, O, F, H>(&self, accessor: F, handler: H) -> Node<R>
    where
        R: ?Sized + Send + Sync + 'static,
        F: FnOnce(&T) -> O,
        O: Outcome<Value = Arc<R>>,
        H: FailureHandler<T, R>,
    {
        self.step(
            accessor,
            Policy::PropagateAbsent,
            Some(&handler as &dyn FailureHandler<T, R>),
            RecoveryMode::Handled,
        )
    }

    /// Apply `accessor`; a failure or an absent result yields `fallback`
    pub fn then_or_default<'f, R, O, F>(
        &self,
        accessor: F,
        fallback: impl Into<Fallback<'f, T, R>>,
    ) -> Node<R>
    where
        R: ?Sized + Send + Sync + 'static,
        F: FnOnce(&T) -> O,
        O: Outcome<Value = Arc<R>>,
    {
        self.step(
            accessor,
            Policy::SubstituteDefault(fallback.into()),
            None,
            self.mode(),
        )
    }

    /// Like [`then_or_default`](Self::then_or_default), with `handler` seeing
    /// failures first. The fallback applies when the handler yields nothing.
    pub fn then_or_default_handled<'f, R, O, F, H>(
        &self,
        accessor: F,
        fallback: impl Into<Fallback<'f, T, R>>,
        handler: H,
    ) -> Node<R>
    where
        R: ?Sized + Send + Sync + 'static,
        F: FnOnce(&T) -> O,
        O: Outcome<Value = Arc<R>>,
        H: FailureHandler<T, R>,
    {
        self.step(
            accessor,
            Policy::SubstituteDefault(fallback.into()),
            Some(&handler as &dyn FailureHandler<T, R>),
            RecoveryMode::Handled,
        )
    }

    /// Apply `accessor`, requiring a value
    ///
    /// Accessor failures are swallowed as in [`then`](Self::then); an absent
    /// result is a [`ChainError::MissingValue`](crate::ChainError::MissingValue).
    pub fn then_non_null<R, O, F>(&self, accessor: F) -> Result<Node<R>>
    where
        R: ?Sized + Send + Sync + 'static,
        F: FnOnce(&T) -> O,
        O: Outcome<Value = Arc<R>>,
    {
        let value = resolve(
            self.inner.slot.value(),
            accessor,
            Policy::RequireNonNull,
            None,
            &*self.inner.chain,
        )?;
        Ok(self.advance(value, self.mode()))
    }

    /// Apply `accessor`, requiring a value; `handler` answers for a failure and
    /// again (with `MissingValue`) if the result is still absent
    pub fn then_non_null_handled<R, O, F, H>(&self, accessor: F, handler: H) -> Node<R>
    where
        R: ?Sized + Send + Sync + 'static,
        F: FnOnce(&T) -> O,
        O: Outcome<Value = Arc<R>>,
        H: FailureHandler<T, R>,
    {
        self.step(
            accessor,
            Policy::RequireNonNull,
            Some(&handler as &dyn FailureHandler<T, R>),
            RecoveryMode::Handled,
        )
    }

    /// Final value; releases the chain's partition
    pub fn get(&self) -> Option<Arc<T>> {
        let chain = &self.inner.chain;
        if chain.is_cached() {
            if let Some(cache) = chain.cache() {
                cache.evict_key(&chain.root().key());
            }
        }
        self.inner.slot.to_option()
    }

    /// Final value; the chain stays cached for the next walk from the same root
    pub fn get_and_persist(&self) -> Option<Arc<T>> {
        self.inner.slot.to_option()
    }

    pub fn slot(&self) -> &Slot<T> {
        &self.inner.slot
    }

    pub fn is_present(&self) -> bool {
        self.inner.slot.is_present()
    }
}

impl<T: ?Sized> Node<T> {
    pub fn mode(&self) -> RecoveryMode {
        self.inner.mode
    }

    pub fn is_cached(&self) -> bool {
        self.inner.chain.is_cached()
    }

    /// Whether both handles are the same node
    pub fn ptr_eq(&self, other: &Node<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: ?Sized> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("slot", &self.inner.slot)
            .field("mode", &self.inner.mode)
            .field("cached", &self.inner.chain.is_cached())
            .finish()
    }
}
