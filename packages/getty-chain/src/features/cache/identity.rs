//! Identity keys
//!
//! Keys compare allocations, not contents: two equal values behind different
//! `Arc`s are different keys. Every key also carries the `TypeId` of the pointee.

use crate::features::recovery::RecoveryMode;
use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};

#[inline]
fn address_of<T: ?Sized>(value: &Arc<T>) -> usize {
    Arc::as_ptr(value) as *const () as usize
}

/// Identity of the object a chain starts from
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct RootKey {
    type_id: TypeId,
    addr: usize,
}

impl RootKey {
    pub fn of<R: ?Sized + 'static>(root: &Arc<R>) -> Self {
        Self {
            type_id: TypeId::of::<R>(),
            addr: address_of(root),
        }
    }

    pub(crate) fn addr(&self) -> usize {
        self.addr
    }
}

/// Identity of a step's value; absence has its own sentinel
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub(crate) enum ValueIdentity {
    Absent,
    Address(usize),
}

/// Key of a node inside one partition
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub(crate) struct NodeKey {
    type_id: TypeId,
    mode: RecoveryMode,
    identity: ValueIdentity,
}

impl NodeKey {
    pub(crate) fn for_value<T: ?Sized + 'static>(value: Option<&Arc<T>>, mode: RecoveryMode) -> Self {
        let identity = match value {
            Some(value) => ValueIdentity::Address(address_of(value)),
            None => ValueIdentity::Absent,
        };
        Self {
            type_id: TypeId::of::<T>(),
            mode,
            identity,
        }
    }

    /// Whether this node holds the given root itself
    pub(crate) fn holds(&self, root: &RootKey) -> bool {
        self.type_id == root.type_id && self.identity == ValueIdentity::Address(root.addr())
    }
}

/// Root identity plus a weak probe on the root's allocation
///
/// The probe never keeps the root alive, but it does keep the allocation's
/// address reserved, so a `RootKey` cannot be reused by an unrelated object
/// while any node or partition still refers to it.
#[derive(Clone)]
pub(crate) struct RootRef {
    key: RootKey,
    probe: Weak<dyn Any + Send + Sync>,
}

impl RootRef {
    pub(crate) fn new<R: Any + Send + Sync>(root: &Arc<R>) -> Self {
        let erased: Arc<dyn Any + Send + Sync> = Arc::clone(root) as Arc<dyn Any + Send + Sync>;
        Self {
            key: RootKey::of(root),
            probe: Arc::downgrade(&erased),
        }
    }

    pub(crate) fn key(&self) -> RootKey {
        self.key
    }

    /// Strong references to the root held anywhere in the process
    pub(crate) fn strong_count(&self) -> usize {
        self.probe.strong_count()
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

impl std::fmt::Debug for RootRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootRef")
            .field("key", &self.key)
            .field("strong", &self.strong_count())
            .finish()
    }
}
