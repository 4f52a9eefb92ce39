/*
 * Getty Chain - null-safe accessor chains with chain-scoped memoization
 *
 * Layout:
 * - errors     : ChainError / AccessorFailure
 * - config/    : ChainConfig (defaults, YAML v1, GETTY_* env)
 * - features/  : recovery (policies, handlers), cache (identity-keyed
 *                partitions), chain (Node, entry points), call
 *
 * A chain starts from a root `Arc` and walks accessors with `then*`. Within a
 * cached chain every step's node is keyed by the identity of its value, so
 * repeated walks from the same root share nodes until a consuming `get()`.
 */

#![allow(clippy::type_complexity)] // Fallback and handler closures
#![allow(clippy::new_ret_no_self)] // ChainCache::new returns Arc<Self>

pub mod config;
pub mod errors;
pub mod features;

pub use config::{ChainConfig, ConfigError, ConfigResult};
pub use errors::{AccessorFailure, BoxError, ChainError, Result};
pub use features::cache::{ChainCache, ChainCacheMetrics, RootKey};
pub use features::call::{call, call_or_default, call_or_default_with, call_or_else};
pub use features::chain::{start, start_cached, start_uncached, Node, Slot};
pub use features::recovery::{
    observe, recover, return_absent, FailureHandler, Fallback, Observe, Outcome, Recover,
    RecoveryMode, ReturnAbsent,
};
