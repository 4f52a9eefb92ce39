//! Shared fixtures for getty-chain integration tests

#![allow(dead_code)]

use getty_chain::{ChainCache, ChainConfig};
use std::collections::HashMap;
use std::sync::Arc;

pub type IntMap = HashMap<i32, Arc<i32>>;

pub const GOOD_KEY: i32 = 1;
pub const NULL_KEY: i32 = -1;
pub const GOOD_VALUE: i32 = 1;
pub const DEFAULT_VALUE: i32 = 123;

/// `{1: 1}`
pub fn single_map() -> Arc<IntMap> {
    Arc::new(HashMap::from([(GOOD_KEY, Arc::new(GOOD_VALUE))]))
}

/// `{0: 0, 1: 1, ..., 9: 9}`
pub fn ten_map() -> Arc<IntMap> {
    Arc::new((0..10).map(|i| (i, Arc::new(i))).collect())
}

pub fn good_getter(map: &IntMap) -> Option<Arc<i32>> {
    map.get(&GOOD_KEY).cloned()
}

pub fn null_getter(map: &IntMap) -> Option<Arc<i32>> {
    map.get(&NULL_KEY).cloned()
}

pub fn bad_getter(_: &IntMap) -> Result<Arc<i32>, String> {
    Err("bad getter".to_string())
}

pub fn getter(key: i32) -> impl Fn(&IntMap) -> Option<Arc<i32>> {
    move |map: &IntMap| map.get(&key).cloned()
}

pub fn to_double(value: &i32) -> Arc<f64> {
    Arc::new(f64::from(*value))
}

/// A private cache so tests never see each other's partitions
pub fn fresh_cache() -> Arc<ChainCache> {
    ChainCache::new(ChainConfig::default()).expect("default config")
}
