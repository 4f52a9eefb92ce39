//! One-off guarded calls
//!
//! The same failure capture a chain step uses, for a single supplier without a
//! chain around it. Panics are always captured here.

use crate::errors::AccessorFailure;
use crate::features::recovery::{attempt, Outcome};

/// Run `supplier`; failures become `None`
pub fn call<O, F>(supplier: F) -> Option<O::Value>
where
    F: FnOnce() -> O,
    O: Outcome,
{
    call_or_else(supplier, |failure| {
        tracing::debug!(error = %failure, "guarded call failed");
        None
    })
}

/// Run `supplier`; a failure or absent result yields `default`
pub fn call_or_default<O, F>(supplier: F, default: O::Value) -> O::Value
where
    F: FnOnce() -> O,
    O: Outcome,
{
    call(supplier).unwrap_or(default)
}

/// Like [`call_or_default`], building the default only when it is needed
pub fn call_or_default_with<O, F, D>(supplier: F, default: D) -> O::Value
where
    F: FnOnce() -> O,
    O: Outcome,
    D: FnOnce() -> O::Value,
{
    call(supplier).unwrap_or_else(default)
}

/// Run `supplier`; `recover` decides the result of a failure
pub fn call_or_else<O, F, H>(supplier: F, recover: H) -> Option<O::Value>
where
    F: FnOnce() -> O,
    O: Outcome,
    H: FnOnce(&AccessorFailure) -> Option<O::Value>,
{
    match attempt(supplier, true) {
        Ok(value) => value,
        Err(failure) => recover(&failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::Arc;

    #[test]
    fn test_call_value() {
        assert_eq!(call(|| Some(3)), Some(3));
    }

    #[test]
    fn test_call_error_is_none() {
        let value = call(|| "x".parse::<i32>());
        assert_eq!(value, None);
    }

    #[test]
    fn test_call_panic_is_none() {
        let value: Option<Arc<i32>> = call(|| -> Arc<i32> { panic!("boom") });
        assert!(value.is_none());
    }

    #[test]
    fn test_call_or_default_covers_absent_and_failure() {
        assert_eq!(call_or_default(|| None::<i32>, 7), 7);
        assert_eq!(call_or_default(|| "x".parse::<i32>(), 7), 7);
        assert_eq!(call_or_default(|| "5".parse::<i32>(), 7), 5);
    }

    #[test]
    fn test_call_or_default_with_builds_default_lazily() {
        let built = Cell::new(0);
        let default = || {
            built.set(built.get() + 1);
            7
        };

        assert_eq!(call_or_default_with(|| Some(5), default), 5);
        assert_eq!(built.get(), 0);

        assert_eq!(call_or_default_with(|| None::<i32>, default), 7);
        assert_eq!(built.get(), 1);

        assert_eq!(call_or_default_with(|| "x".parse::<i32>(), default), 7);
        assert_eq!(built.get(), 2);

        let panicked: Arc<i32> =
            call_or_default_with(|| -> Arc<i32> { panic!("boom") }, || Arc::new(9));
        assert_eq!(*panicked, 9);
    }

    #[test]
    fn test_call_or_else_sees_failure() {
        let value = call_or_else(
            || -> Result<i32, String> { Err("bad input".to_string()) },
            |failure| {
                assert_eq!(failure.to_string(), "accessor failed: bad input");
                Some(-1)
            },
        );
        assert_eq!(value, Some(-1));
    }
}
