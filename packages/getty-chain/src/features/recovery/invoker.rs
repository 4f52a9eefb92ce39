//! Accessor invocation with failure capture

use super::outcome::Outcome;
use crate::errors::AccessorFailure;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Run a supplier, turning returned errors (and panics, if enabled) into failures
pub(crate) fn attempt<O, F>(supplier: F, catch_panics: bool) -> Result<Option<O::Value>, AccessorFailure>
where
    F: FnOnce() -> O,
    O: Outcome,
{
    if !catch_panics {
        return supplier().into_outcome();
    }

    match panic::catch_unwind(AssertUnwindSafe(supplier)) {
        Ok(outcome) => outcome.into_outcome(),
        Err(payload) => Err(AccessorFailure::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Run an accessor against a step's value
///
/// An absent value never reaches the accessor; it is reported as
/// [`AccessorFailure::AbsentInput`] so the recovery policy sees it like any
/// other failure.
pub(crate) fn invoke<T, O, F>(
    input: Option<&T>,
    accessor: F,
    catch_panics: bool,
) -> Result<Option<O::Value>, AccessorFailure>
where
    T: ?Sized,
    F: FnOnce(&T) -> O,
    O: Outcome,
{
    let value = input.ok_or(AccessorFailure::AbsentInput)?;
    attempt(|| accessor(value), catch_panics)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_invoke_returns_value() {
        let input = 21;
        let result = invoke(Some(&input), |v: &i32| Arc::new(v * 2), true).unwrap();
        assert_eq!(*result.unwrap(), 42);
    }

    #[test]
    fn test_invoke_absent_input_skips_accessor() {
        let mut called = false;
        let result = invoke(None::<&i32>, |_: &i32| {
            called = true;
            Arc::new(0)
        }, true);

        assert!(matches!(result, Err(AccessorFailure::AbsentInput)));
        assert!(!called);
    }

    #[test]
    fn test_attempt_captures_panic() {
        let result = attempt(|| -> Option<Arc<i32>> { panic!("kaboom") }, true);
        match result {
            Err(AccessorFailure::Panicked(msg)) => assert_eq!(msg, "kaboom"),
            other => panic!("expected captured panic, got {:?}", other),
        }
    }

    #[test]
    fn test_attempt_captures_formatted_panic() {
        let key = 7;
        let result = attempt(|| -> Option<Arc<i32>> { panic!("missing key {}", key) }, true);
        assert!(matches!(result, Err(AccessorFailure::Panicked(ref m)) if m == "missing key 7"));
    }

    #[test]
    #[should_panic(expected = "kaboom")]
    fn test_attempt_propagates_panic_when_disabled() {
        let _ = attempt(|| -> Option<Arc<i32>> { panic!("kaboom") }, false);
    }
}
