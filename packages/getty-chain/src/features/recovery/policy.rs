//! Recovery policies
//!
//! Every step runs through [`resolve`]:
//!
//! 1. call the accessor (an absent input counts as a failure)
//! 2. on failure, ask the handler if there is one, otherwise swallow into absence
//! 3. apply the policy to whatever came out of 1-2
//!
//! `SubstituteDefault` treats "failed" and "returned nothing" the same way:
//! both end at the default.

use super::fallback::Fallback;
use super::handler::FailureHandler;
use super::invoker::invoke;
use super::outcome::Outcome;
use crate::errors::{ChainError, Result};
use std::sync::Arc;

/// How a step turns failures and absence into its value
pub(crate) enum Policy<'a, T: ?Sized, R: ?Sized> {
    /// Failures become absence
    PropagateAbsent,
    /// Failures and absence become the fallback
    SubstituteDefault(Fallback<'a, T, R>),
    /// Absence after recovery is a `MissingValue` error (or the handler's answer)
    RequireNonNull,
}

/// Where a step reports what it could not hand to a handler
pub(crate) trait FailureSink {
    fn catch_panics(&self) -> bool;

    /// A failure turned into absence without any handler seeing it
    fn swallowed(&self, failure: &ChainError);
}

pub(crate) fn resolve<T, R, O, F>(
    input: Option<&T>,
    accessor: F,
    policy: Policy<'_, T, R>,
    handler: Option<&dyn FailureHandler<T, R>>,
    sink: &dyn FailureSink,
) -> Result<Option<Arc<R>>>
where
    T: ?Sized,
    R: ?Sized,
    F: FnOnce(&T) -> O,
    O: Outcome<Value = Arc<R>>,
{
    let value = match invoke(input, accessor, sink.catch_panics()) {
        Ok(value) => value,
        Err(failure) => {
            let failure = ChainError::Accessor(failure);
            match handler {
                Some(handler) => handler.handle(input, &failure),
                None => {
                    sink.swallowed(&failure);
                    None
                }
            }
        }
    };

    match policy {
        Policy::PropagateAbsent => Ok(value),
        Policy::SubstituteDefault(fallback) => match value {
            Some(value) => Ok(Some(value)),
            None => Ok(Some(fallback.resolve(input))),
        },
        Policy::RequireNonNull => {
            if value.is_some() {
                return Ok(value);
            }
            let missing = ChainError::missing::<R>();
            match handler {
                Some(handler) => Ok(handler.handle(input, &missing)),
                None => Err(missing),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::recovery::handler::{observe, recover, FailureHandler};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        swallowed: RefCell<Vec<String>>,
    }

    impl FailureSink for RecordingSink {
        fn catch_panics(&self) -> bool {
            true
        }

        fn swallowed(&self, failure: &ChainError) {
            self.swallowed.borrow_mut().push(failure.to_string());
        }
    }

    fn failing(_: &i32) -> std::result::Result<Arc<i32>, String> {
        Err("broken".to_string())
    }

    fn nothing(_: &i32) -> Option<Arc<i32>> {
        None
    }

    #[test]
    fn test_propagate_swallows_failure() {
        let sink = RecordingSink::default();
        let value = resolve(Some(&1), failing, Policy::PropagateAbsent, None, &sink).unwrap();

        assert!(value.is_none());
        assert_eq!(sink.swallowed.borrow().len(), 1);
    }

    #[test]
    fn test_default_on_failure_and_absent_match() {
        let sink = RecordingSink::default();
        let default = Arc::new(123);

        let on_failure = resolve(
            Some(&1),
            failing,
            Policy::SubstituteDefault(Arc::clone(&default).into()),
            None,
            &sink,
        )
        .unwrap()
        .unwrap();
        let on_absent = resolve(
            Some(&1),
            nothing,
            Policy::SubstituteDefault(Arc::clone(&default).into()),
            None,
            &sink,
        )
        .unwrap()
        .unwrap();

        assert!(Arc::ptr_eq(&on_failure, &default));
        assert!(Arc::ptr_eq(&on_absent, &default));
    }

    #[test]
    fn test_default_used_when_handler_yields_nothing() {
        let sink = RecordingSink::default();
        let seen = RefCell::new(0);
        let handler = observe(|_: Option<&i32>, _: &ChainError| *seen.borrow_mut() += 1);

        let value = resolve(
            Some(&1),
            failing,
            Policy::SubstituteDefault(Fallback::value(9)),
            Some(&handler as &dyn FailureHandler<i32, i32>),
            &sink,
        )
        .unwrap();

        assert_eq!(*value.unwrap(), 9);
        assert_eq!(*seen.borrow(), 1);
        assert!(sink.swallowed.borrow().is_empty());
    }

    #[test]
    fn test_require_non_null_without_handler_errors() {
        let sink = RecordingSink::default();
        let result = resolve(Some(&1), nothing, Policy::RequireNonNull, None, &sink);
        assert!(matches!(result, Err(ChainError::MissingValue { .. })));
    }

    #[test]
    fn test_require_non_null_handler_sees_missing_value() {
        let sink = RecordingSink::default();
        let handler = recover(|_: Option<&i32>, failure: &ChainError| {
            if failure.is_missing_value() {
                Some(Arc::new(-1))
            } else {
                None
            }
        });

        let value = resolve(
            Some(&1),
            nothing,
            Policy::RequireNonNull,
            Some(&handler as &dyn FailureHandler<i32, i32>),
            &sink,
        )
        .unwrap()
        .unwrap();
        assert_eq!(*value, -1);
    }

    #[test]
    fn test_absent_input_routes_through_handler() {
        let sink = RecordingSink::default();
        let handler = recover(|input: Option<&i32>, failure: &ChainError| {
            assert!(input.is_none());
            assert!(failure.accessor_failure().unwrap().is_absent_input());
            Arc::new(0)
        });

        let value = resolve(
            None,
            |v: &i32| Arc::new(*v),
            Policy::PropagateAbsent,
            Some(&handler as &dyn FailureHandler<i32, i32>),
            &sink,
        )
        .unwrap();
        assert_eq!(*value.unwrap(), 0);
    }
}
