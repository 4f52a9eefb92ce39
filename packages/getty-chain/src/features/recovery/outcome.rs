//! What an accessor may return
//!
//! An accessor yields a value, nothing, or a failure. `Outcome` normalizes the
//! return shapes callers naturally write into one of those three.

use crate::errors::{AccessorFailure, BoxError};
use std::sync::Arc;

/// Return shape of an accessor or supplier
///
/// | Return type        | Value      | Absent | Failure |
/// |--------------------|------------|--------|---------|
/// | `Arc<V>`           | always     | never  | never   |
/// | `Option<V>`        | `Some`     | `None` | never   |
/// | `Result<V, E>`     | `Ok`       | never  | `Err`   |
pub trait Outcome {
    type Value;

    fn into_outcome(self) -> Result<Option<Self::Value>, AccessorFailure>;
}

impl<V: ?Sized> Outcome for Arc<V> {
    type Value = Arc<V>;

    #[inline]
    fn into_outcome(self) -> Result<Option<Arc<V>>, AccessorFailure> {
        Ok(Some(self))
    }
}

impl<V> Outcome for Option<V> {
    type Value = V;

    #[inline]
    fn into_outcome(self) -> Result<Option<V>, AccessorFailure> {
        Ok(self)
    }
}

impl<V, E> Outcome for Result<V, E>
where
    E: Into<BoxError>,
{
    type Value = V;

    #[inline]
    fn into_outcome(self) -> Result<Option<V>, AccessorFailure> {
        self.map(Some).map_err(AccessorFailure::raised)
    }
}
