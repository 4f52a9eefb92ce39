//! Error types for getty-chain
//!
//! Accessor failures are always caught where the accessor runs and handed to the
//! active recovery policy. Only [`ChainError::MissingValue`] and
//! [`ChainError::InvalidRoot`] ever reach a caller.

use std::sync::Arc;
use thiserror::Error;

/// Boxed error accepted from accessors
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure raised while evaluating a single accessor
#[derive(Debug, Clone, Error)]
pub enum AccessorFailure {
    /// The accessor returned an error
    #[error("accessor failed: {0}")]
    Raised(Arc<dyn std::error::Error + Send + Sync>),

    /// The accessor panicked (only captured when `catch_panics` is on)
    #[error("accessor panicked: {0}")]
    Panicked(String),

    /// The step had no value to call the accessor with
    #[error("accessor invoked on an absent value")]
    AbsentInput,
}

impl AccessorFailure {
    /// Wrap any error returned by an accessor
    pub fn raised(error: impl Into<BoxError>) -> Self {
        AccessorFailure::Raised(Arc::from(error.into()))
    }

    pub fn is_absent_input(&self) -> bool {
        matches!(self, AccessorFailure::AbsentInput)
    }
}

/// Main error type for chain operations
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    /// Any failure raised by an accessor
    #[error(transparent)]
    Accessor(#[from] AccessorFailure),

    /// A non-null step still had no value after recovery
    #[error("missing value: non-null step produced no `{type_name}`")]
    MissingValue { type_name: &'static str },

    /// A chain was started without a root
    #[error("cannot start a chain from an absent root")]
    InvalidRoot,
}

impl ChainError {
    pub(crate) fn missing<R: ?Sized>() -> Self {
        ChainError::MissingValue {
            type_name: std::any::type_name::<R>(),
        }
    }

    /// The underlying accessor failure, if this is one
    pub fn accessor_failure(&self) -> Option<&AccessorFailure> {
        match self {
            ChainError::Accessor(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_missing_value(&self) -> bool {
        matches!(self, ChainError::MissingValue { .. })
    }
}

/// Result type alias for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;
