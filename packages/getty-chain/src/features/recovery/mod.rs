//! Failure recovery for accessor steps
//!
//! - **Outcome**: the return shapes an accessor may use
//! - **Invoker**: runs one accessor, capturing errors and panics
//! - **Policy**: propagate-absent, substitute-default, require-non-null
//! - **Handlers**: observe or recover a failure

mod fallback;
mod handler;
mod invoker;
mod mode;
mod outcome;
pub(crate) mod policy;

pub use fallback::Fallback;
pub use handler::{observe, recover, return_absent, FailureHandler, Observe, Recover, ReturnAbsent};
pub use mode::RecoveryMode;
pub use outcome::Outcome;

pub(crate) use invoker::attempt;
