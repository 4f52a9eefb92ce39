//! Failure handlers
//!
//! A handler sees the step's input (absent if the step had no value) and the
//! failure, and either observes it or recovers a replacement value.

use crate::errors::ChainError;
use std::sync::Arc;

/// Turns a failure at one step into that step's value
pub trait FailureHandler<T: ?Sized, R: ?Sized> {
    fn handle(&self, input: Option<&T>, failure: &ChainError) -> Option<Arc<R>>;
}

/// Handler that returns a replacement value
#[derive(Clone, Copy)]
pub struct Recover<F>(F);

/// Handler that only observes the failure
#[derive(Clone, Copy)]
pub struct Observe<F>(F);

/// Handler that always yields absence
#[derive(Clone, Copy, Default)]
pub struct ReturnAbsent;

/// Build a recovering handler
///
/// The closure may return `Arc<R>` or `Option<Arc<R>>`.
pub fn recover<F>(f: F) -> Recover<F> {
    Recover(f)
}

/// Build an observing handler
pub fn observe<F>(f: F) -> Observe<F> {
    Observe(f)
}

pub fn return_absent() -> ReturnAbsent {
    ReturnAbsent
}

impl<T, R, F, O> FailureHandler<T, R> for Recover<F>
where
    T: ?Sized,
    R: ?Sized,
    F: Fn(Option<&T>, &ChainError) -> O,
    O: Into<Option<Arc<R>>>,
{
    fn handle(&self, input: Option<&T>, failure: &ChainError) -> Option<Arc<R>> {
        (self.0)(input, failure).into()
    }
}

impl<T, R, F> FailureHandler<T, R> for Observe<F>
where
    T: ?Sized,
    R: ?Sized,
    F: Fn(Option<&T>, &ChainError),
{
    fn handle(&self, input: Option<&T>, failure: &ChainError) -> Option<Arc<R>> {
        (self.0)(input, failure);
        None
    }
}

impl<T: ?Sized, R: ?Sized> FailureHandler<T, R> for ReturnAbsent {
    fn handle(&self, _input: Option<&T>, _failure: &ChainError) -> Option<Arc<R>> {
        None
    }
}

impl<F> Observe<F> {
    /// The recovering form of this observer: runs the side effect, then yields absence
    pub fn into_recover<T, R>(self) -> Recover<impl Fn(Option<&T>, &ChainError) -> Option<Arc<R>>>
    where
        T: ?Sized,
        R: ?Sized,
        F: Fn(Option<&T>, &ChainError),
    {
        let observer = self.0;
        Recover(move |input: Option<&T>, failure: &ChainError| {
            observer(input, failure);
            None
        })
    }
}

impl<H, T, R> FailureHandler<T, R> for &H
where
    H: FailureHandler<T, R> + ?Sized,
    T: ?Sized,
    R: ?Sized,
{
    fn handle(&self, input: Option<&T>, failure: &ChainError) -> Option<Arc<R>> {
        (**self).handle(input, failure)
    }
}
