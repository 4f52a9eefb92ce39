use std::fmt;
use std::sync::Arc;

/// Default used by `then_or_default` when a step fails or yields nothing
pub enum Fallback<'a, T: ?Sized, R: ?Sized> {
    /// A fixed value
    Value(Arc<R>),
    /// Computed lazily, only when needed
    Supply(Box<dyn FnOnce() -> Arc<R> + 'a>),
    /// Computed from the step's input (absent if the step had no value)
    FromInput(Box<dyn FnOnce(Option<&T>) -> Arc<R> + 'a>),
}

impl<'a, T: ?Sized, R: ?Sized> Fallback<'a, T, R> {
    pub fn value(value: impl Into<Arc<R>>) -> Self {
        Fallback::Value(value.into())
    }

    pub fn supply<F>(supplier: F) -> Self
    where
        F: FnOnce() -> Arc<R> + 'a,
    {
        Fallback::Supply(Box::new(supplier))
    }

    pub fn from_input<F>(f: F) -> Self
    where
        F: FnOnce(Option<&T>) -> Arc<R> + 'a,
    {
        Fallback::FromInput(Box::new(f))
    }

    pub(crate) fn resolve(self, input: Option<&T>) -> Arc<R> {
        match self {
            Fallback::Value(value) => value,
            Fallback::Supply(supplier) => supplier(),
            Fallback::FromInput(f) => f(input),
        }
    }
}

impl<'a, T: ?Sized, R: ?Sized> From<Arc<R>> for Fallback<'a, T, R> {
    fn from(value: Arc<R>) -> Self {
        Fallback::Value(value)
    }
}

impl<'a, T: ?Sized, R: ?Sized> fmt::Debug for Fallback<'a, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Value(_) => f.write_str("Fallback::Value"),
            Fallback::Supply(_) => f.write_str("Fallback::Supply"),
            Fallback::FromInput(_) => f.write_str("Fallback::FromInput"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_returned_as_is() {
        let default = Arc::new(123);
        let fallback: Fallback<'_, str, i32> = Arc::clone(&default).into();
        assert!(Arc::ptr_eq(&fallback.resolve(None), &default));
    }

    #[test]
    fn test_supply_is_lazy() {
        let mut calls = 0;
        {
            let _unused: Fallback<'_, str, i32> = Fallback::supply(|| {
                calls += 1;
                Arc::new(1)
            });
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_from_input_sees_input() {
        let fallback: Fallback<'_, str, usize> = Fallback::from_input(|s: Option<&str>| {
            Arc::new(s.map_or(0, str::len))
        });
        assert_eq!(*fallback.resolve(Some("four")), 4);
    }
}
