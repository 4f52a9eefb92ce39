use std::fmt;
use std::sync::Arc;

/// A step's value: present, or explicitly absent
pub enum Slot<T: ?Sized> {
    Absent,
    Present(Arc<T>),
}

impl<T: ?Sized> Slot<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Slot::Present(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Slot::Present(value) => Some(&**value),
            Slot::Absent => None,
        }
    }

    pub(crate) fn as_arc(&self) -> Option<&Arc<T>> {
        match self {
            Slot::Present(value) => Some(value),
            Slot::Absent => None,
        }
    }

    pub fn to_option(&self) -> Option<Arc<T>> {
        self.as_arc().cloned()
    }
}

impl<T: ?Sized> Clone for Slot<T> {
    fn clone(&self) -> Self {
        match self {
            Slot::Present(value) => Slot::Present(Arc::clone(value)),
            Slot::Absent => Slot::Absent,
        }
    }
}

impl<T: ?Sized> From<Option<Arc<T>>> for Slot<T> {
    fn from(value: Option<Arc<T>>) -> Self {
        match value {
            Some(value) => Slot::Present(value),
            None => Slot::Absent,
        }
    }
}

impl<T: ?Sized> From<Slot<T>> for Option<Arc<T>> {
    fn from(slot: Slot<T>) -> Self {
        match slot {
            Slot::Present(value) => Some(value),
            Slot::Absent => None,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Present(_) => f.write_str("Present"),
            Slot::Absent => f.write_str("Absent"),
        }
    }
}
