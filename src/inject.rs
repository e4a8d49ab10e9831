use core::{
    any::{type_name, Any},
    fmt::{self, Debug, Formatter},
};
use parking_lot::RwLock;

use crate::{any::TypeInfo, errors::AssignErrorKind, utils::thread_safety::RcThreadSafety};

/// A field cell that the injector fills with a dependency from the pool.
///
/// `T` is either a concrete type or a trait object (`Inject<dyn Runner>`).
/// The cell is written through a shared reference, so dependencies stored behind
/// [`RcThreadSafety`] can receive their own dependencies too.
pub struct Inject<T: ?Sized>(RwLock<Option<RcThreadSafety<T>>>);

impl<T: ?Sized> Inject<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(RwLock::new(None))
    }

    #[inline]
    #[must_use]
    pub fn with_value(value: RcThreadSafety<T>) -> Self {
        Self(RwLock::new(Some(value)))
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<RcThreadSafety<T>> {
        self.0.read().clone()
    }

    #[inline]
    #[must_use]
    pub fn is_injected(&self) -> bool {
        self.0.read().is_some()
    }

    #[inline]
    pub fn set(&self, value: RcThreadSafety<T>) -> Option<RcThreadSafety<T>> {
        self.0.write().replace(value)
    }

    #[inline]
    pub fn take(&self) -> Option<RcThreadSafety<T>> {
        self.0.write().take()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Debug for Inject<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = if self.is_injected() { "injected" } else { "empty" };
        write!(f, "Inject<{}>({state})", type_name::<T>())
    }
}

/// Write access to a field, erased over its type.
pub trait Slot {
    /// Stores `value` into the field.
    ///
    /// `value` is the erased handle held by a dependency, for `Inject<T>` it must be a
    /// `RcThreadSafety<T>`.
    ///
    /// # Errors
    /// Returns [`AssignErrorKind::IncorrectType`] if `value` has another type
    fn assign(&self, value: &dyn Any) -> Result<(), AssignErrorKind>;
}

impl<T: ?Sized + 'static> Slot for Inject<T> {
    fn assign(&self, value: &dyn Any) -> Result<(), AssignErrorKind> {
        match value.downcast_ref::<RcThreadSafety<T>>() {
            Some(value) => {
                self.set(value.clone());
                Ok(())
            }
            None => Err(AssignErrorKind::IncorrectType {
                expected: TypeInfo::of::<T>(),
            }),
        }
    }
}
