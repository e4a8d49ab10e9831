use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

use crate::{
    any::TypeInfo,
    inject::{Inject, Slot},
    utils::thread_safety::{SendSafety, SyncSafety},
};

/// Structural view of a struct whose fields can be injected.
///
/// Usually derived with `#[derive(Injectable)]`, marking fields with `#[inject(auto)]`:
/// ```ignore
/// #[derive(Injectable)]
/// struct Service {
///     name: String,
///     #[inject(auto)]
///     runner: Inject<dyn Runner>,
/// }
/// ```
pub trait Injectable: SendSafety + SyncSafety + 'static {
    /// Describes every field in declaration order.
    /// Called on each injection, the result isn't cached.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Returns `true` if at least one field carries the injection marker.
    fn needs_injection(&self) -> bool {
        self.fields().iter().any(|field| field.auto)
    }
}

/// Descriptor of one field of an [`Injectable`] value.
pub struct Field<'a> {
    pub name: &'static str,
    pub declared: TypeInfo,
    pub auto: bool,
    slot: Option<&'a dyn Slot>,
}

impl<'a> Field<'a> {
    #[inline]
    #[must_use]
    pub fn new(name: &'static str, declared: TypeInfo, auto: bool, slot: Option<&'a dyn Slot>) -> Self {
        Self {
            name,
            declared,
            auto,
            slot,
        }
    }

    /// Field backed by an [`Inject`] cell, declared as `T`.
    #[inline]
    #[must_use]
    pub fn inject<T: ?Sized + 'static>(name: &'static str, cell: &'a Inject<T>, auto: bool) -> Self {
        Self::new(name, TypeInfo::of::<T>(), auto, Some(cell))
    }

    /// Field that is only described, never written.
    #[inline]
    #[must_use]
    pub fn plain<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self::new(name, TypeInfo::of::<T>(), false, None)
    }

    #[inline]
    #[must_use]
    pub fn slot(&self) -> Option<&'a dyn Slot> {
        self.slot
    }
}

impl Debug for Field<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("auto", &self.auto)
            .field("assignable", &self.slot.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, Injectable};
    use crate::{any::TypeInfo, inject::Inject};

    use alloc::{string::String, vec, vec::Vec};

    struct Target {
        name: Inject<String>,
        count: Inject<u8>,
    }

    impl Injectable for Target {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::plain::<u32>("id"),
                Field::inject("name", &self.name, false),
                Field::inject("count", &self.count, true),
            ]
        }
    }

    struct Plain {
        name: Inject<String>,
    }

    impl Injectable for Plain {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::inject("name", &self.name, false)]
        }
    }

    #[test]
    fn test_fields() {
        let target = Target {
            name: Inject::new(),
            count: Inject::new(),
        };
        let fields = target.fields();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].declared, TypeInfo::of::<u32>());
        assert!(fields[0].slot().is_none());
        assert_eq!(fields[2].name, "count");
        assert_eq!(fields[2].declared, TypeInfo::of::<u8>());
        assert!(fields[2].slot().is_some());
    }

    #[cfg(feature = "macros")]
    #[derive(crate::Injectable)]
    struct Derived {
        id: u32,
        #[inject(auto)]
        name: Inject<String>,
        count: Inject<u8>,
    }

    #[test]
    #[cfg(feature = "macros")]
    fn test_derived_fields() {
        let derived = Derived {
            id: 1,
            name: Inject::new(),
            count: Inject::new(),
        };
        let fields = derived.fields();

        assert_eq!(derived.id, 1);
        assert_eq!(fields.iter().map(|field| field.name).collect::<Vec<_>>(), ["id", "name", "count"]);
        assert_eq!(fields[0].declared, TypeInfo::of::<u32>());
        assert!(fields[0].slot().is_none());
        assert!(fields[1].auto);
        assert!(!fields[2].auto);
        assert!(fields[2].slot().is_some());
        assert!(derived.needs_injection());
    }

    #[test]
    fn test_needs_injection() {
        let target = Target {
            name: Inject::new(),
            count: Inject::new(),
        };
        assert!(target.needs_injection());
        assert!(!Plain { name: Inject::new() }.needs_injection());
    }
}
