use alloc::{boxed::Box, rc::Rc, sync::Arc};
use core::{
    any::{type_name, Any, TypeId},
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
};

#[derive(Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl Debug for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit_once("::").map_or(self.name, |(_, name)| name)
    }

    /// Returns `true` for the unconstrained `dyn Any` family.
    ///
    /// Every dependency would satisfy such a field, so it's never a valid injection target.
    /// Covers the bare trait objects and their `Box`, `Arc` and `Rc` handles.
    #[must_use]
    pub fn is_universal_any(&self) -> bool {
        [
            TypeId::of::<dyn Any>(),
            TypeId::of::<dyn Any + Send>(),
            TypeId::of::<dyn Any + Send + Sync>(),
            TypeId::of::<Box<dyn Any>>(),
            TypeId::of::<Box<dyn Any + Send>>(),
            TypeId::of::<Box<dyn Any + Send + Sync>>(),
            TypeId::of::<Arc<dyn Any>>(),
            TypeId::of::<Arc<dyn Any + Send>>(),
            TypeId::of::<Arc<dyn Any + Send + Sync>>(),
            TypeId::of::<Rc<dyn Any>>(),
            TypeId::of::<Rc<dyn Any + Send>>(),
            TypeId::of::<Rc<dyn Any + Send + Sync>>(),
        ]
        .contains(&self.id)
    }
}
