use alloc::{collections::BTreeMap, vec::Vec};
use core::fmt::{self, Debug, Formatter};

use crate::{
    any::TypeInfo,
    errors::InvalidReason,
    injectable::Injectable,
    utils::thread_safety::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

#[derive(Clone)]
struct Capability {
    address: usize,
    value: RcAnyThreadSafety,
}

/// An instance registered into the pool, erased over its type.
///
/// Besides its concrete type, a dependency provides every interface declared with
/// [`Dependency::implements`]. The capability set is fixed when the dependency is built,
/// so matching a field is a map lookup.
#[derive(Clone)]
pub struct Dependency {
    type_info: TypeInfo,
    address: usize,
    capabilities: BTreeMap<TypeInfo, Capability>,
    target: Option<RcThreadSafety<dyn Injectable>>,
}

#[inline]
fn address_of<T: ?Sized>(value: &RcThreadSafety<T>) -> usize {
    RcThreadSafety::as_ptr(value).cast::<()>() as usize
}

impl Dependency {
    /// Wraps a value. Value dependencies are never injected themselves.
    #[inline]
    #[must_use]
    pub fn new<T: SendSafety + SyncSafety + 'static>(value: T) -> Self {
        Self::from_rc(RcThreadSafety::new(value))
    }

    /// Shares an existing instance, fields receive clones of this handle.
    #[must_use]
    pub fn from_rc<T: SendSafety + SyncSafety + 'static>(value: RcThreadSafety<T>) -> Self {
        let type_info = TypeInfo::of::<T>();
        let address = address_of(&value);

        let mut capabilities = BTreeMap::new();
        capabilities.insert(
            type_info,
            Capability {
                address,
                value: RcThreadSafety::new(value),
            },
        );

        Self {
            type_info,
            address,
            capabilities,
            target: None,
        }
    }

    /// Shares an instance whose own marked fields are injected before it's assigned anywhere.
    #[must_use]
    pub fn injectable<T: Injectable>(value: RcThreadSafety<T>) -> Self {
        let target: RcThreadSafety<dyn Injectable> = value.clone();
        Self {
            target: Some(target),
            ..Self::from_rc(value)
        }
    }

    /// Declares that this dependency satisfies fields of type `Inject<I>`.
    ///
    /// `value` must be the same instance viewed as `I`, usually `rc.clone() as Arc<dyn Trait>`.
    /// A view of another instance is rejected on registration.
    #[must_use]
    pub fn implements<I: ?Sized + SendSafety + SyncSafety + 'static>(mut self, value: RcThreadSafety<I>) -> Self {
        let address = address_of(&value);
        self.capabilities.insert(
            TypeInfo::of::<I>(),
            Capability {
                address,
                value: RcThreadSafety::new(value),
            },
        );
        self
    }
}

impl Dependency {
    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// Concrete type first, then declared interfaces.
    #[must_use]
    pub fn provides(&self) -> Vec<TypeInfo> {
        let mut provides = Vec::with_capacity(self.capabilities.len());
        provides.push(self.type_info);
        provides.extend(self.capabilities.keys().filter(|type_info| **type_info != self.type_info));
        provides
    }

    #[inline]
    #[must_use]
    pub fn satisfies(&self, type_info: &TypeInfo) -> bool {
        self.capabilities.contains_key(type_info)
    }

    #[must_use]
    pub fn get<T: ?Sized + 'static>(&self) -> Option<RcThreadSafety<T>> {
        self.capabilities
            .get(&TypeInfo::of::<T>())
            .and_then(|capability| capability.value.downcast_ref::<RcThreadSafety<T>>())
            .cloned()
    }

    /// Returns `true` if both dependencies hold the same instance.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.address == other.address && self.type_info == other.type_info
    }

    /// Returns `true` if the dependency was registered as an [`Injectable`] with marked fields.
    #[must_use]
    pub fn needs_injection(&self) -> bool {
        self.target.as_ref().is_some_and(|target| target.needs_injection())
    }

    #[inline]
    pub(crate) fn value_for(&self, type_info: &TypeInfo) -> Option<&RcAnyThreadSafety> {
        self.capabilities.get(type_info).map(|capability| &capability.value)
    }

    #[inline]
    pub(crate) fn target(&self) -> Option<&dyn Injectable> {
        self.target.as_deref()
    }

    pub(crate) fn validate(&self) -> Result<(), InvalidReason> {
        match self
            .capabilities
            .iter()
            .find(|(_, capability)| capability.address != self.address)
        {
            Some((type_info, _)) => Err(InvalidReason::ForeignCapability {
                capability: type_info.name,
            }),
            None => Ok(()),
        }
    }
}

impl Debug for Dependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("type_info", &self.type_info)
            .field("provides", &self.provides())
            .field("injectable", &self.target.is_some())
            .finish()
    }
}
