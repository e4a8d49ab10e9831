use alloc::{collections::BTreeSet, vec::Vec};
use tracing::{debug, debug_span, error};

use crate::{
    any::TypeInfo,
    config::{Config, NilPolicy},
    dependency::Dependency,
    errors::{InvalidDependency, InvalidReason, RegisterErrorKind},
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
};

/// User check run on every dependency before it's added.
#[cfg(feature = "thread_safe")]
pub type Validator = RcThreadSafety<dyn Fn(&Dependency) -> anyhow::Result<()> + Send + Sync>;
/// User check run on every dependency before it's added.
#[cfg(not(feature = "thread_safe"))]
pub type Validator = RcThreadSafety<dyn Fn(&Dependency) -> anyhow::Result<()>>;

/// The pool of dependencies, at most one per concrete type.
#[derive(Default, Clone)]
pub struct Registry {
    dependencies: Vec<Dependency>,
    nil_policy: NilPolicy,
    validator: Option<Validator>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dependencies: Vec::new(),
            nil_policy: NilPolicy::Skip,
            validator: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_config(config: &Config) -> Self {
        Self::new().with_nil_policy(config.nil_policy)
    }

    #[inline]
    #[must_use]
    pub const fn with_nil_policy(mut self, nil_policy: NilPolicy) -> Self {
        self.nil_policy = nil_policy;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Dependency) -> anyhow::Result<()> + SendSafety + SyncSafety + 'static,
    {
        self.validator = Some(RcThreadSafety::new(validator));
        self
    }
}

impl Registry {
    /// Adds dependencies to the pool. `None` entries are nil and follow the [`NilPolicy`].
    ///
    /// A dependency of an already registered concrete type replaces the earlier one.
    /// The replaced slot is filled by the last dependency of the pool,
    /// so the order of the remaining dependencies isn't preserved after a replacement.
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::InvalidDependencies`] with every rejected entry.
    /// Accepted entries stay registered.
    pub fn register<I, D>(&mut self, dependencies: I) -> Result<(), RegisterErrorKind>
    where
        I: IntoIterator<Item = D>,
        D: Into<Option<Dependency>>,
    {
        let span = debug_span!("register");
        let _guard = span.enter();

        let mut rejected = Vec::new();
        for dependency in dependencies {
            let Some(dependency) = dependency.into() else {
                match self.nil_policy {
                    NilPolicy::Skip => debug!("Nil skipped"),
                    NilPolicy::Reject => rejected.push(InvalidDependency {
                        description: "nil",
                        reason: InvalidReason::Nil,
                    }),
                }
                continue;
            };

            if let Err(reason) = self.validate(&dependency) {
                rejected.push(InvalidDependency {
                    description: dependency.type_info().name,
                    reason,
                });
                continue;
            }

            debug!(dependency = dependency.type_info().name, "Registered");
            self.dependencies.push(dependency);
        }

        self.dedup();

        if rejected.is_empty() {
            Ok(())
        } else {
            let err = RegisterErrorKind::InvalidDependencies(rejected.into_boxed_slice());
            error!("{}", err);
            Err(err)
        }
    }

    /// Read-only view of the pool in search order.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &[Dependency] {
        &self.dependencies
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_info = TypeInfo::of::<T>();
        self.dependencies.iter().any(|dependency| dependency.type_info() == type_info)
    }

    /// Gets the dependency of concrete type `T`.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<RcThreadSafety<T>> {
        let type_info = TypeInfo::of::<T>();
        self.dependencies
            .iter()
            .find(|dependency| dependency.type_info() == type_info)
            .and_then(|dependency| dependency.get::<T>())
    }
}

impl Registry {
    fn validate(&self, dependency: &Dependency) -> Result<(), InvalidReason> {
        dependency.validate()?;
        if let Some(validator) = &self.validator {
            validator(dependency).map_err(InvalidReason::Custom)?;
        }
        Ok(())
    }

    /// Keeps the last registered dependency of every concrete type.
    /// Duplicates are swap-removed from the highest index down, so the tail moved into a freed slot is always kept.
    fn dedup(&mut self) {
        let mut seen = BTreeSet::new();
        let mut duplicates = Vec::new();
        for (index, dependency) in self.dependencies.iter().enumerate().rev() {
            if !seen.insert(dependency.type_info()) {
                duplicates.push(index);
            }
        }

        for index in duplicates {
            let replaced = self.dependencies.swap_remove(index);
            debug!(dependency = replaced.type_info().name, "Replaced");
        }
    }
}
