use alloc::boxed::Box;
use parking_lot::Mutex;

use crate::{
    config::Config,
    dependency::Dependency,
    errors::{InjectErrorKind, RegisterErrorKind},
    injectable::Injectable,
    injector::{Injector, Report},
    registry::Registry,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
};

pub(crate) struct ContainerInner {
    registry: Mutex<Registry>,
    injector: Injector,
}

/// Shared handle to a registry and an injector configured together.
///
/// Registration and the snapshot taken for an injection go through the same lock,
/// the injection itself runs on the snapshot without holding it.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: RcThreadSafety<ContainerInner>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_registry(Registry::with_config(&config), config)
    }

    #[inline]
    #[must_use]
    pub fn with_validator<F>(config: Config, validator: F) -> Self
    where
        F: Fn(&Dependency) -> anyhow::Result<()> + SendSafety + SyncSafety + 'static,
    {
        Self::with_registry(Registry::with_config(&config).with_validator(validator), config)
    }

    #[inline]
    #[must_use]
    fn with_registry(registry: Registry, config: Config) -> Self {
        Self {
            inner: RcThreadSafety::new(ContainerInner {
                registry: Mutex::new(registry),
                injector: Injector::new(config),
            }),
        }
    }

    /// Adds dependencies to the container, see [`Registry::register`].
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::InvalidDependencies`] with every rejected entry
    pub fn add_dependencies<I, D>(&self, dependencies: I) -> Result<(), RegisterErrorKind>
    where
        I: IntoIterator<Item = D>,
        D: Into<Option<Dependency>>,
    {
        self.inner.registry.lock().register(dependencies)
    }

    /// Injects `target` with the dependencies registered so far, see [`Injector::inject`].
    ///
    /// # Errors
    /// Returns [`InjectErrorKind`] describing the first failure
    pub fn inject<T: Injectable>(&self, target: &T) -> Result<Report, InjectErrorKind> {
        let snapshot = self.snapshot();
        self.inner.injector.inject(target, &snapshot)
    }

    #[must_use]
    pub fn snapshot(&self) -> Box<[Dependency]> {
        self.inner.registry.lock().snapshot().into()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        self.inner.injector.config()
    }
}
