use alloc::{boxed::Box, vec::Vec};
use core::any::type_name;
use tracing::{debug, debug_span, error, warn};

use crate::{
    any::TypeInfo,
    config::Config,
    dependency::Dependency,
    errors::{AssignErrorKind, FatalErrorKind, InjectErrorKind},
    injectable::{Field, Injectable},
};

/// Result of one marked field of the injected target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub field: &'static str,
    /// Index in the pool of the dependency assigned to the field,
    /// `None` if nothing matched and the field was left empty.
    pub matched: Option<usize>,
}

/// Outcomes of the marked fields of the injected target, in declaration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub outcomes: Box<[Outcome]>,
}

impl Report {
    pub fn unmatched(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.matched.is_none())
            .map(|outcome| outcome.field)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.matched.is_some())
    }
}

/// Types of the objects being injected on the current path, outermost first.
struct InjectStack(Vec<TypeInfo>);

impl InjectStack {
    fn push(&mut self, type_info: TypeInfo) -> Result<(), InjectErrorKind> {
        if self.0.contains(&type_info) {
            let mut chain = self.0.clone();
            chain.push(type_info);

            let err = InjectErrorKind::CyclicDependency {
                chain: chain.into_boxed_slice(),
            };
            error!("{}", err);
            return Err(err);
        }
        self.0.push(type_info);
        Ok(())
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

/// Assigns dependencies from a pool into the marked fields of a target.
#[derive(Debug, Default, Clone, Copy)]
pub struct Injector {
    config: Config,
}

impl Injector {
    #[inline]
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Injects `target` with dependencies from `pool`.
    ///
    /// Every marked field gets the first dependency of the pool that provides its declared type.
    /// A matched dependency that has marked fields itself is injected first, with the same pool.
    ///
    /// # Errors
    /// - Returns [`InjectErrorKind::InjectIntoAnyType`] if a field is declared as `dyn Any`, marked or not
    /// - Returns [`InjectErrorKind::NoMatchFound`] in strict mode if a marked field has no match.
    ///   In lenient mode the field is left empty and a warning is logged instead
    /// - Returns [`InjectErrorKind::RecursiveInjectionFailed`] if a matched dependency couldn't be injected
    /// - Returns [`InjectErrorKind::CyclicDependency`] if a dependency requires itself on the current path
    /// - Returns [`InjectErrorKind::InjectionFatal`] if a field couldn't be assigned or the injection panicked.
    ///   Fields assigned before the failure keep their values
    pub fn inject<T: Injectable>(&self, target: &T, pool: &[Dependency]) -> Result<Report, InjectErrorKind> {
        let span = debug_span!("inject", target = type_name::<T>(), strict = self.config.strict);
        let _guard = span.enter();

        let mut stack = InjectStack(Vec::new());
        contain_panic(|| self.inject_object(target, TypeInfo::of::<T>(), pool, &mut stack))
    }
}

impl Injector {
    fn inject_object(
        &self,
        object: &dyn Injectable,
        type_info: TypeInfo,
        pool: &[Dependency],
        stack: &mut InjectStack,
    ) -> Result<Report, InjectErrorKind> {
        stack.push(type_info)?;
        let result = self.inject_fields(object, pool, stack);
        stack.pop();
        result
    }

    fn inject_fields(&self, object: &dyn Injectable, pool: &[Dependency], stack: &mut InjectStack) -> Result<Report, InjectErrorKind> {
        let mut outcomes = Vec::new();

        for field in object.fields() {
            if field.declared.is_universal_any() {
                let err = InjectErrorKind::InjectIntoAnyType { field: field.name };
                error!("{}", err);
                return Err(err);
            }
            if !field.auto {
                continue;
            }

            let Some((index, dependency)) = pool
                .iter()
                .enumerate()
                .find(|(_, dependency)| dependency.satisfies(&field.declared))
            else {
                if self.config.strict {
                    let err = InjectErrorKind::NoMatchFound {
                        field: field.name,
                        type_name: field.declared.name,
                    };
                    error!("{}", err);
                    return Err(err);
                }

                warn!(field = field.name, "No dependency injected on field {}", field.name);
                outcomes.push(Outcome {
                    field: field.name,
                    matched: None,
                });
                continue;
            };
            debug!(field = field.name, dependency = dependency.type_info().name, "Matched");

            if let Some(nested) = dependency.target() {
                if nested.needs_injection() {
                    if let Err(err) = self.inject_object(nested, dependency.type_info(), pool, stack) {
                        let err = InjectErrorKind::RecursiveInjectionFailed {
                            field: field.name,
                            inner: Box::new(err),
                        };
                        error!("{}", err);
                        return Err(err);
                    }
                }
            }

            assign(&field, dependency)?;
            outcomes.push(Outcome {
                field: field.name,
                matched: Some(index),
            });
        }

        Ok(Report {
            outcomes: outcomes.into_boxed_slice(),
        })
    }
}

fn assign(field: &Field<'_>, dependency: &Dependency) -> Result<(), InjectErrorKind> {
    let fatal = |kind| {
        let err = InjectErrorKind::InjectionFatal(kind);
        error!("{}", err);
        err
    };

    let Some(slot) = field.slot() else {
        return Err(fatal(FatalErrorKind::NotAssignable { field: field.name }));
    };
    let Some(value) = dependency.value_for(&field.declared) else {
        return Err(fatal(FatalErrorKind::IncorrectType {
            field: field.name,
            expected: field.declared,
            actual: dependency.type_info(),
        }));
    };

    slot.assign(&**value).map_err(|err| match err {
        AssignErrorKind::IncorrectType { expected } => fatal(FatalErrorKind::IncorrectType {
            field: field.name,
            expected,
            actual: dependency.type_info(),
        }),
    })
}

#[cfg(feature = "std")]
fn contain_panic<F>(f: F) -> Result<Report, InjectErrorKind>
where
    F: FnOnce() -> Result<Report, InjectErrorKind>,
{
    use alloc::string::{String, ToString as _};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            String::from("unknown panic payload")
        };

        let err = InjectErrorKind::InjectionFatal(FatalErrorKind::Panicked { message });
        error!("{}", err);
        Err(err)
    })
}

#[cfg(not(feature = "std"))]
#[inline]
fn contain_panic<F>(f: F) -> Result<Report, InjectErrorKind>
where
    F: FnOnce() -> Result<Report, InjectErrorKind>,
{
    f()
}
