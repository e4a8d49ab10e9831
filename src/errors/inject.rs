use alloc::{boxed::Box, string::String};

use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum AssignErrorKind {
    #[error("Slot expects {expected:?}")]
    IncorrectType { expected: TypeInfo },
}

#[derive(thiserror::Error, Debug)]
pub enum FatalErrorKind {
    #[error("dependency {actual:?} can't be assigned to field `{field}` of type {expected:?}")]
    IncorrectType {
        field: &'static str,
        expected: TypeInfo,
        actual: TypeInfo,
    },
    #[error("field `{field}` is marked for injection but has no slot to assign")]
    NotAssignable { field: &'static str },
    #[error("panicked: {message}")]
    Panicked { message: String },
}

#[derive(thiserror::Error, Debug)]
pub enum InjectErrorKind {
    #[error("Cannot inject into field `{field}` of the universal `dyn Any` type")]
    InjectIntoAnyType { field: &'static str },
    #[error("No dependency found for field `{field}` of type {type_name}")]
    NoMatchFound { field: &'static str, type_name: &'static str },
    #[error("Fatal error at injection: {0}")]
    InjectionFatal(FatalErrorKind),
    #[error("Couldn't inject inner dependency of field `{field}` -- {inner}")]
    RecursiveInjectionFailed {
        field: &'static str,
        inner: Box<InjectErrorKind>,
    },
    #[error("Cyclic dependency detected: {}", format_chain(.chain))]
    CyclicDependency { chain: Box<[TypeInfo]> },
}

impl InjectErrorKind {
    /// Unwraps [`Self::RecursiveInjectionFailed`] layers down to the error that started it.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut err = self;
        while let Self::RecursiveInjectionFailed { inner, .. } = err {
            err = &**inner;
        }
        err
    }

    /// Returns `true` if the root cause is a misconfiguration that must not reach production:
    /// an unmatched field in strict mode or a contained fault.
    /// Callers that want the process to stop should abort on these.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self.root_cause(), Self::NoMatchFound { .. } | Self::InjectionFatal(_))
    }
}

fn format_chain(chain: &[TypeInfo]) -> String {
    let mut out = String::new();
    for (index, type_info) in chain.iter().enumerate() {
        if index > 0 {
            out.push_str(" -> ");
        }
        out.push_str(type_info.short_name());
    }
    out
}
