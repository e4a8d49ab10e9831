use alloc::{boxed::Box, string::String};
use core::fmt::Write as _;

#[derive(thiserror::Error, Debug)]
pub enum InvalidReason {
    #[error("it's nil")]
    Nil,
    #[error("interface {capability} doesn't point at the same instance")]
    ForeignCapability { capability: &'static str },
    #[error("{0}")]
    Custom(anyhow::Error),
}

#[derive(thiserror::Error, Debug)]
#[error("Cannot add the dependency {description} because {reason}")]
pub struct InvalidDependency {
    pub description: &'static str,
    pub reason: InvalidReason,
}

#[derive(thiserror::Error, Debug)]
pub enum RegisterErrorKind {
    #[error("{}", format_rejected(.0))]
    InvalidDependencies(Box<[InvalidDependency]>),
}

impl RegisterErrorKind {
    #[must_use]
    pub fn rejected(&self) -> &[InvalidDependency] {
        match self {
            Self::InvalidDependencies(rejected) => rejected,
        }
    }
}

fn format_rejected(rejected: &[InvalidDependency]) -> String {
    let mut out = String::new();
    for (index, invalid) in rejected.iter().enumerate() {
        if index > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{invalid}");
    }
    out
}
