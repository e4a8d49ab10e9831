mod inject;
mod registry;

pub use inject::{AssignErrorKind, FatalErrorKind, InjectErrorKind};
pub use registry::{InvalidDependency, InvalidReason, RegisterErrorKind};
