#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

// Lets `#[derive(Injectable)]` expand to `::autowire` paths inside this crate too
extern crate self as autowire;

pub(crate) mod any;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod dependency;
pub(crate) mod errors;
pub(crate) mod inject;
pub(crate) mod injectable;
pub(crate) mod injector;
pub(crate) mod registry;
pub(crate) mod utils;

pub mod macros_utils;

pub use any::TypeInfo;
pub use config::{Config, NilPolicy};
pub use container::Container;
pub use dependency::Dependency;
pub use errors::{AssignErrorKind, FatalErrorKind, InjectErrorKind, InvalidDependency, InvalidReason, RegisterErrorKind};
pub use inject::{Inject, Slot};
pub use injectable::{Field, Injectable};
pub use injector::{Injector, Outcome, Report};
pub use registry::{Registry, Validator};
pub use utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety};

#[cfg(feature = "macros")]
pub use autowire_macros::Injectable;
