#![no_std]

extern crate alloc;

#[cfg(all(feature = "std", not(test)))]
extern crate std;

#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod chain;
pub(crate) mod container;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod inject;
pub(crate) mod instantiator;
pub(crate) mod registry;
pub(crate) mod service;
pub(crate) mod signature;

pub(crate) mod utils;

#[cfg(all(feature = "std", feature = "thread_safe"))]
pub(crate) mod global;

pub use any::{TypeInfo, Value};
pub use container::Container;
pub use dependency_resolver::{Args, DependencyResolver};
pub use errors::{InstantiateErrorKind, InstantiatorErrorKind, InstantiatorResult, ResolveErrorKind, SignatureErrorKind};
pub use inject::Inject;
pub use instantiator::{Factory, Instantiator};
pub use registry::{EntryKind, Registry, RegistryEntry};
pub use signature::{extract_parameter_names, DependencyNames};
pub use utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety};

#[cfg(all(feature = "std", feature = "thread_safe"))]
pub use global::global;
