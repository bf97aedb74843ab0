use alloc::{boxed::Box, string::String};
use core::fmt::{self, Display, Formatter};

use super::{instantiate::InstantiateErrorKind, instantiator::InstantiatorErrorKind};
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Dependency `{name}` not found in registry")]
    NoEntry { name: String },
    #[error("Circular dependency detected while resolving `{root}`: {}", DisplayPath(.path))]
    CircularDependency { root: String, path: Box<[String]> },
    #[error("Incorrect type of dependency `{name}`, expected: {expected}")]
    IncorrectType { name: String, expected: TypeInfo },
    #[error("Factory argument at position {position} wasn't resolved")]
    NoArgument { position: usize },
    #[error("Failed to instantiate `{name}`: {source}")]
    Instantiator {
        name: String,
        #[source]
        source: InstantiatorErrorKind<Box<ResolveErrorKind>, InstantiateErrorKind>,
    },
}

impl ResolveErrorKind {
    /// Returns `true` if the error was caused by a missing registry entry.
    #[inline]
    #[must_use]
    pub const fn is_no_entry(&self) -> bool {
        matches!(self, Self::NoEntry { .. })
    }

    /// Returns `true` if the error was caused by a dependency cycle.
    #[inline]
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }
}

struct DisplayPath<'a>(&'a [String]);

impl Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, name) in self.0.iter().enumerate() {
            if index != 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
