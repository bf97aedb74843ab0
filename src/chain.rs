use alloc::{
    boxed::Box,
    string::{String, ToString as _},
    vec::Vec,
};

use crate::errors::ResolveErrorKind;

/// Names under resolution on the current call path, outermost first.
#[derive(Debug, Default)]
pub(crate) struct DependencyChain {
    names: Vec<String>,
}

impl DependencyChain {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { names: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|entry| entry == name)
    }

    #[inline]
    pub(crate) fn push(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    #[inline]
    pub(crate) fn pop(&mut self) {
        self.names.pop();
    }

    /// Error for `name` showing up again. The root is the name the resolution started from.
    #[must_use]
    pub(crate) fn cycle_error(&self, name: &str) -> ResolveErrorKind {
        let root = self.names.first().map_or_else(|| name.to_string(), Clone::clone);
        let path: Box<[String]> = self.names.iter().cloned().chain([name.to_string()]).collect();

        ResolveErrorKind::CircularDependency { root, path }
    }
}
