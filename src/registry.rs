use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::String,
    vec::Vec,
};
use core::fmt::{self, Debug, Display, Formatter};
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{errors::SignatureErrorKind, instantiator::BoxedCloneInstantiator};
use crate::{
    any::Value,
    instantiator::Factory,
    utils::thread_safety::{erase, RcThreadSafety, SendSafety, SyncSafety},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Precomputed value, no factory is ever called
    Value,
    /// Computed once on first resolution, then cached
    Singleton,
    /// Computed on every resolution
    Instance,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::Value => "value",
            EntryKind::Singleton => "singleton",
            EntryKind::Instance => "instance",
        })
    }
}

pub(crate) enum Provider {
    Value(Value),
    Singleton {
        instantiator: BoxedCloneInstantiator,
        cached: Mutex<Option<Value>>,
    },
    Instance {
        instantiator: BoxedCloneInstantiator,
    },
}

pub struct RegistryEntry {
    pub(crate) name: String,
    pub(crate) dependency_names: Box<[String]>,
    pub(crate) provider: Provider,
}

impl RegistryEntry {
    #[must_use]
    pub(crate) fn value(name: String, value: Value) -> Self {
        Self {
            name,
            dependency_names: Box::default(),
            provider: Provider::Value(value),
        }
    }

    pub(crate) fn singleton(name: String, factory: Factory) -> Result<Self, SignatureErrorKind> {
        let (dependency_names, instantiator) = factory.into_parts()?;
        Ok(Self {
            name,
            dependency_names,
            provider: Provider::Singleton {
                instantiator,
                cached: Mutex::new(None),
            },
        })
    }

    pub(crate) fn instance(name: String, factory: Factory) -> Result<Self, SignatureErrorKind> {
        let (dependency_names, instantiator) = factory.into_parts()?;
        Ok(Self {
            name,
            dependency_names,
            provider: Provider::Instance { instantiator },
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self.provider {
            Provider::Value(_) => EntryKind::Value,
            Provider::Singleton { .. } => EntryKind::Singleton,
            Provider::Instance { .. } => EntryKind::Instance,
        }
    }

    /// Names this entry depends on, in the order they're passed to its factory
    #[inline]
    #[must_use]
    pub fn dependency_names(&self) -> &[String] {
        &self.dependency_names
    }

    /// Returns `true` if the entry already holds a value: always for values, after the first resolution for singletons.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        match &self.provider {
            Provider::Value(_) => true,
            Provider::Singleton { cached, .. } => cached.lock().is_some(),
            Provider::Instance { .. } => false,
        }
    }
}

impl Debug for RegistryEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("dependency_names", &self.dependency_names)
            .field("computed", &self.is_computed())
            .finish()
    }
}

/// Name to entry mapping with a one-way lock.
///
/// It can be filled up front with `provide_*` methods and passed to [`crate::Container::new_with_registry`],
/// or filled through the container's `register_*` methods.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<String, RcThreadSafety<RegistryEntry>>,
    locked: bool,
}

impl Registry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            locked: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn provide_value<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.insert(RegistryEntry::value(name.into(), erase(value)));
        self
    }

    /// # Errors
    /// Returns [`SignatureErrorKind`] if dependency names can't be derived from the factory
    #[inline]
    pub fn provide_singleton(mut self, name: impl Into<String>, factory: Factory) -> Result<Self, SignatureErrorKind> {
        self.insert(RegistryEntry::singleton(name.into(), factory)?);
        Ok(self)
    }

    /// # Errors
    /// Returns [`SignatureErrorKind`] if dependency names can't be derived from the factory
    #[inline]
    pub fn provide_instance(mut self, name: impl Into<String>, factory: Factory) -> Result<Self, SignatureErrorKind> {
        self.insert(RegistryEntry::instance(name.into(), factory)?);
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

impl Registry {
    /// Adds the entry, replacing one with the same name. Returns `false` if the registry is locked.
    pub(crate) fn insert(&mut self, entry: RegistryEntry) -> bool {
        if self.locked {
            warn!(name = %entry.name, "Registry is locked, registration skipped");
            return false;
        }

        let kind = entry.kind();
        if let Some(previous) = self.entries.insert(entry.name.clone(), RcThreadSafety::new(entry)) {
            debug!(name = %previous.name, previous = %previous.kind(), %kind, "Entry replaced");
        } else {
            debug!(%kind, "Entry registered");
        }
        true
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, name: &str) -> Option<RcThreadSafety<RegistryEntry>> {
        self.entries.get(name).cloned()
    }

    /// Removes all entries. Returns `false` if the registry is locked.
    pub(crate) fn clear(&mut self) -> bool {
        if self.locked {
            warn!("Registry is locked, reset skipped");
            return false;
        }

        self.entries.clear();
        debug!("Registry cleared");
        true
    }

    #[inline]
    pub(crate) fn lock(&mut self) {
        self.locked = true;
        debug!("Registry locked");
    }
}
