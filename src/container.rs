use alloc::{
    boxed::Box,
    string::{String, ToString as _},
    vec::Vec,
};
use core::{
    any::type_name,
    fmt::{self, Debug, Formatter},
};
use parking_lot::Mutex;
use tracing::{debug, debug_span, error, info_span, warn};

use crate::{
    any::{TypeInfo, Value},
    chain::DependencyChain,
    dependency_resolver::Args,
    errors::{InstantiatorErrorKind, ResolveErrorKind, SignatureErrorKind},
    instantiator::{BoxedCloneInstantiator, Factory},
    registry::{EntryKind, Provider, Registry, RegistryEntry},
    service::Service as _,
    utils::thread_safety::{downcast, erase, RcThreadSafety, SendSafety, SyncSafety},
};

/// Name-based dependency container.
///
/// Cloning is cheap, clones share the registry, the lock flag and cached singletons.
#[derive(Clone)]
pub struct Container {
    pub(crate) inner: RcThreadSafety<ContainerInner>,
}

pub(crate) struct ContainerInner {
    registry: Mutex<Registry>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates an empty, unlocked container
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_registry(Registry::new())
    }

    #[inline]
    #[must_use]
    pub fn new_with_registry(registry: Registry) -> Self {
        Self {
            inner: RcThreadSafety::new(ContainerInner {
                registry: Mutex::new(registry),
            }),
        }
    }

    /// Creates a container from a filled registry and locks it right away
    #[inline]
    #[must_use]
    pub fn new_locked(registry: Registry) -> Self {
        let container = Self::new_with_registry(registry);
        container.lock();
        container
    }

    /// Registers a precomputed value under `name`, replacing any previous entry.
    ///
    /// Does nothing if the container is locked.
    pub fn register_value<T>(&self, name: impl Into<String>, value: T)
    where
        T: SendSafety + SyncSafety + 'static,
    {
        let name = name.into();
        let span = info_span!("register", name = %name, kind = %EntryKind::Value);
        let _guard = span.enter();

        self.inner.registry.lock().insert(RegistryEntry::value(name, erase(value)));
    }

    /// Registers a factory which is called once, on first resolution of `name`. The result is cached.
    ///
    /// Does nothing if the container is locked.
    ///
    /// # Errors
    /// Returns [`SignatureErrorKind`] if dependency names can't be derived from the factory
    pub fn register_singleton(&self, name: impl Into<String>, factory: Factory) -> Result<(), SignatureErrorKind> {
        self.register(name.into(), EntryKind::Singleton, |name| RegistryEntry::singleton(name, factory))
    }

    /// Registers a factory which is called on every resolution of `name`.
    ///
    /// Does nothing if the container is locked.
    ///
    /// # Errors
    /// Returns [`SignatureErrorKind`] if dependency names can't be derived from the factory
    pub fn register_instance(&self, name: impl Into<String>, factory: Factory) -> Result<(), SignatureErrorKind> {
        self.register(name.into(), EntryKind::Instance, |name| RegistryEntry::instance(name, factory))
    }

    /// Gets a dependency by name, resolving its dependencies first
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::NoEntry`] if `name` or one of its transitive dependencies isn't registered
    /// - Returns [`ResolveErrorKind::CircularDependency`] if `name` depends on itself
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the value isn't a `Dep`
    /// - Returns [`ResolveErrorKind::Instantiator`] if a factory fails
    pub fn get<Dep: SendSafety + SyncSafety + 'static>(&self, name: &str) -> Result<RcThreadSafety<Dep>, ResolveErrorKind> {
        let span = info_span!("get", name, dependency = type_name::<Dep>());
        let _guard = span.enter();

        let value = self.resolve_in_chain(name, &mut DependencyChain::new())?;
        downcast_value(name, value)
    }

    /// Same as [`Self::get`], but returns `Ok(None)` if `name` itself isn't registered.
    ///
    /// Missing transitive dependencies are still errors.
    ///
    /// # Errors
    /// Same as [`Self::get`], except [`ResolveErrorKind::NoEntry`] for `name` itself
    pub fn try_get<Dep: SendSafety + SyncSafety + 'static>(&self, name: &str) -> Result<Option<RcThreadSafety<Dep>>, ResolveErrorKind> {
        let span = info_span!("get", name, dependency = type_name::<Dep>());
        let _guard = span.enter();

        match self.try_resolve_root(name)? {
            Some(value) => downcast_value(name, value).map(Some),
            None => Ok(None),
        }
    }

    /// Gets a dependency by name without downcasting it
    ///
    /// # Errors
    /// Same as [`Self::get`], except [`ResolveErrorKind::IncorrectType`] for `name` itself
    pub fn resolve(&self, name: &str) -> Result<Value, ResolveErrorKind> {
        let span = info_span!("get", name);
        let _guard = span.enter();

        self.resolve_in_chain(name, &mut DependencyChain::new())
    }

    /// Same as [`Self::resolve`], but returns `Ok(None)` if `name` itself isn't registered.
    ///
    /// # Errors
    /// Same as [`Self::try_get`]
    pub fn try_resolve(&self, name: &str) -> Result<Option<Value>, ResolveErrorKind> {
        let span = info_span!("get", name);
        let _guard = span.enter();

        self.try_resolve_root(name)
    }

    /// Removes all entries. Does nothing if the container is locked.
    pub fn reset(&self) {
        self.inner.registry.lock().clear();
    }

    /// Forbids any further registration and reset. There is no way back.
    pub fn lock(&self) {
        self.inner.registry.lock().lock();
    }

    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.registry.lock().is_locked()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.registry.lock().contains(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.registry.lock().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.registry.lock().is_empty()
    }

    /// Registered names in sorted order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.inner.registry.lock().names()
    }

    #[must_use]
    pub fn kind(&self, name: &str) -> Option<EntryKind> {
        self.entry(name).map(|entry| entry.kind())
    }
}

impl Container {
    fn register<F>(&self, name: String, kind: EntryKind, make_entry: F) -> Result<(), SignatureErrorKind>
    where
        F: FnOnce(String) -> Result<RegistryEntry, SignatureErrorKind>,
    {
        let span = info_span!("register", name = %name, %kind);
        let _guard = span.enter();

        let mut registry = self.inner.registry.lock();
        if registry.is_locked() {
            warn!("Registry is locked, registration skipped");
            return Ok(());
        }

        match make_entry(name) {
            Ok(entry) => {
                registry.insert(entry);
                Ok(())
            }
            Err(err) => {
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// The registry is only locked for the lookup, so factories are free to use the container.
    #[inline]
    fn entry(&self, name: &str) -> Option<RcThreadSafety<RegistryEntry>> {
        self.inner.registry.lock().get(name)
    }

    fn try_resolve_root(&self, name: &str) -> Result<Option<Value>, ResolveErrorKind> {
        let Some(entry) = self.entry(name) else {
            debug!("Not found in registry, suppressed");
            return Ok(None);
        };

        self.resolve_entry(&entry, &mut DependencyChain::new()).map(Some)
    }

    fn resolve_in_chain(&self, name: &str, chain: &mut DependencyChain) -> Result<Value, ResolveErrorKind> {
        let span = debug_span!("resolve", dependency = name);
        let _guard = span.enter();

        if chain.contains(name) {
            let err = chain.cycle_error(name);
            error!("{}", err);
            return Err(err);
        }

        let Some(entry) = self.entry(name) else {
            let err = ResolveErrorKind::NoEntry { name: name.to_string() };
            error!("{}", err);
            return Err(err);
        };

        self.resolve_entry(&entry, chain)
    }

    fn resolve_entry(&self, entry: &RegistryEntry, chain: &mut DependencyChain) -> Result<Value, ResolveErrorKind> {
        match &entry.provider {
            Provider::Value(value) => {
                debug!("Found value");
                Ok(value.clone())
            }
            Provider::Singleton { instantiator, cached } => {
                if let Some(value) = cached.lock().clone() {
                    debug!("Found in cache");
                    return Ok(value);
                }
                debug!("Not found in cache");

                let value = self.instantiate(entry, instantiator, chain)?;

                // First stored value wins if another thread resolved the singleton meanwhile
                let mut guard = cached.lock();
                if guard.is_some() {
                    debug!("Cached concurrently, own value discarded");
                } else {
                    debug!("Cached");
                }
                Ok(guard.get_or_insert(value).clone())
            }
            Provider::Instance { instantiator } => self.instantiate(entry, instantiator, chain),
        }
    }

    fn instantiate(
        &self,
        entry: &RegistryEntry,
        instantiator: &BoxedCloneInstantiator,
        chain: &mut DependencyChain,
    ) -> Result<Value, ResolveErrorKind> {
        chain.push(&entry.name);
        let args = entry
            .dependency_names
            .iter()
            .map(|name| self.resolve_in_chain(name, chain).map(|value| (name.clone(), value)))
            .collect::<Result<Vec<_>, _>>();
        chain.pop();

        match instantiator.clone().call(Args::new(args?)) {
            Ok(value) => Ok(value),
            Err(err) => {
                let source = match err {
                    InstantiatorErrorKind::Deps(err) => InstantiatorErrorKind::Deps(Box::new(err)),
                    InstantiatorErrorKind::Factory(err) => InstantiatorErrorKind::Factory(err),
                };
                let err = ResolveErrorKind::Instantiator {
                    name: entry.name.clone(),
                    source,
                };
                error!("{}", err);
                Err(err)
            }
        }
    }
}

fn downcast_value<Dep: SendSafety + SyncSafety + 'static>(name: &str, value: Value) -> Result<RcThreadSafety<Dep>, ResolveErrorKind> {
    downcast(value).map_err(|_| {
        let err = ResolveErrorKind::IncorrectType {
            name: name.to_string(),
            expected: TypeInfo::of::<Dep>(),
        };
        error!("{}", err);
        err
    })
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let registry = self.inner.registry.lock();
        f.debug_struct("Container")
            .field("names", &registry.names())
            .field("locked", &registry.is_locked())
            .finish()
    }
}
