use alloc::{
    borrow::Cow,
    boxed::Box,
    string::{String, ToString as _},
    vec::Vec,
};
use core::fmt::{self, Debug, Formatter};
use tracing::debug;

use super::{
    dependency_resolver::{Args, DependencyResolver},
    errors::{InstantiateErrorKind, InstantiatorErrorKind, ResolveErrorKind, SignatureErrorKind},
    service::{service_fn, BoxCloneService},
};
use crate::{
    any::Value,
    signature::DependencyNames,
    utils::thread_safety::{erase, SendSafety, SyncSafety},
};

pub trait Instantiator<Deps>: Clone + 'static
where
    Deps: DependencyResolver,
{
    type Provides: 'static;
    type Error: Into<InstantiateErrorKind>;

    fn instantiate(&mut self, dependencies: Deps) -> Result<Self::Provides, Self::Error>;
}

pub(crate) type BoxedCloneInstantiator = BoxCloneService<Args, Value, InstantiatorErrorKind<ResolveErrorKind, InstantiateErrorKind>>;

#[must_use]
pub(crate) fn boxed_instantiator<Inst, Deps>(instantiator: Inst) -> BoxedCloneInstantiator
where
    Inst: Instantiator<Deps> + Send + Sync,
    Inst::Provides: SendSafety + SyncSafety,
    Deps: DependencyResolver,
{
    BoxCloneService::new(service_fn(
        move |mut args: Args| -> Result<Value, InstantiatorErrorKind<ResolveErrorKind, InstantiateErrorKind>> {
            let dependencies = match Deps::resolve(&mut args) {
                Ok(dependencies) => dependencies,
                Err(err) => return Err(InstantiatorErrorKind::Deps(err.into())),
            };
            let dependency = match instantiator.clone().instantiate(dependencies) {
                Ok(dependency) => dependency,
                Err(err) => return Err(InstantiatorErrorKind::Factory(err.into())),
            };

            debug!("Instantiated");

            Ok(erase(dependency))
        },
    ))
}

macro_rules! impl_instantiator {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Response, Err, $($ty,)*> Instantiator<($($ty,)*)> for F
        where
            F: FnMut($($ty,)*) -> Result<Response, Err> + Clone + 'static,
            Response: 'static,
            Err: Into<InstantiateErrorKind>,
            $( $ty: DependencyResolver + SendSafety, )*
        {
            type Provides = Response;
            type Error = Err;

            fn instantiate(&mut self, ($($ty,)*): ($($ty,)*)) -> Result<Self::Provides, Self::Error> {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_instantiator);

/// A factory ready to be registered as a singleton or an instance.
///
/// Dependency names are either parsed from the factory's signature text
/// (see [`crate::extract_parameter_names`]) or given explicitly.
/// Prefer the [`crate::factory!`] macro, which captures the signature text for you.
pub struct Factory {
    names: DependencyNames,
    arity: usize,
    instantiator: BoxedCloneInstantiator,
}

impl Factory {
    /// Creates a factory whose dependency names will be parsed from `signature` on registration.
    #[must_use]
    pub fn from_source<Inst, Deps>(signature: impl Into<Cow<'static, str>>, instantiator: Inst) -> Self
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind> + Send + Sync,
        Inst::Provides: SendSafety + SyncSafety,
        Deps: DependencyResolver,
    {
        Self {
            names: DependencyNames::Source(signature.into()),
            arity: Deps::count(),
            instantiator: boxed_instantiator(instantiator),
        }
    }

    /// Creates a factory that depends on `names` in the given order, regardless of its parameter bindings.
    #[must_use]
    pub fn with_names<Inst, Deps, I>(names: I, instantiator: Inst) -> Self
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind> + Send + Sync,
        Inst::Provides: SendSafety + SyncSafety,
        Deps: DependencyResolver,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            names: DependencyNames::Explicit(names.into_iter().map(|name| name.as_ref().to_string()).collect()),
            arity: Deps::count(),
            instantiator: boxed_instantiator(instantiator),
        }
    }

    #[inline]
    #[must_use]
    pub const fn dependency_names(&self) -> &DependencyNames {
        &self.names
    }

    /// Number of positional arguments the factory takes.
    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn into_parts(self) -> Result<(Box<[String]>, BoxedCloneInstantiator), SignatureErrorKind> {
        let names: Vec<String> = self.names.extract()?;
        if names.len() != self.arity {
            return Err(SignatureErrorKind::ArityMismatch {
                expected: self.arity,
                actual: names.len(),
            });
        }
        Ok((names.into_boxed_slice(), self.instantiator))
    }
}

impl Debug for Factory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("names", &self.names)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
