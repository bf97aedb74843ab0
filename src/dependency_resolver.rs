use alloc::{string::String, vec, vec::Vec};

use super::errors::ResolveErrorKind;
use crate::{any::Value, utils::thread_safety::SendSafety};

/// Positional arguments of a factory call: resolved dependency values in declaration order.
pub struct Args {
    values: vec::IntoIter<(String, Value)>,
    position: usize,
}

impl Args {
    #[inline]
    #[must_use]
    pub(crate) fn new(values: Vec<(String, Value)>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Takes the next argument together with the dependency name it was resolved from.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::NoArgument`] if all arguments are already taken.
    pub fn next_arg(&mut self) -> Result<(String, Value), ResolveErrorKind> {
        let position = self.position;
        self.position += 1;
        self.values.next().ok_or(ResolveErrorKind::NoArgument { position })
    }

    /// Number of arguments left.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts positional factory arguments into a typed factory parameter.
pub trait DependencyResolver: Sized {
    type Error: Into<ResolveErrorKind>;

    fn resolve(args: &mut Args) -> Result<Self, Self::Error>;

    /// Number of positional arguments the parameter consumes.
    #[inline]
    #[must_use]
    fn count() -> usize {
        1
    }
}

macro_rules! impl_dependency_resolver {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<$($ty,)*> DependencyResolver for ($($ty,)*)
        where
            $( $ty: DependencyResolver + SendSafety, )*
        {
            type Error = ResolveErrorKind;

            #[inline]
            #[allow(unused_variables)]
            fn resolve(args: &mut Args) -> Result<Self, Self::Error> {
                Ok(($($ty::resolve(args).map_err(Into::into)?,)*))
            }

            #[inline]
            fn count() -> usize {
                0 $( + $ty::count() )*
            }
        }
    };
}

all_the_tuples!(impl_dependency_resolver);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Args, DependencyResolver};
    use crate::{inject::Inject, utils::thread_safety::erase, ResolveErrorKind, Value};

    use alloc::{string::ToString as _, vec};

    #[test]
    #[allow(dead_code)]
    fn test_dependency_resolver_impls() {
        fn resolver<T: DependencyResolver>() {}
        fn resolver_with_dep<Dep: Send + Sync + 'static>() {
            resolver::<Inject<Dep>>();
            resolver::<Value>();
            resolver::<(Inject<Dep>, Value)>();
        }
    }

    #[test]
    fn test_tuple_count() {
        assert_eq!(<()>::count(), 0);
        assert_eq!(<(Inject<u8>,)>::count(), 1);
        assert_eq!(<(Inject<u8>, Value, Inject<u16>)>::count(), 3);
    }

    #[test]
    fn test_tuple_resolve_in_order() {
        let mut args = Args::new(vec![("a".to_string(), erase(1u8)), ("b".to_string(), erase(2u16))]);

        let (Inject(a), Inject(b)) = <(Inject<u8>, Inject<u16>)>::resolve(&mut args).unwrap();

        assert_eq!((*a, *b), (1, 2));
        assert!(args.is_empty());
    }

    #[test]
    fn test_not_enough_args() {
        let mut args = Args::new(vec![("a".to_string(), erase(1u8))]);

        let result = <(Inject<u8>, Inject<u8>)>::resolve(&mut args);

        assert!(matches!(result, Err(ResolveErrorKind::NoArgument { position: 1 })));
    }
}
