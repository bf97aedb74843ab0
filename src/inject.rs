use crate::{
    any::{TypeInfo, Value},
    dependency_resolver::{Args, DependencyResolver},
    utils::thread_safety::{downcast, RcThreadSafety, SendSafety, SyncSafety},
    ResolveErrorKind,
};

/// Factory parameter holding a shared dependency of type `Dep`.
///
/// The dependency name comes from the binding inside the pattern, so
/// `|Inject(config): Inject<AppConfig>|` depends on the entry named `config`.
pub struct Inject<Dep>(pub RcThreadSafety<Dep>);

impl<Dep: SendSafety + SyncSafety + 'static> DependencyResolver for Inject<Dep> {
    type Error = ResolveErrorKind;

    fn resolve(args: &mut Args) -> Result<Self, Self::Error> {
        let (name, value) = args.next_arg()?;
        downcast(value).map(Self).map_err(|_| ResolveErrorKind::IncorrectType {
            name,
            expected: TypeInfo::of::<Dep>(),
        })
    }
}

/// The raw value, for factories that inspect or forward dependencies without knowing their type.
impl DependencyResolver for Value {
    type Error = ResolveErrorKind;

    #[inline]
    fn resolve(args: &mut Args) -> Result<Self, Self::Error> {
        args.next_arg().map(|(_, value)| value)
    }
}
