macro_rules! all_the_tuples {
    ($name:ident) => {
        $name!([]);
        $name!([T1]);
        $name!([T1, T2]);
        $name!([T1, T2, T3]);
        $name!([T1, T2, T3, T4]);
        $name!([T1, T2, T3, T4, T5]);
        $name!([T1, T2, T3, T4, T5, T6]);
        $name!([T1, T2, T3, T4, T5, T6, T7]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15, T16]);
    };
}

/// Creates a [`crate::Factory`] from a closure.
///
/// # Syntax
/// ```text
/// factory!(|param, ...| body)
/// factory!(["dep", ...], |param, ...| body)
/// ```
///
/// The first form takes dependency names from the closure's own parameter bindings,
/// the second one uses the listed names in order and ignores the bindings.
/// Parameters that don't bind exactly one name, such as `_` or `(a, b)`, need the second form.
///
/// # Examples
/// ```rust
/// use namedi::{factory, Container, Inject};
///
/// struct Config(&'static str);
/// struct Logger(&'static str);
///
/// let container = Container::new();
/// container.register_value("config", Config("prod"));
/// container
///     .register_singleton("logger", factory!(|Inject(config): Inject<Config>| Ok(Logger(config.0))))
///     .unwrap();
/// container
///     .register_instance("greeting", factory!(["logger"], |Inject(log): Inject<Logger>| Ok(log.0.len())))
///     .unwrap();
///
/// assert_eq!(container.get::<Logger>("logger").unwrap().0, "prod");
/// assert_eq!(*container.get::<usize>("greeting").unwrap(), 4);
/// ```
#[macro_export]
macro_rules! factory {
    ([], $($closure:tt)+) => {
        $crate::Factory::with_names(::core::iter::empty::<&str>(), $($closure)+)
    };
    ([$($name:expr),* $(,)?], $($closure:tt)+) => {
        $crate::Factory::with_names([$($name),*], $($closure)+)
    };
    ($($closure:tt)+) => {
        $crate::Factory::from_source(::core::stringify!($($closure)+), $($closure)+)
    };
}
