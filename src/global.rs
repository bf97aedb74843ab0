use std::sync::OnceLock;

use crate::Container;

static GLOBAL: OnceLock<Container> = OnceLock::new();

/// Process-wide default container, created empty on first use.
///
/// Prefer passing a [`Container`] explicitly, this one is for applications that wire
/// everything up at startup and want one registry per process.
///
/// # Examples
/// ```rust
/// use namedi::{factory, global, Inject};
///
/// global().register_value("greeting", "hello");
/// global()
///     .register_singleton("message", factory!(|Inject(greeting): Inject<&'static str>| Ok(greeting.len())))
///     .unwrap();
///
/// assert_eq!(*global().get::<usize>("message").unwrap(), 5);
/// ```
#[must_use]
pub fn global() -> &'static Container {
    GLOBAL.get_or_init(Container::new)
}
