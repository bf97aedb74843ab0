use namedi::{factory, Container, EntryKind, Factory, Inject, InstantiateErrorKind, Registry, ResolveErrorKind};
use std::sync::{
    atomic::{AtomicU32, AtomicUsize, Ordering},
    Arc,
};

struct Config {
    env: &'static str,
}

struct Logger {
    prefix: &'static str,
}

struct Widget {
    id: u32,
}

#[test]
fn test_logger_from_config() {
    let container = Container::new();
    container.register_value("config", Config { env: "prod" });
    container
        .register_singleton("logger", factory!(|Inject(config): Inject<Config>| Ok(Logger { prefix: config.env })))
        .unwrap();

    let logger = container.get::<Logger>("logger").unwrap();
    assert_eq!(logger.prefix, "prod");

    let logger_again = container.get::<Logger>("logger").unwrap();
    assert!(Arc::ptr_eq(&logger, &logger_again));
}

fn widget_container(id_kind: EntryKind) -> Container {
    let next_id = factory!(["counter"], |Inject(counter): Inject<AtomicU32>| Ok(counter.fetch_add(1, Ordering::SeqCst) + 1));

    let container = Container::new();
    container.register_value("counter", AtomicU32::new(0));
    match id_kind {
        EntryKind::Singleton => container.register_singleton("id", next_id).unwrap(),
        EntryKind::Instance => container.register_instance("id", next_id).unwrap(),
        EntryKind::Value => unreachable!(),
    }
    container
        .register_instance("widget", factory!(|Inject(id): Inject<u32>| Ok(Widget { id: *id })))
        .unwrap();
    container
}

#[test]
fn test_widget_ids_with_instance_counter() {
    let container = widget_container(EntryKind::Instance);

    let first = container.get::<Widget>("widget").unwrap();
    let second = container.get::<Widget>("widget").unwrap();

    assert_eq!((first.id, second.id), (1, 2));
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_widget_ids_with_singleton_counter() {
    let container = widget_container(EntryKind::Singleton);

    let first = container.get::<Widget>("widget").unwrap();
    let second = container.get::<Widget>("widget").unwrap();

    assert_eq!((first.id, second.id), (1, 1));
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_explicit_names_override_bindings() {
    let container = Container::new();
    container.register_value("a", String::from("first"));
    container.register_value("b", String::from("second"));
    container
        .register_singleton(
            "joined",
            factory!(["a", "b"], |Inject(b): Inject<String>, Inject(a): Inject<String>| Ok(format!("{b}-{a}"))),
        )
        .unwrap();

    assert_eq!(*container.get::<String>("joined").unwrap(), "first-second");
}

#[test]
fn test_value_without_factory_calls() {
    let calls = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container.register_value("answer", 42u64);
    container
        .register_instance(
            "unused",
            Factory::with_names(Vec::<&str>::new(), {
                let calls = calls.clone();
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(0u64)
                }
            }),
        )
        .unwrap();

    for _ in 0..3 {
        assert_eq!(*container.get::<u64>("answer").unwrap(), 42);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_transitive_cycle() {
    let container = Container::new();
    container
        .register_singleton("a", factory!(|Inject(b): Inject<u8>| Ok(*b)))
        .unwrap();
    container
        .register_singleton("b", factory!(|Inject(a): Inject<u8>| Ok(*a)))
        .unwrap();

    let err = container.get::<u8>("a").unwrap_err();
    assert!(matches!(err, ResolveErrorKind::CircularDependency { .. }));
    assert_eq!(
        err.to_string(),
        "Circular dependency detected while resolving `a`: a -> b -> a"
    );
}

#[test]
fn test_missing_and_suppressed() {
    let container = Container::new();

    assert!(container.get::<u8>("nonexistent").unwrap_err().is_no_entry());
    assert!(container.try_get::<u8>("nonexistent").unwrap().is_none());
}

#[test]
fn test_lock_freezes_registry() {
    let container = Container::new_with_registry(
        Registry::new()
            .provide_value("config", Config { env: "test" })
            .provide_singleton("logger", factory!(|Inject(config): Inject<Config>| Ok(Logger { prefix: config.env })))
            .unwrap(),
    );
    container.lock();

    container.register_value("config", Config { env: "prod" });
    container
        .register_instance("other", factory!(|| Ok::<_, InstantiateErrorKind>(1u8)))
        .unwrap();
    container.reset();

    assert_eq!(container.names(), ["config", "logger"]);
    assert_eq!(container.get::<Logger>("logger").unwrap().prefix, "test");
}

#[test]
fn test_singleton_shared_between_threads() {
    let calls = Arc::new(AtomicUsize::new(0));

    let container = Container::new();
    container
        .register_singleton(
            "shared",
            Factory::with_names(Vec::<&str>::new(), {
                let calls = calls.clone();
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(String::from("shared"))
                }
            }),
        )
        .unwrap();

    let handles = (0..4)
        .map(|_| {
            let container = container.clone();
            std::thread::spawn(move || container.get::<String>("shared").unwrap())
        })
        .collect::<Vec<_>>();
    let values = handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>();

    for value in &values[1..] {
        assert!(Arc::ptr_eq(&values[0], value));
    }
    assert!(calls.load(Ordering::SeqCst) >= 1);
}
