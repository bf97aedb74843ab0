#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use namedi::{factory, Container, Inject, Registry};
use std::sync::Arc;

struct A(Arc<B>, Arc<C>);
struct B(i32);
struct C(Arc<CA>);
struct CA(Arc<CAA>);
struct CAA(Arc<CAAA>);
struct CAAA;

#[inline]
fn registry(singletons: bool) -> Registry {
    let provide = |registry: Registry, name: &str, factory| {
        if singletons {
            registry.provide_singleton(name, factory).unwrap()
        } else {
            registry.provide_instance(name, factory).unwrap()
        }
    };

    let registry = Registry::new().provide_value("b", B(2));
    let registry = provide(registry, "caaa", factory!(|| Ok(CAAA)));
    let registry = provide(registry, "caa", factory!(|Inject(caaa): Inject<CAAA>| Ok(CAA(caaa))));
    let registry = provide(registry, "ca", factory!(|Inject(caa): Inject<CAA>| Ok(CA(caa))));
    let registry = provide(registry, "c", factory!(|Inject(ca): Inject<CA>| Ok(C(ca))));
    provide(registry, "a", factory!(|Inject(b): Inject<B>, Inject(c): Inject<C>| Ok(A(b, c))))
}

#[inline]
fn container_get(container: &Container) {
    let _ = container.get::<A>("a").unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let instances = Container::new_with_registry(registry(false));
    let singletons = Container::new_with_registry(registry(true));

    c.bench_function("container_new_with_registry", |b| {
        b.iter(|| Container::new_locked(registry(true)))
    })
    .bench_function("container_register", |b| {
        b.iter(|| {
            let container = Container::new();
            container.register_value("b", B(2));
            container
                .register_singleton("caaa", factory!(|| Ok(CAAA)))
                .unwrap();
        })
    })
    .bench_function("container_get", |b| b.iter(|| container_get(&instances)))
    .bench_function("container_get_with_cache", |b| b.iter(|| container_get(&singletons)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
