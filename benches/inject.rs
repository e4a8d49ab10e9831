#![allow(dead_code)]

use autowire::{Container, Dependency, Inject, Injectable};
use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

trait Runner: Send + Sync {}

struct RunnerImpl;

impl Runner for RunnerImpl {}

#[derive(Injectable, Default)]
struct A {
    #[inject(auto)]
    b: Inject<B>,
    #[inject(auto)]
    c: Inject<C>,
}

#[derive(Injectable, Default)]
struct B {
    #[inject(auto)]
    runner: Inject<dyn Runner>,
}

#[derive(Injectable, Default)]
struct C {
    #[inject(auto)]
    ca: Inject<CA>,
}

#[derive(Injectable, Default)]
struct CA {
    #[inject(auto)]
    caa: Inject<CAA>,
}

#[derive(Injectable, Default)]
struct CAA {
    #[inject(auto)]
    value: Inject<i32>,
}

#[inline]
fn container_with_graph() -> Container {
    let runner = Arc::new(RunnerImpl);

    let container = Container::default();
    container
        .add_dependencies([
            Dependency::new(2i32),
            Dependency::from_rc(runner.clone()).implements(runner as Arc<dyn Runner>),
            Dependency::injectable(Arc::new(CAA::default())),
            Dependency::injectable(Arc::new(CA::default())),
            Dependency::injectable(Arc::new(C::default())),
            Dependency::injectable(Arc::new(B::default())),
        ])
        .unwrap();
    container
}

#[inline]
fn container_with_values() -> Container {
    let container = Container::default();
    container
        .add_dependencies([
            Dependency::new(1u8),
            Dependency::new(1u16),
            Dependency::new(1u32),
            Dependency::new(1u64),
            Dependency::new(String::from("value")),
            Dependency::new(2i32),
        ])
        .unwrap();
    container
}

#[inline]
fn container_inject(container: &Container) {
    let _ = container.inject(&A::default()).unwrap();
}

#[inline]
fn container_inject_flat(container: &Container) {
    let _ = container.inject(&CAA::default()).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let container_1 = container_with_graph();
    let container_2 = container_with_values();

    c.bench_function("container_add_dependencies", |b| b.iter(|| container_with_graph()))
        .bench_function("container_inject", |b| b.iter(|| container_inject(&container_1)))
        .bench_function("container_inject_flat", |b| b.iter(|| container_inject_flat(&container_2)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
