use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use absplit::{AbOptions, SplitRegistry, SplitVariantResolver};

fn make_registry() -> Arc<SplitRegistry> {
    // 512 splits, a few of them wider than binary.
    let mut registry = SplitRegistry::new();
    for i in 0..512u32 {
        let name = format!("split_{i}");
        registry = if i % 16 == 0 {
            registry.with_split(name, [("true", 25), ("control", 25), ("b", 25), ("a", 25)])
        } else {
            registry.with_split(name, [("true", 50), ("false", 50)])
        };
    }
    Arc::new(registry)
}

fn bench_resolve_local(c: &mut Criterion) {
    c.bench_function("resolve/local", |b| {
        b.iter(|| {
            let resolver = SplitVariantResolver::new(
                AbOptions::new()
                    .split_name("checkout_flow")
                    .no_true_variant()
                    .no_split_registry(),
            )
            .unwrap();
            black_box(resolver.variants().false_label.len())
        });
    });
}

fn bench_resolve_registry(c: &mut Criterion) {
    let registry = make_registry();
    c.bench_function("resolve/registry_binary", |b| {
        b.iter(|| {
            let resolver = SplitVariantResolver::new(
                AbOptions::new()
                    .split_name("split_7")
                    .no_true_variant()
                    .split_registry(Arc::clone(&registry)),
            )
            .unwrap();
            black_box(resolver.variants().false_label.len())
        });
    });

    c.bench_function("resolve/registry_wide", |b| {
        b.iter(|| {
            let resolver = SplitVariantResolver::new(
                AbOptions::new()
                    .split_name("split_32")
                    .true_variant("control")
                    .split_registry(Arc::clone(&registry)),
            )
            .unwrap();
            black_box(resolver.variants().false_label.len())
        });
    });
}

criterion_group!(benches, bench_resolve_local, bench_resolve_registry);
criterion_main!(benches);
