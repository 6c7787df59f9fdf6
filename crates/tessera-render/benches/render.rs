//! Criterion benchmarks for the renderer registry
//!
//! Measures single renders per kind and mode, and batches of mixed renders
//! sharing one registry across threads, as a deployment engine would.

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use tessera_common::model::LogicalResource;
use tessera_render::{RenderOptions, RendererRegistry};

// =============================================================================
// Fixtures
// =============================================================================

const APP_ID: &str =
    "/subscriptions/bench/resourceGroups/rg/providers/Applications.Core/applications/shop";

fn resource(type_: &str, name: &str, properties: serde_json::Value) -> LogicalResource {
    let mut props = json!({ "application": APP_ID });
    if let (Some(base), Some(extra)) = (props.as_object_mut(), properties.as_object()) {
        base.extend(extra.clone());
    }
    serde_json::from_value(json!({
        "type": type_,
        "metadata": {
            "id": format!("/subscriptions/bench/resourceGroups/rg/providers/{type_}/{name}"),
            "name": name
        },
        "properties": props
    }))
    .expect("fixture should deserialize")
}

fn redis_resource_mode(i: usize) -> LogicalResource {
    resource(
        "Applications.Connector/redisCaches",
        &format!("cache-{i}"),
        json!({
            "mode": "resource",
            "resource": format!("/subscriptions/bench/resourceGroups/rg/providers/Microsoft.Cache/Redis/cache-{i}")
        }),
    )
}

fn redis_values_mode(i: usize) -> LogicalResource {
    resource(
        "Applications.Connector/redisCaches",
        &format!("cache-{i}"),
        json!({
            "mode": "values",
            "host": format!("cache-{i}.example.com"),
            "port": 6379,
            "secrets": { "password": "bench" }
        }),
    )
}

fn dapr_state_store(i: usize) -> LogicalResource {
    resource(
        "Applications.Connector/daprStateStores",
        &format!("Store{i}"),
        json!({
            "mode": "resource",
            "resource": format!("/subscriptions/bench/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/acct/tableServices/default/tables/t{i}")
        }),
    )
}

fn mixed_batch(size: usize) -> Vec<LogicalResource> {
    (0..size)
        .map(|i| match i % 3 {
            0 => redis_resource_mode(i),
            1 => redis_values_mode(i),
            _ => dapr_state_store(i),
        })
        .collect()
}

// =============================================================================
// Benchmarks: Single Render
// =============================================================================

fn bench_single_render(c: &mut Criterion) {
    let registry = RendererRegistry::new();
    let options = RenderOptions::in_namespace("shop");
    let mut group = c.benchmark_group("single_render");
    group.throughput(Throughput::Elements(1));

    let cases = [
        ("redis_resource", redis_resource_mode(0)),
        ("redis_values", redis_values_mode(0)),
        ("dapr_state_store", dapr_state_store(0)),
    ];
    for (name, resource) in &cases {
        group.bench_function(*name, |b| {
            b.iter(|| black_box(registry.render(black_box(resource), &options)))
        });
    }

    group.finish();
}

// =============================================================================
// Benchmarks: Batches
// =============================================================================

fn bench_batch_render(c: &mut Criterion) {
    let registry = RendererRegistry::new();
    let options = RenderOptions::in_namespace("shop");
    let mut group = c.benchmark_group("batch_render");

    for size in [10usize, 100, 500] {
        group.throughput(Throughput::Elements(size as u64));
        let batch = mixed_batch(size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &batch, |b, batch| {
            b.iter(|| {
                for resource in batch {
                    let _ = black_box(registry.render(resource, &options));
                }
            });
        });
    }

    group.finish();
}

fn bench_concurrent_render(c: &mut Criterion) {
    let registry = Arc::new(RendererRegistry::new());
    let mut group = c.benchmark_group("concurrent_render");

    for size in [100usize, 500] {
        group.throughput(Throughput::Elements(size as u64));
        let batch = Arc::new(mixed_batch(size));

        group.bench_with_input(BenchmarkId::new("four_threads", size), &size, |b, &size| {
            b.iter(|| {
                let handles: Vec<_> = (0..4)
                    .map(|t| {
                        let registry = Arc::clone(&registry);
                        let batch = Arc::clone(&batch);
                        thread::spawn(move || {
                            let options = RenderOptions::in_namespace("shop");
                            for resource in batch.iter().skip(t).step_by(4).take(size / 4) {
                                let _ = black_box(registry.render(resource, &options));
                            }
                        })
                    })
                    .collect();

                for h in handles {
                    h.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_render,
    bench_batch_render,
    bench_concurrent_render
);
criterion_main!(benches);
