// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the toast lifecycle.
//!
//! Measures the performance of:
//! - Creating toasts into a shared container
//! - Running a burst of toasts through show, expire and detach

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use toast_notify::config::OptionsOverride;
use toast_notify::dispatch::Notifier;
use toast_notify::dom::MemorySurface;

/// Benchmark creating a burst of toasts.
fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_lifecycle");

    group.bench_function("create_100", |b| {
        b.iter(|| {
            let mut notifier = Notifier::new(MemorySurface::new());
            for i in 0..100 {
                black_box(notifier.info(&format!("message {i}"), None, None));
            }
        });
    });

    group.finish();
}

/// Benchmark the full create-to-detach cycle.
fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_lifecycle");
    let options = OptionsOverride {
        time_out: Some(100),
        hide_duration: Some(50),
        progress_bar: Some(true),
        ..OptionsOverride::default()
    };

    group.bench_function("cycle_100", |b| {
        b.iter(|| {
            let mut notifier = Notifier::new(MemorySurface::new());
            for i in 0..100 {
                notifier.success(&format!("saved {i}"), Some("Files"), Some(&options));
                notifier.advance(Duration::from_millis(5));
            }
            notifier.manager_mut().run_until_idle();
            black_box(notifier.manager().container());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_create, bench_full_cycle);
criterion_main!(benches);
