//! Full pipeline benchmark: queue, validation system and result log inside a
//! headless App.
//!
//! Run with: cargo bench -p compliance --features bench --bench pipeline_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use compliance::test_harness::TestBench;
use compliance::{DeviceCurve, DeviceSpec, Measurement, ValidationContext};

fn fill(bench: &mut TestBench, n: usize, context: ValidationContext) {
    for i in 0..n {
        let zs = 0.2 + (i % 100) as f64 * 0.01;
        if let Ok(m) = Measurement::zs(zs) {
            bench.record("bench", m, context);
        }
    }
}

fn bench_drain(c: &mut Criterion) {
    let Ok(device) = DeviceSpec::mcb(DeviceCurve::B, 32.0) else {
        return;
    };
    let context = ValidationContext::for_device(device).with_ze(0.35);

    let mut group = c.benchmark_group("pipeline");
    for &n in &[64usize, 1024] {
        group.bench_with_input(BenchmarkId::new("drain", n), &n, |b, &n| {
            let mut bench = TestBench::new();
            b.iter(|| {
                fill(&mut bench, n, context);
                bench.tick(1);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_drain);
criterion_main!(benches);
