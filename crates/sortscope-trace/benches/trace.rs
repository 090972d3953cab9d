use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sortscope_trace::{generator::generate_random_array, quicksort::generate_trace};

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("quicksort_trace");
    for &n in &[25usize, 100, 400] {
        group.throughput(Throughput::Elements(n as u64));

        // Same seed every run so the step count is stable across runs.
        let random = match generate_random_array(n, 1, 1000, 2024) {
            Ok(v) => v,
            Err(e) => panic!("bench input: {e}"),
        };
        group.bench_function(BenchmarkId::new("random", n), |b| {
            b.iter(|| black_box(generate_trace(black_box(&random))));
        });

        // Already sorted: worst case for last-element pivots.
        let sorted: Vec<f64> = (0..n).map(|i| i as f64).collect();
        group.bench_function(BenchmarkId::new("sorted", n), |b| {
            b.iter(|| black_box(generate_trace(black_box(&sorted))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trace);
criterion_main!(benches);
