//! Criterion benchmarks for the Fibonacci heap
//!
//! Two workloads: a plain insert-then-drain heapsort, and a decrease-key
//! heavy pattern resembling the inner loop of Dijkstra's algorithm.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fibonacci_heap::FibonacciHeap;

/// Deterministic pseudo-random priorities without pulling in a RNG crate.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

fn bench_insert_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_drain");
    for size in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut lcg = Lcg::new(0xfeed);
                let mut heap = FibonacciHeap::new();
                for i in 0..size {
                    heap.insert(lcg.next(), i);
                }
                while let Ok((priority, _item)) = heap.delete_min() {
                    black_box(priority);
                }
            });
        });
    }
    group.finish();
}

fn bench_decrease_key_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key_heavy");
    for size in [1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                let mut handles = Vec::with_capacity(size);
                for i in 0..size {
                    handles.push(heap.insert(u64::MAX, i));
                }
                // Several rounds of decreases per extraction, as Dijkstra
                // produces on dense graphs.
                let mut lcg = Lcg::new(0xbeef);
                let mut floor = u64::MAX / 2;
                for _ in 0..size * 4 {
                    let index = (lcg.next() % size as u64) as usize;
                    floor = floor.saturating_sub(1);
                    let _ = heap.decrease_key(&handles[index], floor);
                }
                while let Ok(entry) = heap.delete_min() {
                    black_box(entry);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert_drain, bench_decrease_key_heavy);
criterion_main!(benches);
