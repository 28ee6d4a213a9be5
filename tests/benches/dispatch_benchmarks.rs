//! # Blackboard Dispatch Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | `fire` | Fan-out cost by subscriber count |
//! | `fire_dyn` | Runtime type resolution overhead |
//! | `fire_unbound` | Lookup miss |
//! | `add_remove` | Subscription churn under the write lock |

use board::{Board, Event};
use board_tests::support::{Tick, TickCounter, TickListener, TestEvent};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

fn board_with_listeners(count: usize) -> (Board, Vec<Arc<TickCounter>>) {
    let board = Board::new();
    board
        .register::<dyn TickListener, Tick>()
        .expect("fresh board accepts the tick binding");
    let listeners: Vec<_> = (0..count).map(|_| Arc::new(TickCounter::default())).collect();
    for listener in &listeners {
        board.add_listener(listener).expect("tick listener matches");
    }
    (board, listeners)
}

fn bench_fire_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("board-fire");
    group.measurement_time(Duration::from_secs(5));

    for size in [1usize, 10, 100, 1000] {
        let (board, _listeners) = board_with_listeners(size);
        let tick = Tick { seq: 1 };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("fire", size), &size, |b, _| {
            b.iter(|| black_box(board.fire(black_box(&tick)).ok()))
        });

        let erased: &dyn Event = &tick;
        group.bench_with_input(BenchmarkId::new("fire_dyn", size), &size, |b, _| {
            b.iter(|| black_box(board.fire_dyn(black_box(Some(erased))).ok()))
        });
    }

    group.finish();
}

fn bench_fire_unbound(c: &mut Criterion) {
    let (board, _listeners) = board_with_listeners(10);

    c.bench_function("board-fire_unbound", |b| {
        b.iter(|| black_box(board.fire(black_box(&TestEvent)).ok()))
    });
}

fn bench_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("board-subscription");

    for size in [10usize, 100, 1000] {
        let (board, _listeners) = board_with_listeners(size);
        let churner = Arc::new(TickCounter::default());

        group.bench_with_input(BenchmarkId::new("add_remove", size), &size, |b, _| {
            b.iter(|| {
                black_box(board.add_listener(&churner).ok());
                black_box(board.remove_listener(&churner).ok());
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fire_fan_out,
    bench_fire_unbound,
    bench_add_remove
);
criterion_main!(benches);
