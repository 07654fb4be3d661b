use std::hint::black_box;

use boxchess::{Board, perft};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_perft_startpos(c: &mut Criterion) {
    let board = Board::new();
    let mut group = c.benchmark_group("perft_startpos");
    group.sample_size(20);

    for depth in 1..=3u8 {
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| black_box(perft::count_leaves(black_box(depth), &board)))
        });
    }
    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_perft_parallel(c: &mut Criterion) {
    let board = Board::new();
    let mut group = c.benchmark_group("perft_parallel");
    group.sample_size(10);

    group.bench_function("depth_4", |b| {
        b.iter(|| black_box(perft::perft_parallel(&board, 4, false, 0).unwrap().nodes))
    });
    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_perft_parallel(_: &mut Criterion) {}

criterion_group!(benches, bench_perft_startpos, bench_perft_parallel);
criterion_main!(benches);
