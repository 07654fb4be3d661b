use std::{hint::black_box, str::FromStr};

use boxchess::{Board, MAX_MOVES, Side, Square, attacks, move_gen};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

const MIDGAME: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Raw speed of the pseudo-legal generator, reusing one buffer.
fn bench_move_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_generation");
    let mut move_list = Vec::with_capacity(MAX_MOVES);

    for (name, fen) in [("startpos", boxchess::START_FEN), ("midgame", MIDGAME)] {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                move_list.clear();
                move_gen::generate_moves_into(black_box(&board), &mut move_list);
                black_box(&move_list);
            })
        });
    }
    group.finish();
}

fn bench_legal_filter(c: &mut Criterion) {
    let board = Board::from_fen(MIDGAME).unwrap();
    c.bench_function("legal_moves_midgame", |b| {
        b.iter(|| black_box(move_gen::legal_moves(black_box(&board))))
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let board = Board::from_fen(MIDGAME).unwrap();
    let moves = move_gen::generate_moves(&board);

    c.bench_function("apply_every_move", |b| {
        b.iter_batched(
            || board,
            |start| {
                for &mv in &moves {
                    let mut child = start;
                    child.apply_move(mv);
                    black_box(&child);
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_square_attacked(c: &mut Criterion) {
    let board = Board::from_fen(MIDGAME).unwrap();
    let squares: Vec<Square> = ["e1", "d5", "h7", "f3"]
        .into_iter()
        .map(|s| Square::from_str(s).unwrap())
        .collect();

    c.bench_function("square_is_attacked", |b| {
        b.iter(|| {
            for &square in &squares {
                black_box(attacks::square_is_attacked(&board, square, Side::Black));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_move_generation,
    bench_legal_filter,
    bench_apply_move,
    bench_square_attacked
);
criterion_main!(benches);
