use crate::*;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct PerftResult {
    /// Total nodes counted
    pub nodes: u64,
    /// Time taken
    pub duration: Duration,
    /// Nodes per second
    pub nps: u64,
    /// Move breakdown showing count for each move
    pub move_counts: Option<Vec<(Move, u64)>>,
}

impl PerftResult {
    /// Creates a new PerftResult with the given data
    pub fn new(nodes: u64, duration: Duration, move_counts: Option<Vec<(Move, u64)>>) -> Self {
        let nanos = duration.as_nanos();
        let nps = if nanos > 0 {
            (u128::from(nodes) * 1_000_000_000 / nanos) as u64
        } else {
            0
        };

        Self {
            nodes,
            duration,
            nps,
            move_counts,
        }
    }
}

/// Number of pseudo-legal leaf positions `depth` plies below `board`.
///
/// Every child is explored on its own copy of the board. Moves that leave
/// the mover in check are counted like any other.
pub fn count_leaves(depth: u8, board: &Board) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = move_gen::generate_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = *board;
            child.apply_move(mv);
            count_leaves(depth - 1, &child)
        })
        .sum()
}

/// Leaf count of the standard initial position.
pub fn do_perft(depth: u8) -> u64 {
    count_leaves(depth, &Board::startpos())
}

pub fn perft(board: &Board, depth: u8, divide: bool) -> PerftResult {
    let start_time = Instant::now();

    if depth == 0 {
        return PerftResult::new(1, start_time.elapsed(), None);
    }

    let moves = move_gen::generate_moves(board);
    let mut total_nodes = 0;
    let mut move_counts = if divide {
        Some(Vec::with_capacity(moves.len()))
    } else {
        None
    };

    for m in moves {
        let mut child = *board;
        child.apply_move(m);
        let sub_nodes = count_leaves(depth - 1, &child);

        total_nodes += sub_nodes;

        if let Some(ref mut counts) = move_counts {
            counts.push((m, sub_nodes));
        }
    }

    PerftResult::new(total_nodes, start_time.elapsed(), move_counts)
}

/// Root moves are split over a rayon pool, each subtree counted on its own
/// board copy. Gives the same counts as [`perft`].
#[cfg(feature = "parallel")]
pub fn perft_parallel(board: &Board, depth: u8, divide: bool, threads: usize) -> Result<PerftResult> {
    use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let start_time = Instant::now();

    if depth == 0 {
        return Ok(PerftResult::new(1, start_time.elapsed(), None));
    }

    let moves = move_gen::generate_moves(board);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .into_diagnostic()
        .context("Building perft thread pool")?;

    let bar = ProgressBar::new(moves.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} root moves")
            .into_diagnostic()?,
    );

    let counts: Vec<(Move, u64)> = pool.install(|| {
        moves
            .par_iter()
            .progress_with(bar.clone())
            .map(|&m| {
                let mut child = *board;
                child.apply_move(m);
                (m, count_leaves(depth - 1, &child))
            })
            .collect()
    });
    bar.finish_and_clear();

    let total_nodes = counts.iter().map(|(_, n)| n).sum();
    Ok(PerftResult::new(
        total_nodes,
        start_time.elapsed(),
        divide.then_some(counts),
    ))
}

/// Performs a Perft test and prints a detailed breakdown
#[instrument(skip(board))]
pub fn perft_divide(board: &Board, depth: u8) -> PerftResult {
    println!("Starting perft...");
    let result = perft(board, depth, true);
    print_divide(&result, depth);
    result
}

pub fn print_divide(result: &PerftResult, depth: u8) {
    if let Some(ref move_counts) = result.move_counts {
        println!("Perft results at depth {depth}");
        println!("----------------------------");

        for (mov, count) in move_counts {
            println!("{mov}: {count}");
        }

        println!("----------------------------");
    }
    println!("Total nodes: {}", result.nodes);
    println!("Time: {} ms", result.duration.as_millis());
    println!("Nodes per second: {}", result.nps);
}

/// Runs a suite of perft tests for depths 1 through max_depth
#[instrument(skip(board))]
pub fn run_perft_suite(board: &Board, max_depth: u8) -> Vec<PerftResult> {
    println!("Running Perft suite up to depth {max_depth}");
    println!("----------------------------");

    let mut results = Vec::with_capacity(max_depth as usize);
    for depth in 1..=max_depth {
        let result = perft(board, depth, false);

        println!(
            "Depth {}: {} nodes in {} ms ({} nps)",
            depth,
            result.nodes,
            result.duration.as_millis(),
            result.nps
        );
        debug!(depth, nodes = result.nodes, "perft depth finished");
        results.push(result);
    }

    println!("----------------------------");
    results
}

#[cfg(test)]
mod perft_tests {
    use super::*;
    use crate::init;

    #[test]
    fn test_perft_starting_position() {
        init();
        let board = Board::new();

        for &(depth, expected) in START_PERFT {
            let result = perft(&board, depth, false);
            assert_eq!(
                result.nodes, expected,
                "Perft failed at depth {}: got {} expected {}",
                depth, result.nodes, expected
            );
        }
    }

    #[test]
    fn test_do_perft_matches_reference() {
        for &(depth, expected) in START_PERFT {
            assert_eq!(do_perft(depth), expected, "do_perft({depth})");
        }
        assert_eq!(do_perft(0), 1);
    }

    #[test]
    fn test_perft_bare_kings() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(count_leaves(1, &board), 5);
        assert_eq!(count_leaves(2, &board), 25);
    }

    #[test]
    fn test_perft_rook_and_kings() {
        let board = Board::from_fen("4k3/8/8/1r6/8/8/8/4K3 b - - 0 1").unwrap();
        // king: d8 f8 d7 e7 f7, rook: 3 up, 4 down, 1 left, 6 right
        assert_eq!(count_leaves(1, &board), 19);
    }

    #[test]
    fn test_divide_sums_to_total() {
        let board = Board::new();
        let result = perft(&board, 2, true);
        let counts = result.move_counts.expect("divide requested");
        assert_eq!(counts.len(), 20);
        assert!(counts.iter().all(|&(_, n)| n == 20));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<u64>(), result.nodes);
    }

    #[test]
    fn test_perft_does_not_mutate_board() {
        let board = Board::new();
        let before = board;
        perft(&board, 3, false);
        assert_eq!(board, before);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let board = Board::new();
        let serial = perft(&board, 3, true);
        let parallel = perft_parallel(&board, 3, true, 2).unwrap();
        assert_eq!(parallel.nodes, serial.nodes);
        assert_eq!(parallel.move_counts, serial.move_counts);
    }
}
