pub mod board;
pub mod config;
pub mod game;
pub mod moves;
pub mod perft;
pub mod precomputed;
pub mod prelude;
pub mod utils;

pub use prelude::*;

pub mod consts {
    /// Slots in the piece list, the most pieces a position may hold.
    pub const PIECE_LIST_CAPACITY: usize = 32;
    /// Initial capacity of a generated move list.
    pub const MAX_MOVES: usize = 256;

    pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Published leaf counts for the start position. Pseudo-legal counts
    /// agree with them up to depth 3.
    pub const START_PERFT: &[(u8, u64)] = &[
        (1, 20),   // depth 1: 20 nodes
        (2, 400),  // depth 2: 400 nodes
        (3, 8902), // depth 3: 8,902 nodes
    ];
}
