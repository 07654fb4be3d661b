pub use crate::board::fen;
pub use crate::board::{
    self, Board,
    components::{
        A1, CastlingRights, Cell, GRID_SIZE, H8, Piece, Side, Square, on_board, to_index,
    },
};
pub use crate::config::{EngineConfig, LogConfig, PerftConfig, TimeControl};
pub use crate::consts::*;
pub use crate::game::{ExploreState, Flow, game_loop};
pub use crate::moves::{
    self, Direction, attacks, move_gen,
    move_info::{Move, MoveKind},
};
pub use crate::perft::{self, PerftResult};
pub use crate::utils::{self, cli::*, log::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
