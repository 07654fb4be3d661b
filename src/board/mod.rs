use std::fmt::{Display, Write};
use std::str::FromStr;

use crate::moves::{attacks, move_gen};
use crate::precomputed::castle_tables::CASTLE_TABLES;
use crate::prelude::*;

pub mod components;
pub mod fen;


/// Mailbox position on a padded 10x12 grid.
///
/// The board is a plain value. Exploring a variation means copying it and
/// applying the move to the copy, so sibling branches never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// One byte per grid cell, padding included.
    cells: [Cell; GRID_SIZE],
    /// Side to move
    pub stm: Side,
    pub castling_rights: CastlingRights,
    /// Square passed over by the last double pawn push
    pub enpassant_square: Option<Square>,
    white_king: Option<Square>,
    black_king: Option<Square>,
    /// Slot -> square of every piece still on the board. `None` marks a
    /// captured or unused slot.
    piece_list: [Option<Square>; PIECE_LIST_CAPACITY],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fen::parse_fen(s)
    }
}

impl Board {
    /// Board with the standard starting position
    pub fn new() -> Self {
        Self::startpos()
    }

    /// Cleared board: every playable cell empty, padding marked off-board,
    /// no castling rights, no en passant square, no kings.
    pub fn empty() -> Self {
        let mut board = Self {
            cells: [Cell::OFF_BOARD; GRID_SIZE],
            stm: Side::White,
            castling_rights: CastlingRights::empty(),
            enpassant_square: None,
            white_king: None,
            black_king: None,
            piece_list: [None; PIECE_LIST_CAPACITY],
        };
        board.clear();
        board
    }

    pub fn startpos() -> Self {
        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        let mut board = Self::empty();
        let mut slot = 0;
        // Same slot order as decoding the start FEN: rank 8 first, a to h.
        for rank in (0..8).rev() {
            let (side, is_back) = match rank {
                7 => (Side::Black, true),
                6 => (Side::Black, false),
                1 => (Side::White, false),
                0 => (Side::White, true),
                _ => continue,
            };
            for (file, back) in BACK_RANK.into_iter().enumerate() {
                let piece = if is_back { back } else { Piece::Pawn };
                let index = to_index(file, rank);
                board.cells[index] = Cell::new(piece, side);
                board.piece_list[slot] = Square::new(index);
                slot += 1;
            }
        }
        board.castling_rights = CastlingRights::all();
        board.refresh_king_cache();
        board
    }

    /// Parses a position record. See [`fen::parse_fen`].
    pub fn from_fen(fen: &str) -> miette::Result<Self> {
        fen::parse_fen(fen)
    }

    /// Resets every cell to empty or off-board, and drops castling rights,
    /// the en passant square, the king cache and the piece list.
    pub fn clear(&mut self) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            *cell = if on_board(index) {
                Cell::EMPTY
            } else {
                Cell::OFF_BOARD
            };
        }
        self.stm = Side::White;
        self.castling_rights = CastlingRights::empty();
        self.enpassant_square = None;
        self.white_king = None;
        self.black_king = None;
        self.piece_list = [None; PIECE_LIST_CAPACITY];
    }

    /// Puts a piece on an empty square and gives it a piece-list slot.
    /// Fails when the square is taken or the piece list is full.
    pub fn place(&mut self, piece: Piece, side: Side, square: Square) -> miette::Result<()> {
        miette::ensure!(
            square.is_on_board(),
            "[place] Square index {} is off the board",
            square.index()
        );
        miette::ensure!(
            self.cell(square).is_empty(),
            "[place] Some piece already exists at {square}. Found: {:?}",
            self.piece_at(square)
        );
        let slot = self
            .piece_list
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| {
                miette::miette!(
                    "[place] Piece list is full, a position holds at most {PIECE_LIST_CAPACITY} pieces"
                )
            })?;

        self.cells[square.index()] = Cell::new(piece, side);
        self.piece_list[slot] = Some(square);
        if piece == Piece::King {
            self.set_king(side, Some(square));
        }
        Ok(())
    }

    /// Content of a grid cell. Indices outside the grid read as off-board.
    #[inline(always)]
    pub fn cell(&self, square: Square) -> Cell {
        self.cells
            .get(square.index())
            .copied()
            .unwrap_or(Cell::OFF_BOARD)
    }

    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<(Piece, Side)> {
        self.cell(square).piece_info()
    }

    /// Linear scan of the playable board for `side`'s king.
    pub fn find_king(&self, side: Side) -> Option<Square> {
        Square::all().find(|&sq| self.cell(sq).is(Piece::King, side))
    }

    /// Re-derives both cached king squares from the board.
    pub fn refresh_king_cache(&mut self) {
        self.white_king = self.find_king(Side::White);
        self.black_king = self.find_king(Side::Black);
    }

    /// Cached king square of `side`.
    pub fn king_square(&self, side: Side) -> miette::Result<Square> {
        let king = match side {
            Side::White => self.white_king,
            Side::Black => self.black_king,
        };
        king.ok_or_else(|| miette::miette!("No {side} king on the board"))
    }

    #[inline(always)]
    fn set_king(&mut self, side: Side, square: Option<Square>) {
        match side {
            Side::White => self.white_king = square,
            Side::Black => self.black_king = square,
        }
    }

    pub const fn piece_list(&self) -> &[Option<Square>; PIECE_LIST_CAPACITY] {
        &self.piece_list
    }

    /// Piece-list slot of the piece standing on `square`.
    pub fn find_piece(&self, square: Square) -> Option<usize> {
        self.piece_list.iter().position(|&slot| slot == Some(square))
    }

    pub const fn can_castle(&self, side: Side, kingside: bool) -> bool {
        self.castling_rights.can_castle(side, kingside)
    }

    /// Applies a move generated for this exact position.
    ///
    /// No validation happens here: a move from another position is a caller
    /// bug. The en passant square is always cleared first and only set again
    /// by a double push. Castling rights are narrowed by the per-square mask
    /// of both squares, the king cache follows a moving or captured king and
    /// the piece list is updated in step with the cells.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(
            self.cell(mv.from).belongs_to(self.stm),
            "[apply_move] {mv} does not start on a {} piece",
            self.stm
        );
        let (from, to) = (mv.from, mv.to);
        self.enpassant_square = None;

        let moving = self.cells[from.index()];
        let captured = self.cells[to.index()];

        if captured.piece().is_some() {
            if let Some(slot) = self.find_piece(to) {
                self.piece_list[slot] = None;
            }
        }
        if let Some(slot) = self.find_piece(from) {
            self.piece_list[slot] = Some(to);
        }

        self.cells[to.index()] = moving;
        self.cells[from.index()] = Cell::EMPTY;

        if mv.kind == MoveKind::DoublePawnPush {
            self.enpassant_square = Some(from.offset(self.stm.pawn_push()));
        }

        self.castling_rights
            .restrict(CASTLE_TABLES.mask(from) & CASTLE_TABLES.mask(to));

        if let Some((Piece::King, side)) = captured.piece_info() {
            self.set_king(side, None);
        }
        if let Some((Piece::King, side)) = moving.piece_info() {
            self.set_king(side, Some(to));
        }

        self.stm = self.stm.flip();
    }

    /// True when the side that just moved left its own king attacked, or
    /// has no king at all.
    pub fn leaves_mover_in_check(&self) -> bool {
        let mover = self.stm.flip();
        match self.king_square(mover) {
            Ok(king) => attacks::square_is_attacked(self, king, self.stm),
            Err(_) => true,
        }
    }

    pub fn is_square_attacked(&self, square: Square, by: Side) -> bool {
        attacks::square_is_attacked(self, square, by)
    }

    pub fn generate_moves(&self) -> Vec<Move> {
        move_gen::generate_moves(self)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        move_gen::legal_moves(self)
    }

    /// Eight newline terminated lines, rank 8 first. `.` marks an empty
    /// square, uppercase letters white pieces and lowercase black ones.
    pub fn to_grid(&self) -> String {
        let mut out = String::with_capacity(8 * 9);
        for rank in (0..8).rev() {
            for file in 0..8 {
                if let Some(c) = self.cells[to_index(file, rank)].symbol() {
                    out.push(c);
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        for (i, line) in self.to_grid().lines().enumerate() {
            writeln!(out, "{} {line}", 8 - i)?;
        }
        writeln!(out, "  abcdefgh")?;
        let ep = self
            .enpassant_square
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        write!(
            out,
            "Side to move: {}, castling: {}, en passant: {ep}",
            self.stm, self.castling_rights
        )?;
        write!(f, "{out}")
    }
}
