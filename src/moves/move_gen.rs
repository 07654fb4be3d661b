//! Pseudo-legal move generation
//!
//! Moves obey each piece's movement rules but are not checked for leaving
//! the mover's own king attacked. [`legal_moves`] runs that check as a
//! post-pass over a board copy per move.

use crate::{
    Board, MAX_MOVES, Piece, Square,
    moves::{
        Direction,
        move_info::{Move, MoveKind},
        piece_vectors,
    },
};

/// All pseudo-legal moves for the side to move, in board-scan order (a1 to
/// h8), then direction-table order, then ray distance.
pub fn generate_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(MAX_MOVES);
    generate_moves_into(board, &mut moves);
    moves
}

/// Same as [`generate_moves`] but appends to a caller supplied buffer.
pub fn generate_moves_into(board: &Board, moves: &mut Vec<Move>) {
    let side = board.stm;
    for from in Square::all() {
        let Some((piece, owner)) = board.piece_at(from) else {
            continue;
        };
        if owner != side {
            continue;
        }
        match piece {
            Piece::Pawn => gen_pawn_moves(board, from, moves),
            _ => gen_piece_moves(board, from, piece, moves),
        }
    }
}

/// Pushes, double pushes from the starting rank, and diagonal captures.
/// En passant captures and promotions are not produced.
pub fn gen_pawn_moves(board: &Board, from: Square, moves: &mut Vec<Move>) {
    let side = board.stm;
    let push = side.pawn_push();
    let single = from.offset(push);

    // `Cell::is_empty` is false for padding, so a pawn on its last rank
    // never pushes off the board.
    if board.cell(single).is_empty() {
        moves.push(Move::new(from, single, MoveKind::Quiet));

        let double = single.offset(push);
        if from.rank() == side.pawn_start_rank() && board.cell(double).is_empty() {
            moves.push(Move::new(from, double, MoveKind::DoublePawnPush));
        }
    }

    for flank in [Direction::WEST, Direction::EAST] {
        let target = single.offset(flank);
        if board.cell(target).belongs_to(side.flip()) {
            moves.push(Move::new(from, target, MoveKind::Capture));
        }
    }
}

/// Knights, bishops, rooks, queens and kings. Sliders keep walking over
/// empty squares; leapers take a single step per direction.
pub fn gen_piece_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let enemy = board.stm.flip();
    for dir in piece_vectors(piece) {
        let mut to = from;
        loop {
            to = to.offset(dir);
            let cell = board.cell(to);
            if cell.is_empty() {
                moves.push(Move::new(from, to, MoveKind::Quiet));
                if piece.slides() {
                    continue;
                }
            } else if cell.belongs_to(enemy) {
                moves.push(Move::new(from, to, MoveKind::Capture));
            }
            // own piece, padding, or a leaper's single step
            break;
        }
    }
}

/// Generated moves that do not leave the mover's king attacked.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    generate_moves(board)
        .into_iter()
        .filter(|&mv| {
            let mut next = *board;
            next.apply_move(mv);
            !next.leaves_mover_in_check()
        })
        .collect()
}
