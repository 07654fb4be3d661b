use crate::{
    Board, Piece, Side, Square,
    moves::{Direction, piece_vectors},
};

/// Whether any piece of `by` could move onto `square` in one step. Pins on
/// the attacker are ignored and the first piece met along a ray blocks
/// everything behind it.
pub fn square_is_attacked(board: &Board, square: Square, by: Side) -> bool {
    // An attacking pawn stands one rank behind the target, seen from the
    // direction `by` pushes.
    let behind = square.offset(-by.pawn_push());
    for flank in [Direction::WEST, Direction::EAST] {
        if board.cell(behind.offset(flank)).is(Piece::Pawn, by) {
            return true;
        }
    }

    for dir in Direction::KNIGHT {
        if board.cell(square.offset(dir)).is(Piece::Knight, by) {
            return true;
        }
    }

    for dir in piece_vectors(Piece::Queen) {
        let mut to = square;
        let mut distance = 0;
        loop {
            to = to.offset(dir);
            distance += 1;
            let cell = board.cell(to);
            if cell.is_empty() {
                continue;
            }
            match cell.piece_info() {
                Some((piece, side)) if side == by && attacks_along(piece, dir, distance) => {
                    return true;
                }
                _ => break,
            }
        }
    }

    false
}

/// Whether `piece` reaches a square `distance` steps away along `dir`.
#[inline(always)]
const fn attacks_along(piece: Piece, dir: i8, distance: u8) -> bool {
    match piece {
        Piece::Queen => true,
        Piece::Rook => Direction::is_ortho(dir),
        Piece::Bishop => Direction::is_diag(dir),
        Piece::King => distance == 1,
        // pawns and knights are covered by the direct checks above
        Piece::Pawn | Piece::Knight => false,
    }
}

/// Whether `side`'s king is attacked. A side without a king counts as in
/// check.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    match board.king_square(side) {
        Ok(king) => square_is_attacked(board, king, side.flip()),
        Err(_) => true,
    }
}
