use crate::Piece;

pub mod attacks;
pub mod move_gen;
pub mod move_info;


/// Grid steps on the 10x12 board. One rank is ten cells apart.
///  (N, S, W, E, NE, SE, SW, NW)
pub struct Direction;
impl Direction {
    pub const NORTH: i8 = 10;
    pub const SOUTH: i8 = -10;
    pub const WEST: i8 = -1;
    pub const EAST: i8 = 1;
    pub const NORTHEAST: i8 = 11;
    pub const NORTHWEST: i8 = 9;
    pub const SOUTHEAST: i8 = -9;
    pub const SOUTHWEST: i8 = -11;

    pub const ORTHO: [i8; 4] = [Self::NORTH, Self::EAST, Self::SOUTH, Self::WEST];
    pub const DIAG: [i8; 4] = [
        Self::NORTHEAST,
        Self::SOUTHEAST,
        Self::SOUTHWEST,
        Self::NORTHWEST,
    ];
    pub const KNIGHT: [i8; 8] = [21, 12, -8, -19, -21, -12, 8, 19];

    #[inline(always)]
    pub const fn is_ortho(dir: i8) -> bool {
        matches!(dir, Self::NORTH | Self::SOUTH | Self::EAST | Self::WEST)
    }

    #[inline(always)]
    pub const fn is_diag(dir: i8) -> bool {
        matches!(
            dir,
            Self::NORTHEAST | Self::NORTHWEST | Self::SOUTHEAST | Self::SOUTHWEST
        )
    }
}

/// Step vectors per piece, zero padded to eight entries. Iteration stops at
/// the first zero. Pawns are generated separately and have no entries.
///
/// *Index: \[Piece::index()\] -> steps*
pub const PIECE_VECTORS: [[i8; 8]; 6] = [
    [0; 8],
    Direction::KNIGHT,
    [11, -9, -11, 9, 0, 0, 0, 0],
    [10, 1, -10, -1, 0, 0, 0, 0],
    [10, 11, 1, -9, -10, -11, -1, 9],
    [10, 11, 1, -9, -10, -11, -1, 9],
];

/// Non-zero steps of `piece`, in table order.
#[inline(always)]
pub fn piece_vectors(piece: Piece) -> impl Iterator<Item = i8> {
    PIECE_VECTORS[piece.index()]
        .into_iter()
        .take_while(|&dir| dir != 0)
}
