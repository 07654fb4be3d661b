use std::{
    fmt::Display,
    ops::{BitOr, Not},
    str::FromStr,
};

use miette::Context;

use crate::prelude::*;

/// Number of cells in the padded 10x12 grid.
pub const GRID_SIZE: usize = 120;
/// Grid index of a1, the lowest playable cell.
pub const A1: usize = 21;
/// Grid index of h8, the highest playable cell.
pub const H8: usize = 98;

/// Maps a zero based file/rank pair to its grid index.
#[inline(always)]
pub const fn to_index(file: usize, rank: usize) -> usize {
    A1 + 10 * rank + file
}

/// True iff `index` is one of the 64 playable cells of the grid.
/// Columns 0 and 9 of every row are padding, as are the two rows above
/// and below the board.
#[inline(always)]
pub const fn on_board(index: usize) -> bool {
    index >= A1 && index <= H8 && index % 10 != 0 && index % 10 != 9
}

#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        self.flip()
    }
}

impl FromStr for Side {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Side::White),
            "b" | "black" => Ok(Side::Black),
            _ => miette::bail!("Unknown side '{s}', expected 'white' or 'black'"),
        }
    }
}

impl Side {
    pub const SIDES: [Side; 2] = [Side::White, Side::Black];

    pub const fn flip(&self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Grid step of a single pawn push for this side.
    #[inline(always)]
    pub const fn pawn_push(&self) -> i8 {
        match self {
            Side::White => Direction::NORTH,
            Side::Black => Direction::SOUTH,
        }
    }

    /// Zero based rank from which this side's pawns may double push.
    #[inline(always)]
    pub const fn pawn_start_rank(&self) -> usize {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    #[inline(always)]
    const fn color_bit(&self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => Cell::BLACK,
        }
    }
}

#[derive(Default, PartialEq, Eq, Debug, PartialOrd, Clone, Copy, Hash)]
pub enum Piece {
    #[default]
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Piece::Pawn => write!(f, "Pawn"),
            Piece::Knight => write!(f, "Knight"),
            Piece::Bishop => write!(f, "Bishop"),
            Piece::Rook => write!(f, "Rook"),
            Piece::Queen => write!(f, "Queen"),
            Piece::King => write!(f, "King"),
        }
    }
}

impl Piece {
    pub const PIECES: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    pub const PIECE_CHARS: [[char; 6]; 2] = [
        ['P', 'N', 'B', 'R', 'Q', 'K'], // White
        ['p', 'n', 'b', 'r', 'q', 'k'], // Black
    ];

    #[inline(always)]
    pub const fn index(&self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    /// Three bit kind stored in a [`Cell`]. Zero is reserved for "no piece".
    #[inline(always)]
    pub const fn code(&self) -> u8 {
        self.index() as u8 + 1
    }

    #[inline(always)]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Piece::Pawn),
            2 => Some(Piece::Knight),
            3 => Some(Piece::Bishop),
            4 => Some(Piece::Rook),
            5 => Some(Piece::Queen),
            6 => Some(Piece::King),
            _ => None,
        }
    }

    /// Bishops, rooks and queens keep walking along a ray until blocked.
    #[inline(always)]
    pub const fn slides(&self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    pub const fn to_char(&self, side: Side) -> char {
        Self::PIECE_CHARS[side.index()][self.index()]
    }

    /// Parses a placement letter, uppercase for white and lowercase for black.
    pub fn from_char(c: char) -> Option<(Piece, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let piece = match c.to_ascii_uppercase() {
            'P' => Piece::Pawn,
            'N' => Piece::Knight,
            'B' => Piece::Bishop,
            'R' => Piece::Rook,
            'Q' => Piece::Queen,
            'K' => Piece::King,
            _ => return None,
        };
        Some((piece, side))
    }
}

/// Content of one grid cell, packed into a byte:
/// ```text
/// Bit: 7 6 5 4 3 2 1 0
///      - - - X C P P P
///            | | +-+-+-- piece kind (0 = none, 1..=6 pawn..king)
///            | +-------- colour (set = black)
///            +---------- off-board flag
/// ```
/// The off-board flag is only ever set on padding cells, so a sentinel can
/// never be mistaken for a piece.
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy)]
#[repr(transparent)]
pub struct Cell(u8);

impl Cell {
    pub const PIECE_MASK: u8 = 0x07;
    pub const BLACK: u8 = 0x08;
    pub const OFF_BOARD_FLAG: u8 = 0x10;

    /// Playable square holding nothing.
    pub const EMPTY: Cell = Cell(0);
    /// Padding sentinel.
    pub const OFF_BOARD: Cell = Cell(Self::OFF_BOARD_FLAG);

    #[inline(always)]
    pub const fn new(piece: Piece, side: Side) -> Self {
        Self(piece.code() | side.color_bit())
    }

    #[inline(always)]
    pub const fn is_off_board(&self) -> bool {
        self.0 & Self::OFF_BOARD_FLAG != 0
    }

    /// On the board and holding no piece.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == Self::EMPTY.0
    }

    #[inline(always)]
    pub const fn piece(&self) -> Option<Piece> {
        if self.is_off_board() {
            return None;
        }
        Piece::from_code(self.0 & Self::PIECE_MASK)
    }

    /// Colour of the occupant. `None` for empty and padding cells, where the
    /// colour bit carries no meaning.
    #[inline(always)]
    pub const fn side(&self) -> Option<Side> {
        if self.piece().is_none() {
            return None;
        }
        if self.0 & Self::BLACK != 0 {
            Some(Side::Black)
        } else {
            Some(Side::White)
        }
    }

    #[inline(always)]
    pub const fn piece_info(&self) -> Option<(Piece, Side)> {
        match (self.piece(), self.side()) {
            (Some(piece), Some(side)) => Some((piece, side)),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn belongs_to(&self, side: Side) -> bool {
        match self.side() {
            Some(s) => s.index() == side.index(),
            None => false,
        }
    }

    #[inline(always)]
    pub const fn is(&self, piece: Piece, side: Side) -> bool {
        self.0 == Cell::new(piece, side).0
    }

    #[inline(always)]
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Single grid character: `.` for empty, piece letter otherwise,
    /// nothing for padding.
    pub fn symbol(&self) -> Option<char> {
        if self.is_off_board() {
            return None;
        }
        Some(match self.piece_info() {
            Some((piece, side)) => piece.to_char(side),
            None => '.',
        })
    }
}

/// Castling rights are stored in the low nibble of a [`u8`]:
/// ```text
/// Bit: 3 2 1 0
///      q k Q K
///      | | | +-- White kingside right
///      | | +---- White queenside right
///      | +------ Black kingside right
///      +-------- Black queenside right
/// ```
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
#[repr(transparent)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NO_CASTLING: u8 = 0;
    /// White King side castling
    pub const WHITE_00: u8 = 0b0001;
    /// White Queen side castling
    pub const WHITE_000: u8 = 0b0010;
    /// Black King side castling
    pub const BLACK_00: u8 = 0b0100;
    /// Black Queen side castling
    pub const BLACK_000: u8 = 0b1000;

    pub const WHITE_CASTLING: Self = Self(Self::WHITE_00 | Self::WHITE_000);
    pub const BLACK_CASTLING: Self = Self(Self::BLACK_00 | Self::BLACK_000);
    pub const ANY_CASTLING: Self = Self(Self::BLACK_CASTLING.0 | Self::WHITE_CASTLING.0);
    pub const RIGHTS_MASK: u8 = 0b1111;

    #[inline(always)]
    pub const fn all() -> Self {
        Self::ANY_CASTLING
    }
    #[inline(always)]
    pub const fn empty() -> Self {
        Self(Self::NO_CASTLING)
    }
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 & Self::RIGHTS_MASK == 0
    }
    #[inline(always)]
    pub const fn allows(&self, rights: CastlingRights) -> bool {
        self.0 & rights.0 != Self::NO_CASTLING
    }
    #[inline(always)]
    pub const fn add_right(&mut self, rights: CastlingRights) {
        self.0 |= rights.0;
    }
    #[inline(always)]
    pub const fn remove_right(&mut self, rights: &CastlingRights) {
        self.0 &= !rights.0
    }
    /// Keeps only the rights present in `mask`. Rights can be cleared this
    /// way but never granted.
    #[inline(always)]
    pub const fn restrict(&mut self, mask: u8) {
        self.0 &= mask;
    }
    #[inline(always)]
    pub const fn can_castle(&self, side: Side, kingside: bool) -> bool {
        match (side, kingside) {
            (Side::White, true) => self.allows(CastlingRights(CastlingRights::WHITE_00)),
            (Side::White, false) => self.allows(CastlingRights(CastlingRights::WHITE_000)),
            (Side::Black, true) => self.allows(CastlingRights(CastlingRights::BLACK_00)),
            (Side::Black, false) => self.allows(CastlingRights(CastlingRights::BLACK_000)),
        }
    }
}

impl BitOr<CastlingRights> for CastlingRights {
    type Output = CastlingRights;

    fn bitor(self, rhs: CastlingRights) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.allows(Self(Self::WHITE_00)) {
            write!(f, "K")?;
        }
        if self.allows(Self(Self::WHITE_000)) {
            write!(f, "Q")?;
        }
        if self.allows(Self(Self::BLACK_00)) {
            write!(f, "k")?;
        }
        if self.allows(Self(Self::BLACK_000)) {
            write!(f, "q")?;
        }
        if self.is_empty() {
            write!(f, "-")?;
        }
        Ok(())
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::empty()
    }
}

/// Index of a cell in the padded 10x12 grid.
/// # Representation
/// ```text
///     0   1   2   3   4   5   6   7   8   9
///   +---------------------------------------
///   | X   X   X   X   X   X   X   X   X   X   <- 0..=9
///   | X   X   X   X   X   X   X   X   X   X   <- 10..=19
///   | X  a1  b1  c1  d1  e1  f1  g1  h1   X   <- 20..=29
///   | ...
///   | X  a8  b8  c8  d8  e8  f8  g8  h8   X   <- 90..=99
///   | X   X   X   X   X   X   X   X   X   X   <- 100..=109
///   | X   X   X   X   X   X   X   X   X   X   <- 110..=119
/// ```
/// Two padding rows at each end keep a knight jump from any playable cell
/// inside the grid.
#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Returns the Square for a playable grid index, None for padding or out
    /// of range indices.
    #[inline(always)]
    pub const fn new(index: usize) -> Option<Self> {
        if on_board(index) {
            return Some(Self(index as u8));
        }
        None
    }

    /// Returns a Square from a zero based file and rank.
    /// Will return None if either File or Rank are out of bounds.
    #[inline(always)]
    pub const fn from_coords(file: usize, rank: usize) -> Option<Self> {
        if file < 8 && rank < 8 {
            return Some(Square(to_index(file, rank) as u8));
        }
        None
    }

    /// Neighbouring grid cell `dir` steps away. The result may be a padding
    /// cell; check [`Square::is_on_board`] before using it as a square.
    #[inline(always)]
    pub const fn offset(&self, dir: i8) -> Square {
        Self(self.0.wrapping_add_signed(dir))
    }

    #[inline(always)]
    pub const fn is_on_board(&self) -> bool {
        on_board(self.0 as usize)
    }

    /// Zero based (file, rank).
    #[inline(always)]
    pub const fn coords(&self) -> (usize, usize) {
        let file = (self.0 % 10) as usize - 1;
        let rank = (self.0 / 10) as usize - 2;
        (file, rank)
    }

    #[inline(always)]
    pub const fn file(&self) -> usize {
        self.coords().0
    }

    #[inline(always)]
    pub const fn rank(&self) -> usize {
        self.coords().1
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// All 64 playable squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (A1..=H8).filter_map(Square::new)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.index()
    }
}

impl TryFrom<String> for Square {
    type Error = miette::Report;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Square::from_str(&value)
    }
}

impl FromStr for Square {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        miette::ensure!(
            s.len() == 2,
            "Square '{s}' needs 1 letter and 1 number to construct"
        );
        let mut iter = s.chars();
        let letter = iter.next().context("1st char should be a file letter")?;
        let num = iter.next().context("2nd char should be a rank digit")?;
        miette::ensure!(
            ('a'..='h').contains(&letter),
            "Square '{s}' has invalid file. Valid file = ['a'..='h']"
        );
        miette::ensure!(
            ('1'..='8').contains(&num),
            "Square '{s}' has invalid rank. Valid rank = ['1'..='8']"
        );
        let file = (letter as u8 - b'a') as usize;
        let rank = (num as u8 - b'1') as usize;

        Square::from_coords(file, rank).with_context(|| format!("Square '{s}' is off the board"))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_on_board() {
            return write!(f, "--");
        }
        let (file, rank) = self.coords();
        write!(f, "{}{}", (b'a' + file as u8) as char, rank + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_board_matches_manual_enumeration() {
        let mut manual = [false; GRID_SIZE];
        for rank in 0..8 {
            for file in 0..8 {
                manual[to_index(file, rank)] = true;
            }
        }
        for (index, expected) in manual.iter().enumerate() {
            assert_eq!(
                on_board(index),
                *expected,
                "on_board disagrees with enumeration at grid index {index}"
            );
        }
        assert_eq!(manual.iter().filter(|&&b| b).count(), 64);
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_to_index_corners() {
        assert_eq!(to_index(0, 0), A1);
        assert_eq!(to_index(7, 7), H8);
        assert_eq!(to_index(7, 0), 28);
        assert_eq!(to_index(0, 7), 91);
    }

    #[test]
    fn test_display_square() {
        assert_eq!(format!("{}", Square::from_coords(0, 0).unwrap()), "a1");
        assert_eq!(format!("{}", Square::from_coords(7, 0).unwrap()), "h1");
        assert_eq!(format!("{}", Square::from_coords(3, 1).unwrap()), "d2");
        assert_eq!(format!("{}", Square::from_coords(4, 3).unwrap()), "e4");
        assert_eq!(format!("{}", Square::from_coords(7, 7).unwrap()), "h8");
        assert_eq!(format!("{}", Square::from_coords(0, 0).unwrap().offset(-1)), "--");
    }

    #[test]
    fn test_square_text_bijection() {
        for square in Square::all() {
            let text = square.to_string();
            assert_eq!(Square::from_str(&text).unwrap(), square, "round trip of {text}");
        }
    }

    #[test]
    fn test_square_from_str_rejects_bad_input() {
        assert!(Square::from_str("e").is_err());
        assert!(Square::from_str("e44").is_err());
        assert!(Square::from_str("i4").is_err());
        assert!(Square::from_str("e9").is_err());
        assert!(Square::from_str("e0").is_err());
        assert!(Square::from_str("").is_err());
    }

    #[test]
    fn test_cell_encoding() {
        let black_knight = Cell::new(Piece::Knight, Side::Black);
        assert_eq!(black_knight.raw(), 0x0A);
        assert_eq!(black_knight.piece_info(), Some((Piece::Knight, Side::Black)));
        assert!(black_knight.belongs_to(Side::Black));
        assert!(!black_knight.belongs_to(Side::White));

        assert!(Cell::EMPTY.is_empty());
        assert_eq!(Cell::EMPTY.side(), None);
        assert_eq!(Cell::EMPTY.symbol(), Some('.'));

        assert!(Cell::OFF_BOARD.is_off_board());
        assert!(!Cell::OFF_BOARD.is_empty());
        assert_eq!(Cell::OFF_BOARD.piece(), None);
        assert_eq!(Cell::OFF_BOARD.symbol(), None);

        for piece in Piece::PIECES {
            for side in Side::SIDES {
                let cell = Cell::new(piece, side);
                assert!(!cell.is_off_board());
                assert!(cell.is(piece, side));
            }
        }
    }

    #[test]
    fn test_castling_rights_display() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::empty().to_string(), "-");
        let mut rights = CastlingRights::all();
        rights.remove_right(&CastlingRights::WHITE_CASTLING);
        assert_eq!(rights.to_string(), "kq");
        assert!(rights.can_castle(Side::Black, true));
        assert!(!rights.can_castle(Side::White, false));
    }
}
