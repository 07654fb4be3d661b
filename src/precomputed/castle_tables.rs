use crate::prelude::*;

#[derive(Debug)]
pub struct CastleTables {
    /// Rights that survive a move touching a square. `0b1111` everywhere
    /// except the king and rook home squares.
    ///
    /// *Index: \[grid_index\] -> castling rights mask*
    pub rights_mask: [u8; GRID_SIZE],
}

pub const CASTLE_TABLES: CastleTables = CastleTables::new();

impl Default for CastleTables {
    fn default() -> Self {
        Self::new()
    }
}

impl CastleTables {
    pub const fn new() -> Self {
        let mut tables = Self {
            rights_mask: [CastlingRights::RIGHTS_MASK; GRID_SIZE],
        };
        tables.init_rights_mask();
        tables
    }

    const fn init_rights_mask(&mut self) {
        // (file, rank, rights lost when the square is vacated or captured on)
        const HOME_SQUARES: [(usize, usize, u8); 6] = [
            (0, 0, CastlingRights::WHITE_000),
            (7, 0, CastlingRights::WHITE_00),
            (4, 0, CastlingRights::WHITE_00 | CastlingRights::WHITE_000),
            (0, 7, CastlingRights::BLACK_000),
            (7, 7, CastlingRights::BLACK_00),
            (4, 7, CastlingRights::BLACK_00 | CastlingRights::BLACK_000),
        ];
        let mut i = 0;
        while i < HOME_SQUARES.len() {
            let (file, rank, lost) = HOME_SQUARES[i];
            self.rights_mask[to_index(file, rank)] ^= lost;
            i += 1;
        }
    }

    #[inline(always)]
    pub const fn mask(&self, square: Square) -> u8 {
        self.rights_mask[square.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rights_mask_home_squares() {
        let sq = |s: &str| s.parse::<Square>().unwrap();
        assert_eq!(CASTLE_TABLES.mask(sq("a1")), 0b1101);
        assert_eq!(CASTLE_TABLES.mask(sq("h1")), 0b1110);
        assert_eq!(CASTLE_TABLES.mask(sq("e1")), 0b1100);
        assert_eq!(CASTLE_TABLES.mask(sq("a8")), 0b0111);
        assert_eq!(CASTLE_TABLES.mask(sq("h8")), 0b1011);
        assert_eq!(CASTLE_TABLES.mask(sq("e8")), 0b0011);
    }

    #[test]
    fn test_rights_mask_elsewhere_keeps_everything() {
        let homes = ["a1", "h1", "e1", "a8", "h8", "e8"];
        for square in Square::all() {
            if homes.contains(&square.to_string().as_str()) {
                continue;
            }
            assert_eq!(
                CASTLE_TABLES.mask(square),
                CastlingRights::RIGHTS_MASK,
                "unexpected mask on {square}"
            );
        }
    }
}
