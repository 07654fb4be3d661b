use miette::Context;

use crate::prelude::*;

/// Decodes a position record of at least four space separated fields:
/// piece placement, active colour, castling rights and en passant square.
/// Move clocks, when present, are ignored.
///
/// Placement is read rank 8 first. Digits skip that many empty files and
/// letters place pieces, uppercase for white and lowercase for black. Every
/// rank must account for exactly eight files.
///
/// An unreadable en passant field is not an error, it just means there is
/// no target square.
pub fn parse_fen(fen: &str) -> miette::Result<Board> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    miette::ensure!(
        parts.len() >= 4,
        "Not enough segments in FEN string '{fen}'. Expected at least 4, found {}",
        parts.len()
    );

    let mut board = Board::empty();
    let piece_placement = parts[0];
    place_pieces(&mut board, piece_placement)
        .with_context(|| format!("Placing pieces with given fen string {piece_placement}"))?;
    let stm = parts[1];
    board.stm = parse_stm(stm).with_context(|| format!("parsed stm input: {stm}"))?;
    let castle = parts[2];
    board.castling_rights =
        parse_castle(castle).with_context(|| format!("parsed input castle: {castle}"))?;
    board.enpassant_square = parse_enpassant(parts[3]);
    board.refresh_king_cache();

    trace!("Parsed FEN '{fen}'");
    Ok(board)
}

fn place_pieces(board: &mut Board, placement: &str) -> miette::Result<()> {
    let mut rank = 7usize;
    let mut file = 0usize;
    for c in placement.chars() {
        match c {
            '1'..='8' => {
                file += c as usize - '0' as usize;
                miette::ensure!(file <= 8, "Rank {} has more than 8 files", rank + 1);
            }
            '/' => {
                miette::ensure!(
                    file == 8,
                    "Rank {} describes {file} files, expected 8",
                    rank + 1
                );
                miette::ensure!(rank > 0, "Placement describes more than 8 ranks");
                rank -= 1;
                file = 0;
            }
            _ => {
                let (piece, side) = Piece::from_char(c)
                    .with_context(|| format!("Unexpected character '{c}' in board data"))?;
                let square = Square::from_coords(file, rank)
                    .with_context(|| format!("Rank {} has more than 8 files", rank + 1))?;
                board.place(piece, side, square)?;
                file += 1;
            }
        }
    }
    miette::ensure!(
        rank == 0 && file == 8,
        "Placement ended early at rank {}, file {}",
        rank + 1,
        file + 1
    );
    Ok(())
}

fn parse_stm(stm: &str) -> miette::Result<Side> {
    match stm {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        _ => miette::bail!("Unexpected character for active colour"),
    }
}

fn parse_castle(castle: &str) -> miette::Result<CastlingRights> {
    let mut res = CastlingRights::NO_CASTLING;
    for c in castle.chars() {
        match c {
            'K' => res |= CastlingRights::WHITE_00,
            'Q' => res |= CastlingRights::WHITE_000,
            'k' => res |= CastlingRights::BLACK_00,
            'q' => res |= CastlingRights::BLACK_000,
            '-' => res = CastlingRights::NO_CASTLING,
            _ => miette::bail!("Unexpected character '{c}' while parsing CastlingRights"),
        };
    }
    Ok(CastlingRights(res))
}

fn parse_enpassant(enpassant: &str) -> Option<Square> {
    if enpassant == "-" {
        return None;
    }
    match enpassant.parse::<Square>() {
        Ok(square) => Some(square),
        Err(e) => {
            debug!("Ignoring en passant field '{enpassant}': {e}");
            None
        }
    }
}

impl Board {
    /// Encodes the position as FEN. Move clocks are not tracked and are
    /// always written as `0 1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let Some(square) = Square::from_coords(file, rank) else {
                    continue;
                };
                match self.piece_at(square) {
                    Some((piece, side)) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_char(side));
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }

            if rank > 0 {
                fen.push('/');
            }
        }

        let stm = match self.stm {
            Side::White => 'w',
            Side::Black => 'b',
        };
        let ep = self
            .enpassant_square
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        format!("{fen} {stm} {} {ep} 0 1", self.castling_rights)
    }
}
