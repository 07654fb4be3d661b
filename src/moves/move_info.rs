use std::fmt::Display;

use crate::{Piece, Square};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    #[default]
    Quiet,
    DoublePawnPush,
    Capture,
}

impl Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveKind::Quiet => write!(f, "quiet"),
            MoveKind::DoublePawnPush => write!(f, "double push"),
            MoveKind::Capture => write!(f, "capture"),
        }
    }
}

/// A generated move. Carries no reference to the board it came from, so it
/// is only meaningful against that same position.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub promotion: Option<Piece>,
    /// Scratch space for move ordering. Generation always leaves it at 0.
    pub score: i16,
}

impl Move {
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            kind,
            promotion: None,
            score: 0,
        }
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture)
    }

    #[inline(always)]
    pub const fn is_double_push(&self) -> bool {
        matches!(self.kind, MoveKind::DoublePawnPush)
    }

    /// Coordinate text, e.g. `e2e4`.
    pub fn uci(&self) -> String {
        self.to_string()
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char(crate::Side::Black))?;
        }
        Ok(())
    }
}
