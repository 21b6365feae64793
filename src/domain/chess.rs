//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::Deserialize;
use shakmaty::{Color as SColor, Role};

use crate::error::RulesError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Standard material value used for the captured-pieces balance
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Rank index (0-7) a pawn of this color promotes on
    pub fn promotion_rank(self) -> u8 {
        match self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Unicode glyph used by the board and the captured-pieces panel
    pub fn glyph(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::King, PieceColor::White) => "♔",
            (PieceKind::Queen, PieceColor::White) => "♕",
            (PieceKind::Rook, PieceColor::White) => "♖",
            (PieceKind::Bishop, PieceColor::White) => "♗",
            (PieceKind::Knight, PieceColor::White) => "♘",
            (PieceKind::Pawn, PieceColor::White) => "♙",
            (PieceKind::King, PieceColor::Black) => "♚",
            (PieceKind::Queen, PieceColor::Black) => "♛",
            (PieceKind::Rook, PieceColor::Black) => "♜",
            (PieceKind::Bishop, PieceColor::Black) => "♝",
            (PieceKind::Knight, PieceColor::Black) => "♞",
            (PieceKind::Pawn, PieceColor::Black) => "♟",
        }
    }
}

/// Piece a pawn may promote to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PromotionKind {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionKind {
    /// Dialog order
    pub const ALL: [PromotionKind; 4] = [
        PromotionKind::Queen,
        PromotionKind::Rook,
        PromotionKind::Bishop,
        PromotionKind::Knight,
    ];

    pub fn piece_kind(self) -> PieceKind {
        match self {
            PromotionKind::Queen => PieceKind::Queen,
            PromotionKind::Rook => PieceKind::Rook,
            PromotionKind::Bishop => PieceKind::Bishop,
            PromotionKind::Knight => PieceKind::Knight,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PromotionKind::Queen => "Queen",
            PromotionKind::Rook => "Rook",
            PromotionKind::Bishop => "Bishop",
            PromotionKind::Knight => "Knight",
        }
    }
}

/// A board coordinate, a1 = index 0 through h8 = index 63
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square(u8);

impl Square {
    /// Create a square from file (0-7, a-h) and rank (0-7, 1-8)
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self(rank * 8 + file))
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Convert row/col (0-indexed, row 0 = rank 8) to a square
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 {
            Self::new(col as u8, 7 - row as u8)
        } else {
            None
        }
    }

    /// All 64 squares, a1 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(RulesError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| RulesError::InvalidSquare(s.to_string()))
    }
}

impl From<shakmaty::Square> for Square {
    fn from(sq: shakmaty::Square) -> Self {
        Self(sq as u8)
    }
}

impl From<Square> for shakmaty::Square {
    fn from(sq: Square) -> Self {
        // index is always 0-63
        shakmaty::Square::new(u32::from(sq.0))
    }
}

impl From<Role> for PieceKind {
    fn from(role: Role) -> Self {
        match role {
            Role::Pawn => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook => PieceKind::Rook,
            Role::Queen => PieceKind::Queen,
            Role::King => PieceKind::King,
        }
    }
}

impl From<PromotionKind> for Role {
    fn from(kind: PromotionKind) -> Self {
        match kind {
            PromotionKind::Queen => Role::Queen,
            PromotionKind::Rook => Role::Rook,
            PromotionKind::Bishop => Role::Bishop,
            PromotionKind::Knight => Role::Knight,
        }
    }
}

impl From<SColor> for PieceColor {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => PieceColor::White,
            SColor::Black => PieceColor::Black,
        }
    }
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    Piece {
        kind: piece.role.into(),
        color: piece.color.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_parse_and_display() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq.file(), 4);
        assert_eq!(sq.rank(), 3);
        assert_eq!(sq.to_string(), "e4");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
    }

    #[test]
    fn test_row_col_mapping() {
        assert_eq!(Square::from_row_col(0, 0).unwrap().to_string(), "a8");
        assert_eq!(Square::from_row_col(7, 7).unwrap().to_string(), "h1");
        assert!(Square::from_row_col(8, 0).is_none());
    }

    #[test]
    fn test_shakmaty_square_roundtrip() {
        let sq: Square = "g7".parse().unwrap();
        let s: shakmaty::Square = sq.into();
        assert_eq!(s, shakmaty::Square::G7);
        assert_eq!(Square::from(s), sq);
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(PieceKind::Pawn.value(), 1);
        assert_eq!(PieceKind::Knight.value(), 3);
        assert_eq!(PieceKind::Bishop.value(), 3);
        assert_eq!(PieceKind::Rook.value(), 5);
        assert_eq!(PieceKind::Queen.value(), 9);
        assert_eq!(PieceKind::King.value(), 0);
    }
}
