//! Captured pieces and the material balance derived from them.

use crate::domain::{PieceColor, PieceKind};

/// Pieces taken by each side during one game
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    /// Black pieces taken by white
    white: Vec<PieceKind>,
    /// White pieces taken by black
    black: Vec<PieceKind>,
}

impl CapturedPieces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `capturer` took a piece of kind `kind`
    pub fn record(&mut self, capturer: PieceColor, kind: PieceKind) {
        match capturer {
            PieceColor::White => self.white.push(kind),
            PieceColor::Black => self.black.push(kind),
        }
    }

    /// Pieces taken by `capturer`, in capture order
    pub fn by(&self, capturer: PieceColor) -> &[PieceKind] {
        match capturer {
            PieceColor::White => &self.white,
            PieceColor::Black => &self.black,
        }
    }

    fn total(pieces: &[PieceKind]) -> i32 {
        pieces.iter().map(|kind| kind.value()).sum()
    }

    /// White's captured value minus black's; positive means white is ahead
    pub fn material_advantage(&self) -> i32 {
        Self::total(&self.white) - Self::total(&self.black)
    }

    /// The side ahead on material and by how much
    pub fn leader(&self) -> Option<(PieceColor, i32)> {
        let advantage = self.material_advantage();
        match advantage {
            0 => None,
            a if a > 0 => Some((PieceColor::White, a)),
            a => Some((PieceColor::Black, -a)),
        }
    }

    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }
}
