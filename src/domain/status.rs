//! Read-only projection of the engine's check and terminal-state queries.

use crate::domain::rules::RulesEngine;
use crate::domain::{PieceColor, PieceKind, Square};

/// Why a game ended in a draw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    /// Any other draw the engine reports (fifty-move rule)
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Checkmate { winner: PieceColor },
    Draw(DrawReason),
    Check { side: PieceColor },
    ToMove { side: PieceColor },
}

impl GameStatus {
    /// Status of the engine's current position
    pub fn of<R: RulesEngine + ?Sized>(rules: &R) -> Self {
        let side = rules.side_to_move();
        if rules.is_checkmate() {
            return GameStatus::Checkmate {
                winner: side.opposite(),
            };
        }
        if rules.is_draw() {
            let reason = if rules.is_stalemate() {
                DrawReason::Stalemate
            } else if rules.is_threefold_repetition() {
                DrawReason::ThreefoldRepetition
            } else if rules.is_insufficient_material() {
                DrawReason::InsufficientMaterial
            } else {
                DrawReason::Other
            };
            return GameStatus::Draw(reason);
        }
        if rules.is_check() {
            return GameStatus::Check { side };
        }
        GameStatus::ToMove { side }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Draw(_))
    }

    pub fn message(&self) -> String {
        match self {
            GameStatus::Checkmate { winner } => format!("Checkmate! {} wins!", winner.name()),
            GameStatus::Draw(DrawReason::Stalemate) => "Draw by stalemate".to_string(),
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                "Draw by threefold repetition".to_string()
            }
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                "Draw by insufficient material".to_string()
            }
            GameStatus::Draw(DrawReason::Other) => "Draw".to_string(),
            GameStatus::Check { .. } => "Check!".to_string(),
            GameStatus::ToMove { side } => format!("{} to move", side.name()),
        }
    }
}

/// Square of the side-to-move's king when it is in check
pub fn checked_king_square<R: RulesEngine + ?Sized>(rules: &R) -> Option<Square> {
    if !rules.is_check() {
        return None;
    }
    let side = rules.side_to_move();
    Square::all().find(|&sq| {
        rules
            .piece_at(sq)
            .is_some_and(|p| p.kind == PieceKind::King && p.color == side)
    })
}
