//! Game state model - the application layer for chess game state.
//!
//! Owns the authoritative rules engine, the move history and the captured
//! pieces, and routes board gestures through the interaction controller.

use tracing::info;

use crate::domain::{
    CapturedPieces, CommittedMove, GameStatus, InteractionController, LastMove, PendingPromotion,
    Piece, PieceColor, PromotionKind, RulesEngine, ShakmatyRules, Square, checked_king_square,
};
use crate::error::RulesError;

/// One row of the move history: move number, white's move, black's reply.
///
/// `white` is empty only on the first row of a game that started with black
/// to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePair {
    pub number: usize,
    pub white: Option<String>,
    pub black: Option<String>,
}

/// The main game model containing all chess game state
pub struct GameModel {
    rules: ShakmatyRules,
    controller: InteractionController,
    /// SAN of every move played, in order
    history: Vec<String>,
    captured: CapturedPieces,
    /// Position new games start from
    start_fen: Option<String>,
    /// Move number and side to move of the start position
    first_number: usize,
    first_mover: PieceColor,
}

impl GameModel {
    pub fn new() -> Self {
        Self::with_rules(ShakmatyRules::new(), None)
    }

    /// A model whose games start from `fen` instead of the standard position
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let rules = ShakmatyRules::from_fen(fen)?;
        Ok(Self::with_rules(rules, Some(fen.to_string())))
    }

    fn with_rules(rules: ShakmatyRules, start_fen: Option<String>) -> Self {
        Self {
            first_number: rules.fullmoves() as usize,
            first_mover: rules.side_to_move(),
            rules,
            controller: InteractionController::new(),
            history: Vec::new(),
            captured: CapturedPieces::new(),
            start_fen,
        }
    }

    /// Start over from the configured position
    pub fn new_game(&mut self) {
        self.rules = match &self.start_fen {
            // the FEN was validated when the model was built
            Some(fen) => ShakmatyRules::from_fen(fen).unwrap_or_default(),
            None => ShakmatyRules::new(),
        };
        self.first_number = self.rules.fullmoves() as usize;
        self.first_mover = self.rules.side_to_move();
        self.controller.reset();
        self.history.clear();
        self.captured.clear();
        info!("new game");
    }

    pub fn rules(&self) -> &ShakmatyRules {
        &self.rules
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.rules.piece_at(square)
    }

    /// Get the side to move in the current position
    pub fn current_turn(&self) -> PieceColor {
        self.rules.side_to_move()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.rules)
    }

    pub fn checked_king(&self) -> Option<Square> {
        checked_king_square(&self.rules)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// History grouped into numbered white/black pairs, numbered from the
    /// start position's move counter
    pub fn move_pairs(&self) -> Vec<MovePair> {
        let mut moves = self.history.iter().cloned();
        let mut pairs = Vec::with_capacity(self.history.len().div_ceil(2));
        let mut number = self.first_number;

        if self.first_mover == PieceColor::Black {
            if let Some(black) = moves.next() {
                pairs.push(MovePair {
                    number,
                    white: None,
                    black: Some(black),
                });
                number += 1;
            }
        }
        while let Some(white) = moves.next() {
            pairs.push(MovePair {
                number,
                white: Some(white),
                black: moves.next(),
            });
            number += 1;
        }
        pairs
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.controller.last_move()
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.controller.pending_promotion()
    }

    pub fn select_or_move(&mut self, square: Square) -> Option<CommittedMove> {
        let committed = self.controller.select_or_move(&mut self.rules, square);
        self.record(committed)
    }

    pub fn begin_drag(&mut self, square: Square) -> bool {
        self.controller.begin_drag(&self.rules, square)
    }

    pub fn drop_on_square(&mut self, square: Square) -> Option<CommittedMove> {
        let committed = self.controller.drop_on_square(&mut self.rules, square);
        self.record(committed)
    }

    pub fn end_drag(&mut self) {
        self.controller.end_drag();
    }

    pub fn resolve_promotion(&mut self, kind: PromotionKind) -> Option<CommittedMove> {
        let committed = self.controller.resolve_promotion(&mut self.rules, kind);
        self.record(committed)
    }

    pub fn cancel_promotion(&mut self) {
        self.controller.cancel_promotion();
    }

    /// Pointer pressed over `square`, or over no square at all.
    ///
    /// A press on a friendly piece that is not a legal target starts a drag;
    /// any other press on the board is a click, and a press off the squares
    /// drops the selection. Returns whether a drag started.
    pub fn press(&mut self, square: Option<Square>) -> bool {
        if self.pending_promotion().is_some() {
            return false;
        }
        let Some(square) = square else {
            self.end_drag();
            return false;
        };

        let is_target = self.controller.is_legal_target(square);
        if !is_target && self.begin_drag(square) {
            return true;
        }
        self.select_or_move(square);
        false
    }

    /// Pointer released over `square`, or anywhere off the board.
    ///
    /// Ends an active drag: a release on another square drops the piece
    /// there, a release on the origin turns the drag into a selection, and a
    /// release elsewhere abandons it. No-op when nothing is dragged.
    pub fn release(&mut self, square: Option<Square>) -> Option<CommittedMove> {
        let (origin, _) = self.controller.drag()?;
        match square {
            Some(square) if square == origin => {
                self.end_drag();
                self.select_or_move(square)
            }
            Some(square) => self.drop_on_square(square),
            None => {
                self.end_drag();
                None
            }
        }
    }

    /// Append a committed move to the history and captured pieces
    fn record(&mut self, committed: Option<CommittedMove>) -> Option<CommittedMove> {
        let committed = committed?;
        self.history.push(committed.san.clone());
        if let Some(kind) = committed.captured {
            self.captured.record(committed.mover, kind);
        }
        if self.status().is_game_over() {
            info!(status = %self.status().message(), "game over");
        }
        Some(committed)
    }
}

impl Default for GameModel {
    fn default() -> Self {
        Self::new()
    }
}
