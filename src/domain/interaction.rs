//! Board interaction state machine.
//!
//! Turns click and drag gestures into at most one committed move each,
//! asking the [`RulesEngine`] for everything it needs to know. It holds no
//! chess knowledge beyond "pawns promote on the far rank".

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::domain::rules::{MoveRequest, RulesEngine, is_promotion_square};
use crate::domain::{Piece, PieceColor, PieceKind, PromotionKind, Square};

/// Where the current gesture stands
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Nothing selected
    #[default]
    Idle,
    /// A piece was clicked and its destinations are shown
    Selected {
        origin: Square,
        targets: BTreeSet<Square>,
    },
    /// A piece is being dragged; its origin counts as selected
    Dragging {
        origin: Square,
        piece: Piece,
        targets: BTreeSet<Square>,
    },
    /// A pawn move to the far rank waits for the promotion choice
    AwaitingPromotion { from: Square, to: Square },
}

/// Origin and destination of the last applied move, for highlighting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

/// A pending promotion as shown by the dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

/// A move the controller has applied through the rules engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionKind>,
    pub mover: PieceColor,
    pub captured: Option<PieceKind>,
    pub san: String,
}

/// Outcome of offering a destination to the controller
enum Attempt {
    Committed(CommittedMove),
    Suspended,
    Rejected,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
    last_move: Option<LastMove>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Selected square; a dragged piece's origin counts as selected
    pub fn selected_square(&self) -> Option<Square> {
        match &self.state {
            InteractionState::Selected { origin, .. }
            | InteractionState::Dragging { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Destinations currently offered; empty when nothing is selected
    pub fn legal_targets(&self) -> &BTreeSet<Square> {
        static EMPTY: BTreeSet<Square> = BTreeSet::new();
        match &self.state {
            InteractionState::Selected { targets, .. }
            | InteractionState::Dragging { targets, .. } => targets,
            _ => &EMPTY,
        }
    }

    pub fn is_legal_target(&self, square: Square) -> bool {
        self.legal_targets().contains(&square)
    }

    /// Origin and piece of an active drag
    pub fn drag(&self) -> Option<(Square, Piece)> {
        match &self.state {
            InteractionState::Dragging { origin, piece, .. } => Some((*origin, *piece)),
            _ => None,
        }
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        match self.state {
            InteractionState::AwaitingPromotion { from, to } => Some(PendingPromotion { from, to }),
            _ => None,
        }
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Forget everything, including the last move. Used for a new game.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.last_move = None;
    }

    /// Handle a click or tap on `square`.
    pub fn select_or_move<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        square: Square,
    ) -> Option<CommittedMove> {
        if self.pending_promotion().is_some() {
            debug!(%square, "click ignored while a promotion is pending");
            return None;
        }

        let Some(origin) = self.selected_square() else {
            if let Some(targets) = Self::friendly_targets(rules, square) {
                debug!(%square, targets = targets.len(), "selected");
                self.state = InteractionState::Selected {
                    origin: square,
                    targets,
                };
            }
            return None;
        };

        if self.is_legal_target(square) {
            return match self.attempt(rules, origin, square) {
                Attempt::Committed(committed) => Some(committed),
                Attempt::Suspended | Attempt::Rejected => None,
            };
        }

        match Self::friendly_targets(rules, square) {
            Some(targets) => {
                debug!(%square, targets = targets.len(), "reselected");
                self.state = InteractionState::Selected {
                    origin: square,
                    targets,
                };
            }
            None => {
                debug!(%square, "deselected");
                self.state = InteractionState::Idle;
            }
        }
        None
    }

    /// Start dragging the piece on `square`. Returns false if the drag is refused.
    pub fn begin_drag<R: RulesEngine + ?Sized>(&mut self, rules: &R, square: Square) -> bool {
        if self.pending_promotion().is_some() {
            return false;
        }
        let Some(piece) = rules.piece_at(square) else {
            return false;
        };
        let Some(targets) = Self::friendly_targets(rules, square) else {
            return false;
        };

        debug!(%square, targets = targets.len(), "drag started");
        self.state = InteractionState::Dragging {
            origin: square,
            piece,
            targets,
        };
        true
    }

    /// Drop the dragged piece on `square`.
    ///
    /// The drag always ends here. A drop on a promotion square leaves the
    /// controller waiting for the promotion choice.
    pub fn drop_on_square<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        square: Square,
    ) -> Option<CommittedMove> {
        let InteractionState::Dragging { origin, .. } = self.state else {
            return None;
        };

        let committed = if self.is_legal_target(square) {
            match self.attempt(rules, origin, square) {
                Attempt::Committed(committed) => Some(committed),
                Attempt::Suspended => return None,
                Attempt::Rejected => None,
            }
        } else {
            debug!(%origin, %square, "dropped on a square that is not a legal target");
            None
        };

        self.state = InteractionState::Idle;
        committed
    }

    /// Drag ended without a drop. Idempotent; a pending promotion survives.
    pub fn end_drag(&mut self) {
        if matches!(
            self.state,
            InteractionState::Selected { .. } | InteractionState::Dragging { .. }
        ) {
            self.state = InteractionState::Idle;
        }
    }

    /// Complete a suspended promotion with `kind`. No-op if none is pending.
    pub fn resolve_promotion<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        kind: PromotionKind,
    ) -> Option<CommittedMove> {
        let PendingPromotion { from, to } = self.pending_promotion()?;
        self.commit(rules, from, to, Some(kind))
    }

    /// Abandon a suspended promotion without moving.
    pub fn cancel_promotion(&mut self) {
        if let InteractionState::AwaitingPromotion { from, to } = self.state {
            debug!(%from, %to, "promotion cancelled");
            self.state = InteractionState::Idle;
        }
    }

    /// Destinations of the piece on `square` if it belongs to the side to move
    fn friendly_targets<R: RulesEngine + ?Sized>(
        rules: &R,
        square: Square,
    ) -> Option<BTreeSet<Square>> {
        let piece = rules.piece_at(square)?;
        (piece.color == rules.side_to_move()).then(|| rules.legal_destinations(square))
    }

    /// Move `from` to a destination already known to be a legal target
    fn attempt<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        from: Square,
        to: Square,
    ) -> Attempt {
        let promotes = rules
            .piece_at(from)
            .is_some_and(|p| p.kind == PieceKind::Pawn && is_promotion_square(p.color, to));

        if promotes {
            debug!(%from, %to, "awaiting promotion choice");
            self.state = InteractionState::AwaitingPromotion { from, to };
            return Attempt::Suspended;
        }

        match self.commit(rules, from, to, None) {
            Some(committed) => Attempt::Committed(committed),
            None => Attempt::Rejected,
        }
    }

    /// Apply a move through the engine. On rejection nothing changes.
    fn commit<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        from: Square,
        to: Square,
        promotion: Option<PromotionKind>,
    ) -> Option<CommittedMove> {
        let request = MoveRequest {
            from,
            to,
            promotion,
        };
        match rules.apply_move(request) {
            Ok(applied) => {
                info!(san = %applied.san, %from, %to, "move committed");
                self.state = InteractionState::Idle;
                self.last_move = Some(LastMove { from, to });
                Some(CommittedMove {
                    from,
                    to,
                    promotion: applied.promotion,
                    mover: applied.mover,
                    captured: applied.captured,
                    san: applied.san,
                })
            }
            Err(e) => {
                debug!(error = %e, "rules engine rejected move");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::AppliedMove;
    use crate::error::RulesError;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    /// Engine stub: one white pawn on e7 that may go to e8, one white rook
    /// on a1 that may go to a2, and an apply that can be told to fail.
    struct StubRules {
        fail_apply: bool,
        applied: Vec<MoveRequest>,
    }

    impl StubRules {
        fn new() -> Self {
            Self {
                fail_apply: false,
                applied: Vec::new(),
            }
        }
    }

    impl RulesEngine for StubRules {
        fn side_to_move(&self) -> PieceColor {
            PieceColor::White
        }

        fn piece_at(&self, square: Square) -> Option<Piece> {
            match square.to_string().as_str() {
                "e7" => Some(Piece::new(PieceKind::Pawn, PieceColor::White)),
                "a1" => Some(Piece::new(PieceKind::Rook, PieceColor::White)),
                "h8" => Some(Piece::new(PieceKind::King, PieceColor::Black)),
                _ => None,
            }
        }

        fn legal_destinations(&self, from: Square) -> BTreeSet<Square> {
            match from.to_string().as_str() {
                "e7" => [sq("e8")].into(),
                "a1" => [sq("a2")].into(),
                _ => BTreeSet::new(),
            }
        }

        fn apply_move(&mut self, request: MoveRequest) -> Result<AppliedMove, RulesError> {
            if self.fail_apply {
                return Err(RulesError::IllegalMove {
                    from: request.from,
                    to: request.to,
                });
            }
            self.applied.push(request);
            Ok(AppliedMove {
                mover: PieceColor::White,
                captured: None,
                promotion: request.promotion,
                san: "stub".to_string(),
            })
        }

        fn is_check(&self) -> bool {
            false
        }

        fn is_checkmate(&self) -> bool {
            false
        }

        fn is_stalemate(&self) -> bool {
            false
        }

        fn is_threefold_repetition(&self) -> bool {
            false
        }

        fn is_insufficient_material(&self) -> bool {
            false
        }

        fn is_draw(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_starts_idle() {
        let controller = InteractionController::new();
        assert_eq!(controller.state(), &InteractionState::Idle);
        assert!(controller.legal_targets().is_empty());
        assert!(controller.selected_square().is_none());
        assert!(controller.last_move().is_none());
    }

    #[test]
    fn test_opponent_piece_not_selectable() {
        let mut rules = StubRules::new();
        let mut controller = InteractionController::new();
        assert!(controller.select_or_move(&mut rules, sq("h8")).is_none());
        assert_eq!(controller.state(), &InteractionState::Idle);
        assert!(!controller.begin_drag(&rules, sq("h8")));
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_rejected_commit_leaves_state_unchanged() {
        let mut rules = StubRules::new();
        rules.fail_apply = true;
        let mut controller = InteractionController::new();

        controller.select_or_move(&mut rules, sq("a1"));
        let before = controller.state().clone();
        assert!(controller.select_or_move(&mut rules, sq("a2")).is_none());
        assert_eq!(controller.state(), &before);
        assert!(controller.last_move().is_none());
    }

    #[test]
    fn test_rejected_drop_still_ends_drag() {
        let mut rules = StubRules::new();
        rules.fail_apply = true;
        let mut controller = InteractionController::new();

        assert!(controller.begin_drag(&rules, sq("a1")));
        assert!(controller.drop_on_square(&mut rules, sq("a2")).is_none());
        assert_eq!(controller.state(), &InteractionState::Idle);
        assert!(controller.last_move().is_none());
    }

    #[test]
    fn test_promotion_survives_end_drag() {
        let mut rules = StubRules::new();
        let mut controller = InteractionController::new();

        assert!(controller.begin_drag(&rules, sq("e7")));
        assert!(controller.drop_on_square(&mut rules, sq("e8")).is_none());
        controller.end_drag();
        assert_eq!(
            controller.pending_promotion(),
            Some(PendingPromotion {
                from: sq("e7"),
                to: sq("e8")
            })
        );
        assert!(rules.applied.is_empty());
    }

    #[test]
    fn test_gestures_ignored_while_promotion_pending() {
        let mut rules = StubRules::new();
        let mut controller = InteractionController::new();

        controller.select_or_move(&mut rules, sq("e7"));
        controller.select_or_move(&mut rules, sq("e8"));
        assert!(controller.pending_promotion().is_some());

        assert!(controller.select_or_move(&mut rules, sq("a1")).is_none());
        assert!(!controller.begin_drag(&rules, sq("a1")));
        assert!(controller.drop_on_square(&mut rules, sq("a2")).is_none());
        assert!(controller.pending_promotion().is_some());
        assert!(rules.applied.is_empty());
    }

    #[test]
    fn test_resolve_without_pending_is_noop() {
        let mut rules = StubRules::new();
        let mut controller = InteractionController::new();
        assert!(
            controller
                .resolve_promotion(&mut rules, PromotionKind::Rook)
                .is_none()
        );
        assert!(rules.applied.is_empty());
        controller.cancel_promotion();
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_resolve_passes_kind_to_engine() {
        let mut rules = StubRules::new();
        let mut controller = InteractionController::new();
        controller.select_or_move(&mut rules, sq("e7"));
        controller.select_or_move(&mut rules, sq("e8"));

        let committed = controller
            .resolve_promotion(&mut rules, PromotionKind::Knight)
            .unwrap();
        assert_eq!(committed.promotion, Some(PromotionKind::Knight));
        assert_eq!(rules.applied[0].promotion, Some(PromotionKind::Knight));
        assert_eq!(
            controller.last_move(),
            Some(LastMove {
                from: sq("e7"),
                to: sq("e8")
            })
        );
    }

    #[test]
    fn test_end_drag_is_idempotent() {
        let rules = StubRules::new();
        let mut controller = InteractionController::new();
        assert!(controller.begin_drag(&rules, sq("a1")));
        controller.end_drag();
        controller.end_drag();
        assert_eq!(controller.state(), &InteractionState::Idle);
        assert!(controller.legal_targets().is_empty());
    }

    #[test]
    fn test_reset_clears_last_move() {
        let mut rules = StubRules::new();
        let mut controller = InteractionController::new();
        controller.select_or_move(&mut rules, sq("a1"));
        controller.select_or_move(&mut rules, sq("a2"));
        assert!(controller.last_move().is_some());
        controller.reset();
        assert!(controller.last_move().is_none());
        assert_eq!(controller.state(), &InteractionState::Idle);
    }
}
