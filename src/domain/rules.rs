//! The rules engine seam and its shakmaty-backed implementation.
//!
//! The interaction layer never decides legality itself. Everything it needs
//! to know about the position goes through [`RulesEngine`].

use std::collections::BTreeSet;

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, Color as SColor, EnPassantMode, File, Move, Position,
    Role,
};

use crate::domain::{Piece, PieceColor, PieceKind, PromotionKind, Square, shakmaty_to_piece};
use crate::error::RulesError;

/// A move submitted to the engine
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Ignored for non-promoting moves; a promoting move without one becomes a queen
    pub promotion: Option<PromotionKind>,
}

/// What the engine reports back after applying a move
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AppliedMove {
    /// Color that made the move
    pub mover: PieceColor,
    /// Kind of the piece taken, if any (en passant reports a pawn)
    pub captured: Option<PieceKind>,
    /// Promotion actually played
    pub promotion: Option<PromotionKind>,
    /// Standard algebraic notation, with `+`/`#` suffix
    pub san: String,
}

/// Everything the board interaction layer consumes from a chess rules library
pub trait RulesEngine {
    fn side_to_move(&self) -> PieceColor;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Legal destinations for the piece on `from`, respecting check
    fn legal_destinations(&self, from: Square) -> BTreeSet<Square>;

    fn apply_move(&mut self, request: MoveRequest) -> Result<AppliedMove, RulesError>;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_threefold_repetition(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    /// Any draw: stalemate, repetition, insufficient material or the fifty-move rule
    fn is_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }
}

/// Identity of a position for repetition counting
#[derive(Clone, PartialEq, Eq, Debug)]
struct RepetitionKey {
    board: Board,
    turn: SColor,
    castling: Bitboard,
    ep_square: Option<shakmaty::Square>,
}

impl RepetitionKey {
    fn of(position: &Chess) -> Self {
        Self {
            board: position.board().clone(),
            turn: position.turn(),
            castling: position.castles().castling_rights(),
            ep_square: position.ep_square(EnPassantMode::Legal),
        }
    }
}

/// [`RulesEngine`] over a `shakmaty::Chess` position.
///
/// shakmaty positions carry no history, so the keys of every position
/// reached are kept here to answer repetition queries.
#[derive(Clone, Debug)]
pub struct ShakmatyRules {
    position: Chess,
    seen: Vec<RepetitionKey>,
}

impl ShakmatyRules {
    /// Standard starting position
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fen: Fen = fen
            .parse()
            .map_err(|e| RulesError::InvalidFen(format!("{e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidFen(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        let seen = vec![RepetitionKey::of(&position)];
        Self { position, seen }
    }

    /// The current position
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Full move number of the current position, starting at 1
    pub fn fullmoves(&self) -> u32 {
        self.position.fullmoves().get()
    }

    /// Origin and destination squares as the board presents them.
    ///
    /// For castling the user moves the king to g1/g8 or c1/c8.
    fn move_squares(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
        match m {
            Move::Normal { from, to, .. } => Some((*from, *to)),
            Move::EnPassant { from, to, .. } => Some((*from, *to)),
            Move::Castle { king, rook, .. } => {
                let king_dest = if rook.file() == File::H {
                    shakmaty::Square::from_coords(File::G, rook.rank())
                } else {
                    shakmaty::Square::from_coords(File::C, rook.rank())
                };
                Some((*king, king_dest))
            }
            Move::Put { .. } => None,
        }
    }

    /// Find the legal move matching a request
    fn find_move(&self, request: MoveRequest) -> Option<Move> {
        let from_sq: shakmaty::Square = request.from.into();
        let to_sq: shakmaty::Square = request.to.into();
        let wanted: Role = request.promotion.unwrap_or_default().into();

        self.position
            .legal_moves()
            .into_iter()
            .find(|m| {
                Self::move_squares(m) == Some((from_sq, to_sq))
                    && m.promotion().is_none_or(|role| role == wanted)
            })
    }
}

impl Default for ShakmatyRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyRules {
    fn side_to_move(&self) -> PieceColor {
        self.position.turn().into()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(square.into())
            .map(shakmaty_to_piece)
    }

    fn legal_destinations(&self, from: Square) -> BTreeSet<Square> {
        let from_sq: shakmaty::Square = from.into();
        self.position
            .legal_moves()
            .iter()
            .filter_map(Self::move_squares)
            .filter(|(move_from, _)| *move_from == from_sq)
            .map(|(_, to)| Square::from(to))
            .collect()
    }

    fn apply_move(&mut self, request: MoveRequest) -> Result<AppliedMove, RulesError> {
        let illegal = || RulesError::IllegalMove {
            from: request.from,
            to: request.to,
        };
        let m = self.find_move(request).ok_or_else(illegal)?;

        let mover = self.position.turn().into();
        let captured = m.capture().map(PieceKind::from);
        let promotion = m.promotion().and_then(|role| match role {
            Role::Queen => Some(PromotionKind::Queen),
            Role::Rook => Some(PromotionKind::Rook),
            Role::Bishop => Some(PromotionKind::Bishop),
            Role::Knight => Some(PromotionKind::Knight),
            _ => None,
        });

        // SAN depends on the position before the move
        let mut san = San::from_move(&self.position, m.clone()).to_string();

        let next = self.position.clone().play(m).map_err(|_| illegal())?;
        if next.is_checkmate() {
            san.push('#');
        } else if next.is_check() {
            san.push('+');
        }

        self.seen.push(RepetitionKey::of(&next));
        self.position = next;

        Ok(AppliedMove {
            mover,
            captured,
            promotion,
            san,
        })
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.seen.last() else {
            return false;
        };
        self.seen.iter().filter(|key| *key == current).count() >= 3
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn is_draw(&self) -> bool {
        self.position.halfmoves() >= 100
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }
}

/// Whether a pawn of `color` landing on `to` must promote
pub fn is_promotion_square(color: PieceColor, to: Square) -> bool {
    to.rank() == color.promotion_rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn play(rules: &mut ShakmatyRules, from: &str, to: &str) -> AppliedMove {
        rules
            .apply_move(MoveRequest {
                from: sq(from),
                to: sq(to),
                promotion: None,
            })
            .unwrap()
    }

    #[test]
    fn test_starting_position() {
        let rules = ShakmatyRules::new();
        assert_eq!(rules.side_to_move(), PieceColor::White);
        assert_eq!(
            rules.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(rules.piece_at(sq("e4")), None);
        assert!(!rules.is_check());
        assert!(!rules.is_game_over());
    }

    #[test]
    fn test_legal_destinations() {
        let rules = ShakmatyRules::new();
        let knight: Vec<_> = rules.legal_destinations(sq("g1")).into_iter().collect();
        assert_eq!(knight, vec![sq("f3"), sq("h3")]);
        assert_eq!(rules.legal_destinations(sq("e2")).len(), 2);
        assert!(rules.legal_destinations(sq("e1")).is_empty());
        // opponent pieces have no destinations for the side to move
        assert!(rules.legal_destinations(sq("e7")).is_empty());
    }

    #[test]
    fn test_apply_move_reports_san_and_turn() {
        let mut rules = ShakmatyRules::new();
        let applied = play(&mut rules, "e2", "e4");
        assert_eq!(applied.san, "e4");
        assert_eq!(applied.mover, PieceColor::White);
        assert_eq!(applied.captured, None);
        assert_eq!(rules.side_to_move(), PieceColor::Black);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut rules = ShakmatyRules::new();
        let result = rules.apply_move(MoveRequest {
            from: sq("e2"),
            to: sq("e5"),
            promotion: None,
        });
        assert!(matches!(result, Err(RulesError::IllegalMove { .. })));
        assert_eq!(rules.side_to_move(), PieceColor::White);
    }

    #[test]
    fn test_capture_reported() {
        let mut rules =
            ShakmatyRules::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
                .unwrap();
        let applied = play(&mut rules, "e4", "d5");
        assert_eq!(applied.captured, Some(PieceKind::Pawn));
        assert_eq!(applied.san, "exd5");
    }

    #[test]
    fn test_en_passant_reports_pawn_capture() {
        let mut rules =
            ShakmatyRules::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3")
                .unwrap();
        assert!(rules.legal_destinations(sq("f5")).contains(&sq("e6")));
        let applied = play(&mut rules, "f5", "e6");
        assert_eq!(applied.captured, Some(PieceKind::Pawn));
    }

    #[test]
    fn test_castling_through_king_destination() {
        let mut rules =
            ShakmatyRules::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let king = rules.legal_destinations(sq("e1"));
        assert!(king.contains(&sq("g1")));
        assert!(king.contains(&sq("c1")));

        let applied = play(&mut rules, "e1", "g1");
        assert_eq!(applied.san, "O-O");
        assert_eq!(
            rules.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
    }

    #[test]
    fn test_promotion_destinations_deduplicated() {
        let rules = ShakmatyRules::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let dests: Vec<_> = rules.legal_destinations(sq("a7")).into_iter().collect();
        assert_eq!(dests, vec![sq("a8")]);
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut rules = ShakmatyRules::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let applied = play(&mut rules, "a7", "a8");
        assert_eq!(applied.promotion, Some(PromotionKind::Queen));
        assert_eq!(applied.san, "a8=Q+");
        assert_eq!(
            rules.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
    }

    #[test]
    fn test_promotion_to_knight() {
        let mut rules = ShakmatyRules::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let applied = rules
            .apply_move(MoveRequest {
                from: sq("a7"),
                to: sq("a8"),
                promotion: Some(PromotionKind::Knight),
            })
            .unwrap();
        assert_eq!(applied.promotion, Some(PromotionKind::Knight));
        assert_eq!(applied.san, "a8=N");
    }

    #[test]
    fn test_checkmate_fools_mate() {
        let mut rules = ShakmatyRules::new();
        play(&mut rules, "f2", "f3");
        play(&mut rules, "e7", "e5");
        play(&mut rules, "g2", "g4");
        let mate = play(&mut rules, "d8", "h4");
        assert_eq!(mate.san, "Qh4#");
        assert!(rules.is_checkmate());
        assert!(rules.is_check());
        assert!(!rules.is_draw());
        assert!(rules.is_game_over());
    }

    #[test]
    fn test_stalemate() {
        let rules = ShakmatyRules::from_fen("8/8/8/8/8/6q1/5k2/7K w - - 0 1").unwrap();
        assert!(rules.is_stalemate());
        assert!(rules.is_draw());
        assert!(!rules.is_checkmate());
    }

    #[test]
    fn test_insufficient_material() {
        let rules = ShakmatyRules::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(rules.is_insufficient_material());
        assert!(rules.is_draw());
    }

    #[test]
    fn test_fifty_move_rule_is_draw() {
        let rules = ShakmatyRules::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 100 80").unwrap();
        assert!(!rules.is_stalemate());
        assert!(!rules.is_insufficient_material());
        assert!(rules.is_draw());
    }

    #[test]
    fn test_threefold_repetition() {
        let mut rules = ShakmatyRules::new();
        for _ in 0..2 {
            assert!(!rules.is_threefold_repetition());
            play(&mut rules, "g1", "f3");
            play(&mut rules, "g8", "f6");
            play(&mut rules, "f3", "g1");
            play(&mut rules, "f6", "g8");
        }
        assert!(rules.is_threefold_repetition());
        assert!(rules.is_draw());
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(
            ShakmatyRules::from_fen("not a fen"),
            Err(RulesError::InvalidFen(_))
        ));
    }

    #[test]
    fn test_is_promotion_square() {
        assert!(is_promotion_square(PieceColor::White, sq("a8")));
        assert!(!is_promotion_square(PieceColor::White, sq("a1")));
        assert!(is_promotion_square(PieceColor::Black, sq("h1")));
    }
}
