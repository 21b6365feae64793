//! Chess domain: board types, the rules engine seam and the interaction
//! state machine. Nothing in here depends on GPUI.

pub mod chess;
pub mod interaction;
pub mod material;
pub mod rules;
pub mod status;

pub use chess::{Piece, PieceColor, PieceKind, PromotionKind, Square, shakmaty_to_piece};
pub use interaction::{
    CommittedMove, InteractionController, InteractionState, LastMove, PendingPromotion,
};
pub use material::CapturedPieces;
pub use rules::{AppliedMove, MoveRequest, RulesEngine, ShakmatyRules};
pub use status::{DrawReason, GameStatus, checked_king_square};
