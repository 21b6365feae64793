mod board_view;
mod move_list;
mod promotion_dialog;
mod status_panel;

pub use board_view::{CancelPromotion, ChessBoardView, KEY_CONTEXT, NewGame, Promote};
pub use move_list::render_side_panel;
pub use promotion_dialog::render_promotion_dialog;
