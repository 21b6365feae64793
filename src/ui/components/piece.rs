//! Piece rendering component.

use gpui::{div, prelude::*, px, rgb};

use crate::domain::{Piece, PieceColor};
use crate::ui::theme::{BLACK_PIECE, GLYPH_SCALE, WHITE_PIECE};

/// Render a chess piece glyph centered in a box of `piece_size`
pub fn render_piece(piece: Piece, piece_size: f32) -> impl IntoElement {
    let color = match piece.color {
        PieceColor::White => WHITE_PIECE,
        PieceColor::Black => BLACK_PIECE,
    };
    div()
        .size(px(piece_size))
        .flex()
        .items_center()
        .justify_center()
        .text_size(px(piece_size * GLYPH_SCALE))
        .text_color(rgb(color))
        .child(piece.glyph())
}
