//! Square rendering component.

use gpui::{div, prelude::*, px, rgb};

use crate::domain::Piece;
use crate::ui::components::render_piece;
use crate::ui::theme::{
    CHECK_SQUARE, DARK_SQUARE, GHOST_OPACITY, LAST_MOVE_SQUARE, LEGAL_DOT_SCALE, LEGAL_MOVE,
    LIGHT_SQUARE, SELECTED_SQUARE, square_color,
};

/// Everything needed to draw one board square
#[derive(Clone, Copy, Debug, Default)]
pub struct SquareView {
    pub row: usize,
    pub col: usize,
    pub piece: Option<Piece>,
    pub selected: bool,
    pub legal_target: bool,
    pub last_move: bool,
    pub in_check: bool,
    pub being_dragged: bool,
    /// File letter drawn on the bottom rank
    pub file_label: Option<char>,
    /// Rank digit drawn on the a-file
    pub rank_label: Option<char>,
}

/// Render a single board square with its piece and highlights
pub fn render_square(view: SquareView, square_size: f32, piece_size: f32) -> impl IntoElement {
    let is_light = (view.row + view.col) % 2 == 0;
    let label_color = if is_light { DARK_SQUARE } else { LIGHT_SQUARE };

    let background = if view.in_check {
        rgb(CHECK_SQUARE)
    } else if view.last_move {
        rgb(LAST_MOVE_SQUARE)
    } else if view.selected {
        rgb(SELECTED_SQUARE)
    } else {
        square_color(view.row, view.col)
    };

    let legal_marker = view.legal_target.then(|| {
        let marker = if view.piece.is_some() {
            // ring around a capturable piece
            div().size_full().border_2().border_color(rgb(LEGAL_MOVE))
        } else {
            div()
                .size(px(square_size * LEGAL_DOT_SCALE))
                .rounded_full()
                .bg(rgb(LEGAL_MOVE))
        };
        div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .child(marker)
    });

    div()
        .relative()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .size(px(square_size))
        .bg(background)
        .flex()
        .items_center()
        .justify_center()
        .when_some(view.piece, |el, p| {
            if view.being_dragged {
                // ghost piece on the origin square
                el.child(div().opacity(GHOST_OPACITY).child(render_piece(p, piece_size)))
            } else {
                el.child(render_piece(p, piece_size))
            }
        })
        .when_some(legal_marker, |el, marker| el.child(marker))
        .when_some(view.file_label, |el, file| {
            el.child(
                div()
                    .absolute()
                    .bottom(px(1.0))
                    .right(px(3.0))
                    .text_xs()
                    .text_color(rgb(label_color))
                    .child(file.to_string()),
            )
        })
        .when_some(view.rank_label, |el, rank| {
            el.child(
                div()
                    .absolute()
                    .top(px(1.0))
                    .left(px(3.0))
                    .text_xs()
                    .text_color(rgb(label_color))
                    .child(rank.to_string()),
            )
        })
}
