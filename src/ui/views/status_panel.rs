//! Game status line and captured-pieces summary.

use gpui::{Div, div, prelude::*, px, rgb};

use crate::domain::{CapturedPieces, GameStatus, Piece, PieceColor};
use crate::ui::components::render_piece;
use crate::ui::theme::{
    BORDER_COLOR, MOVE_LIST_BG, TEXT_ACCENT, TEXT_PRIMARY, TEXT_SECONDARY, TEXT_WARNING,
};

const CAPTURED_PIECE_SIZE: f32 = 22.0;
const TURN_DOT_SIZE: f32 = 14.0;

fn card() -> Div {
    div()
        .flex()
        .flex_col()
        .gap_2()
        .p_4()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
}

/// Status line with a turn indicator while the game is running
pub fn render_status(status: GameStatus, turn: PieceColor) -> impl IntoElement {
    let text_color = match status {
        GameStatus::Checkmate { .. } => TEXT_ACCENT,
        GameStatus::Check { .. } => TEXT_WARNING,
        _ => TEXT_PRIMARY,
    };
    let turn_dot = (!status.is_game_over()).then(|| {
        let fill = match turn {
            PieceColor::White => 0xffffff,
            PieceColor::Black => 0x000000,
        };
        div()
            .size(px(TURN_DOT_SIZE))
            .rounded_full()
            .border_1()
            .border_color(rgb(TEXT_SECONDARY))
            .bg(rgb(fill))
    });

    card().child(
        div()
            .flex()
            .items_center()
            .justify_center()
            .gap_2()
            .when_some(turn_dot, |el, dot| el.child(dot))
            .child(div().text_color(rgb(text_color)).child(status.message())),
    )
}

/// One "By White" / "By Black" row; pieces are drawn in the victim's color
fn captured_row(captured: &CapturedPieces, capturer: PieceColor) -> impl IntoElement {
    let taken = captured.by(capturer);
    let advantage = captured
        .leader()
        .filter(|(leader, _)| *leader == capturer)
        .map(|(_, amount)| amount);

    let pieces = if taken.is_empty() {
        div()
            .text_sm()
            .text_color(rgb(TEXT_SECONDARY))
            .child("None")
    } else {
        div().flex().flex_wrap().children(
            taken
                .iter()
                .map(|&kind| render_piece(Piece::new(kind, capturer.opposite()), CAPTURED_PIECE_SIZE)),
        )
    };

    div()
        .flex()
        .items_center()
        .gap_2()
        .child(
            div()
                .w(px(80.0))
                .text_sm()
                .text_color(rgb(TEXT_PRIMARY))
                .child(format!("By {}:", capturer.name())),
        )
        .child(pieces)
        .when_some(advantage, |el, amount| {
            el.child(
                div()
                    .text_sm()
                    .text_color(rgb(TEXT_ACCENT))
                    .child(format!("+{amount}")),
            )
        })
}

pub fn render_captured(captured: &CapturedPieces) -> impl IntoElement {
    card()
        .child(
            div()
                .text_sm()
                .text_color(rgb(TEXT_SECONDARY))
                .child("Captured Pieces"),
        )
        .child(captured_row(captured, PieceColor::White))
        .child(captured_row(captured, PieceColor::Black))
}
