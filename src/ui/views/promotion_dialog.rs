//! Promotion dialog - modal choice of the piece a pawn becomes.

use gpui::{ClickEvent, Context, SharedString, Window, div, prelude::*, px, rgb};

use crate::domain::{Piece, PieceColor, PromotionKind};
use crate::ui::components::render_piece;
use crate::ui::theme::{
    BACKDROP, BORDER_COLOR, DIALOG_BG, DIALOG_BUTTON_HOVER_BG, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::views::ChessBoardView;

const CHOICE_PIECE_SIZE: f32 = 56.0;

/// Overlay covering the board panel. Clicking outside the card cancels.
pub fn render_promotion_dialog(
    color: PieceColor,
    cx: &Context<ChessBoardView>,
) -> impl IntoElement {
    let choices = PromotionKind::ALL.map(|kind| {
        div()
            .id(SharedString::from(format!("promotion-{}", kind.name())))
            .flex()
            .flex_col()
            .items_center()
            .gap_1()
            .p_3()
            .rounded(px(4.0))
            .border_1()
            .border_color(rgb(BORDER_COLOR))
            .cursor_pointer()
            .hover(|s| s.bg(rgb(DIALOG_BUTTON_HOVER_BG)))
            .child(render_piece(Piece::new(kind.piece_kind(), color), CHOICE_PIECE_SIZE))
            .child(
                div()
                    .text_sm()
                    .text_color(rgb(TEXT_SECONDARY))
                    .child(kind.name()),
            )
            .on_click(cx.listener(
                move |view, _: &ClickEvent, _window: &mut Window, cx| {
                    cx.stop_propagation();
                    view.promote(kind, cx);
                },
            ))
    });

    let card = div()
        .id("promotion-card")
        .p_4()
        .flex()
        .flex_col()
        .gap_2()
        .bg(rgb(DIALOG_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .child(
            div()
                .flex()
                .justify_center()
                .text_color(rgb(TEXT_PRIMARY))
                .child("Choose Promotion"),
        )
        .child(div().flex().gap_2().children(choices))
        // clicks inside the card must not reach the backdrop
        .on_click(|_, _, cx| cx.stop_propagation());

    div()
        .id("promotion-backdrop")
        .absolute()
        .top_0()
        .left_0()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .bg(gpui::rgba(BACKDROP))
        .child(card)
        .on_click(cx.listener(|view, _: &ClickEvent, _window: &mut Window, cx| {
            view.cancel_promotion(cx);
        }))
}
