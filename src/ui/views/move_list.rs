//! Move list panel - the game's move history and the New Game control.

use gpui::{ClickEvent, Context, Window, div, prelude::*, px, rgb};
use gpui_component::button::{Button, ButtonVariants};

use crate::models::{GameModel, MovePair};
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, MOVE_LIST_BG, PANEL_BG, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::views::ChessBoardView;
use crate::ui::views::status_panel::{render_captured, render_status};

// Alternate row shading
const ROW_STRIPE_BG: u32 = 0x262626;

fn render_move_row(pair: MovePair) -> impl IntoElement {
    div()
        .flex()
        .items_center()
        .gap_2()
        .py_1()
        .px_2()
        .rounded(px(4.0))
        .when(pair.number % 2 == 0, |el| el.bg(rgb(ROW_STRIPE_BG)))
        .child(
            div()
                .text_color(rgb(TEXT_SECONDARY))
                .text_sm()
                .w(px(40.0))
                .child(format!("{}.", pair.number)),
        )
        .child(
            div()
                .text_color(rgb(TEXT_PRIMARY))
                .text_sm()
                .flex_1()
                .child(pair.white.unwrap_or_else(|| "...".to_string())),
        )
        .when_some(pair.black, |el, black| {
            el.child(
                div()
                    .text_color(rgb(TEXT_PRIMARY))
                    .text_sm()
                    .flex_1()
                    .child(black),
            )
        })
}

fn render_move_history(pairs: Vec<MovePair>) -> impl IntoElement {
    div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header (fixed)
        .child(
            div()
                .p_4()
                .pb_2()
                .text_color(rgb(TEXT_PRIMARY))
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child("Move History"),
        )
        // Scrollable moves content
        .child(
            div()
                .id("move-list-scroll")
                .flex_1()
                .overflow_y_scroll()
                .p_4()
                .pt_2()
                .flex()
                .flex_col()
                .gap_1()
                .when(pairs.is_empty(), |el| {
                    el.child(
                        div()
                            .text_color(rgb(TEXT_SECONDARY))
                            .text_sm()
                            .child("No moves yet"),
                    )
                })
                .children(pairs.into_iter().map(render_move_row)),
        )
}

/// Right-hand panel: status, captured pieces, move history, New Game
pub fn render_side_panel(game: &GameModel, cx: &Context<ChessBoardView>) -> impl IntoElement {
    let new_game = Button::new("new-game")
        .label("New Game")
        .primary()
        .on_click(cx.listener(|view, _: &ClickEvent, _window: &mut Window, cx| {
            view.new_game(cx);
        }));

    div()
        .size_full()
        .flex()
        .flex_col()
        .gap_3()
        .bg(rgb(PANEL_BG))
        .p(px(BOARD_PADDING))
        .child(render_status(game.status(), game.current_turn()))
        .child(render_captured(game.captured()))
        .child(render_move_history(game.move_pairs()))
        .child(new_game)
}
