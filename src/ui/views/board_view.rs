//! Chess board view - the board with click and drag-and-drop piece movement.

use gpui::{
    Action, Context, Entity, FocusHandle, MouseButton, MouseDownEvent, MouseMoveEvent,
    MouseUpEvent, Pixels, Point, Subscription, Window, actions, canvas, div, prelude::*, px, rgb,
};
use gpui_component::resizable::{h_resizable, resizable_panel};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::config::BoardConfig;
use crate::domain::{PromotionKind, Square};
use crate::models::GameModel;
use crate::ui::BoardLayout;
use crate::ui::components::{SquareView, render_piece, render_square};
use crate::ui::theme::{BOARD_PADDING, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, PANEL_BG};
use crate::ui::views::{render_promotion_dialog, render_side_panel};

/// Key context of the board view
pub const KEY_CONTEXT: &str = "ChessBoard";

actions!(chessboard, [NewGame, CancelPromotion]);

/// Finish a pending promotion with the given piece
#[derive(Clone, PartialEq, Deserialize, JsonSchema, Action)]
#[action(namespace = chessboard)]
#[serde(deny_unknown_fields)]
pub struct Promote {
    pub kind: PromotionKind,
}

/// The main chess board view that observes a GameModel
pub struct ChessBoardView {
    model: Entity<GameModel>,
    config: BoardConfig,
    layout: BoardLayout,
    /// Cursor position while a piece is dragged
    pointer: Option<Point<Pixels>>,
    focus_handle: FocusHandle,
    _subscription: Subscription,
}

impl ChessBoardView {
    pub fn new(model: Entity<GameModel>, config: BoardConfig, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            config,
            layout: BoardLayout::default(),
            pointer: None,
            focus_handle: cx.focus_handle(),
            _subscription,
        }
    }

    pub fn focus_handle(&self) -> &FocusHandle {
        &self.focus_handle
    }

    fn square_at(&self, position: Point<Pixels>) -> Option<Square> {
        self.layout
            .pos_to_square(position.x.into(), position.y.into())
    }

    /// Press on a friendly piece starts a drag; any other press is a click
    fn on_mouse_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle);
        let square = self.square_at(ev.position);

        let dragging = self.model.update(cx, |game, cx| {
            let dragging = game.press(square);
            cx.notify();
            dragging
        });

        if dragging {
            self.pointer = Some(ev.position);
            cx.notify();
        }
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if self.pointer.is_some() {
            self.pointer = Some(ev.position);
            cx.notify();
        }
    }

    /// Release completes the drag: drop elsewhere, click on the origin, or
    /// abandon it off the board
    fn on_mouse_up(&mut self, ev: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let square = self.square_at(ev.position);
        self.release(square, cx);
    }

    /// Release outside the board panel, e.g. over the side panel
    fn on_mouse_up_out(&mut self, _: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        self.release(None, cx);
    }

    fn release(&mut self, square: Option<Square>, cx: &mut Context<Self>) {
        if self.model.read(cx).controller().drag().is_none() && self.pointer.is_none() {
            return;
        }
        self.pointer = None;
        self.model.update(cx, |game, cx| {
            game.release(square);
            cx.notify();
        });
    }

    pub(crate) fn new_game(&mut self, cx: &mut Context<Self>) {
        self.pointer = None;
        self.model.update(cx, |game, cx| {
            game.new_game();
            cx.notify();
        });
    }

    pub(crate) fn promote(&mut self, kind: PromotionKind, cx: &mut Context<Self>) {
        self.model.update(cx, |game, cx| {
            game.resolve_promotion(kind);
            cx.notify();
        });
    }

    pub(crate) fn cancel_promotion(&mut self, cx: &mut Context<Self>) {
        self.model.update(cx, |game, cx| {
            game.cancel_promotion();
            cx.notify();
        });
    }

    fn on_new_game(&mut self, _: &NewGame, _window: &mut Window, cx: &mut Context<Self>) {
        self.new_game(cx);
    }

    fn on_promote(&mut self, action: &Promote, _window: &mut Window, cx: &mut Context<Self>) {
        self.promote(action.kind, cx);
    }

    fn on_cancel_promotion(
        &mut self,
        _: &CancelPromotion,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.cancel_promotion(cx);
    }

    /// Per-square render data for the current state, row 0 = rank 8
    fn square_views(&self, game: &GameModel) -> Vec<SquareView> {
        let controller = game.controller();
        let selected = controller.selected_square();
        let drag_origin = controller.drag().map(|(origin, _)| origin);
        let last_move = game.last_move().filter(|_| self.config.highlight_last_move);
        let checked_king = game.checked_king();

        (0..8)
            .flat_map(|row| (0..8).map(move |col| (row, col)))
            .filter_map(|(row, col)| {
                let square = Square::from_row_col(row, col)?;
                Some(SquareView {
                    row,
                    col,
                    piece: game.piece_at(square),
                    selected: selected == Some(square),
                    legal_target: self.config.show_legal_moves
                        && controller.is_legal_target(square),
                    last_move: last_move.is_some_and(|m| m.from == square || m.to == square),
                    in_check: checked_king == Some(square),
                    being_dragged: drag_origin == Some(square),
                    file_label: (self.config.show_coordinates && row == 7)
                        .then(|| (b'a' + col as u8) as char),
                    rank_label: (self.config.show_coordinates && col == 0)
                        .then(|| (b'8' - row as u8) as char),
                })
            })
            .collect()
    }
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let entity_measure = cx.entity().clone();

        let game = self.model.read(cx);
        let squares = self.square_views(game);
        let dragged_piece = game.controller().drag().map(|(_, piece)| piece);
        let pending_color = game.pending_promotion().map(|_| game.current_turn());

        // Sizing based on measured panel dimensions
        let square_size = self.layout.square_size();
        let piece_size = self.layout.piece_size();
        let board_total_size = self.layout.board_total_size();

        // Floating piece follows cursor during drag
        let floating_piece = dragged_piece.zip(self.pointer).map(|(piece, pos)| {
            let x: f32 = pos.x.into();
            let y: f32 = pos.y.into();
            div()
                .absolute()
                .left(px(x - piece_size / 2.0))
                .top(px(y - piece_size / 2.0))
                .child(render_piece(piece, piece_size))
        });

        // Board element with fixed size - always maintains 1:1 aspect ratio
        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .children(squares.chunks(8).map(|rank| {
                div().flex().flex_shrink_0().children(
                    rank.iter()
                        .map(|view| render_square(*view, square_size, piece_size)),
                )
            }));

        let promotion_dialog = pending_color.map(|color| render_promotion_dialog(color, cx));

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            .when_some(floating_piece, |el, fp| el.child(fp))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
            .on_mouse_move(cx.listener(Self::on_mouse_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::on_mouse_up_out))
            .when_some(promotion_dialog, |el, dialog| el.child(dialog));

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                entity_measure.update(cx, |view, cx| {
                    if view.layout.panel_size != bounds.size {
                        view.layout.panel_size = bounds.size;
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let side_panel = render_side_panel(self.model.read(cx), cx);

        div()
            .key_context(KEY_CONTEXT)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::on_new_game))
            .on_action(cx.listener(Self::on_promote))
            .on_action(cx.listener(Self::on_cancel_promotion))
            .size_full()
            .child(
                h_resizable("chess-layout")
                    .child(
                        resizable_panel()
                            .size(px(INITIAL_LEFT_PANEL))
                            .size_range(px(320.)..px(1200.))
                            .child(board_panel_with_measure),
                    )
                    .child(
                        resizable_panel()
                            .size(px(INITIAL_RIGHT_PANEL))
                            .size_range(px(200.)..Pixels::MAX)
                            .child(side_panel),
                    ),
            )
    }
}
