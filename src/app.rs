//! Application setup and window creation.

use anyhow::Context as _;
use gpui::{App, Bounds, KeyBinding, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;

use crate::config::BoardConfig;
use crate::domain::PromotionKind;
use crate::models::GameModel;
use crate::ui::views::{CancelPromotion, ChessBoardView, KEY_CONTEXT, NewGame, Promote};

fn bind_keys(cx: &mut App) {
    let context = Some(KEY_CONTEXT);
    cx.bind_keys([
        KeyBinding::new("escape", CancelPromotion, context),
        KeyBinding::new("q", Promote { kind: PromotionKind::Queen }, context),
        KeyBinding::new("r", Promote { kind: PromotionKind::Rook }, context),
        KeyBinding::new("b", Promote { kind: PromotionKind::Bishop }, context),
        KeyBinding::new("n", Promote { kind: PromotionKind::Knight }, context),
        KeyBinding::new("cmd-n", NewGame, context),
        KeyBinding::new("ctrl-n", NewGame, context),
    ]);
}

/// Build the game model from configuration
pub fn build_model(config: &BoardConfig) -> anyhow::Result<GameModel> {
    match &config.start_fen {
        Some(fen) => GameModel::from_fen(fen).context("invalid start_fen in configuration"),
        None => Ok(GameModel::new()),
    }
}

/// Initialize the chess application and open its window
pub fn run(cx: &mut App, config: BoardConfig, game: GameModel) -> anyhow::Result<()> {
    gpui_component::init(cx);
    bind_keys(cx);

    let model = cx.new(|_| game);

    let bounds = Bounds::centered(
        None,
        size(px(config.window_width), px(config.window_height)),
        cx,
    );
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(model, config, cx));
            let focus = view.read(cx).focus_handle().clone();
            window.focus(&focus);
            cx.new(|cx| Root::new(view, window, cx))
        },
    )
    .context("failed to open the board window")?;
    Ok(())
}
