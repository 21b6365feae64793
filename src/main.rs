//! Interactive chessboard.
//!
//! Set `CHESSBOARD_CONFIG` to a JSON file to override the defaults and
//! `RUST_LOG` to change log verbosity.

use gpui::{App, Application};
use gpui_chessboard::{app, config::BoardConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let config = BoardConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Fail before any window opens if the start position is bad
    let game = app::build_model(&config)?;
    tracing::info!(start_fen = ?config.start_fen, "chessboard starting");

    Application::new().run(move |cx: &mut App| {
        if let Err(e) = app::run(cx, config, game) {
            tracing::error!(error = ?e, "failed to start");
            cx.quit();
        }
    });
    Ok(())
}
