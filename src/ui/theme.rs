//! Theme constants and colors for the chess UI.

use gpui::{Rgba, rgb};

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.98; // piece size relative to square
pub const GLYPH_SCALE: f32 = 0.8; // glyph font size relative to piece size
pub const GHOST_OPACITY: f32 = 0.3;
pub const LEGAL_DOT_SCALE: f32 = 0.28;

// Initial panel sizes
pub const INITIAL_LEFT_PANEL: f32 = 560.0;
pub const INITIAL_RIGHT_PANEL: f32 = 300.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const SELECTED_SQUARE: u32 = 0x7FA650;
pub const LAST_MOVE_SQUARE: u32 = 0xCDD26A;
pub const CHECK_SQUARE: u32 = 0xE06666;
pub const LEGAL_MOVE: u32 = 0x3E6B2A;

// Piece glyph colors
pub const WHITE_PIECE: u32 = 0xffffff;
pub const BLACK_PIECE: u32 = 0x111111;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const MOVE_LIST_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const TEXT_ACCENT: u32 = 0x4ade80;
pub const TEXT_WARNING: u32 = 0xf87171;

// Dialog colors
pub const BACKDROP: u32 = 0x00000099;
pub const DIALOG_BG: u32 = 0x333333;
pub const DIALOG_BUTTON_HOVER_BG: u32 = 0x4a4a4a;

/// Base color of a board square; row 0 is rank 8, col 0 is the a-file
pub fn square_color(row: usize, col: usize) -> Rgba {
    if (row + col) % 2 == 0 {
        rgb(LIGHT_SQUARE)
    } else {
        rgb(DARK_SQUARE)
    }
}
