//! Interactive chessboard built on GPUI.
//!
//! The rules of chess come from `shakmaty`; this crate owns only the board
//! interaction (select, drag, promote) and the window around it.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;
