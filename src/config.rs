//! Board configuration, read from an optional JSON file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the JSON config file
pub const CONFIG_ENV: &str = "CHESSBOARD_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Initial window width in pixels. Default: 900.
    pub window_width: f32,
    /// Initial window height in pixels. Default: 600.
    pub window_height: f32,
    /// Draw file letters and rank digits on the edge squares. Default: true.
    pub show_coordinates: bool,
    /// Mark the destinations of the selected piece. Default: true.
    pub show_legal_moves: bool,
    /// Tint the origin and destination of the last move. Default: true.
    pub highlight_last_move: bool,
    /// Position every new game starts from. Default: the standard start.
    pub start_fen: Option<String>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            window_width: 900.0,
            window_height: 600.0,
            show_coordinates: true,
            show_legal_moves: true,
            highlight_last_move: true,
            start_fen: None,
            log_filter: "gpui_chessboard=info".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load from the file named by `CHESSBOARD_CONFIG`, or defaults if unset
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = BoardConfig::from_json(
            r#"{ "show_coordinates": false, "start_fen": "8/8/8/4k3/8/8/8/4K3 w - - 0 1" }"#,
        )
        .unwrap();
        assert!(!config.show_coordinates);
        assert!(config.show_legal_moves);
        assert_eq!(
            config.start_fen.as_deref(),
            Some("8/8/8/4k3/8/8/8/4K3 w - - 0 1")
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            BoardConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = BoardConfig::from_file(Path::new("/nonexistent/chessboard.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
