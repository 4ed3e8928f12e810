//! Game configuration
//!
//! Every field has a default matching the classic layout, so a config file
//! only needs to name what it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::parse_hex_color;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A palette entry is not a `#rrggbb` color
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// Config file could not be read
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// A value is out of range
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Canvas (playfield) size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick under keyboard control
    pub speed: f32,
    /// Distance from the canvas bottom to the paddle top
    pub bottom_offset: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            bottom_offset: PADDLE_BOTTOM_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Pixels per tick along each axis at serve
    pub speed: f32,
    /// Distance from the canvas bottom to the serve position
    pub spawn_offset: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
            spawn_offset: BALL_SPAWN_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
    pub points: u32,
    /// Row colors (`#rrggbb`), wrapping when there are more rows
    pub palette: Vec<String>,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_top: BRICK_OFFSET_TOP,
            offset_left: BRICK_OFFSET_LEFT,
            points: POINTS_PER_BRICK,
            palette: BRICK_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl BrickConfig {
    /// Left edge of the last column
    pub fn last_column_left(&self) -> f32 {
        self.offset_left + (self.cols.saturating_sub(1)) as f32 * (self.width + self.padding)
    }

    /// Bottom edge of the last row
    pub fn grid_bottom(&self) -> f32 {
        self.offset_top + self.rows as f32 * (self.height + self.padding) - self.padding
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub lives: u8,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    pub audio: AudioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
            lives: STARTING_LIVES,
            tick_rate_hz: TICK_RATE_HZ,
            audio: AudioConfig::default(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the config describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("canvas.width", self.canvas.width)?;
        require_positive("canvas.height", self.canvas.height)?;
        require_positive("paddle.width", self.paddle.width)?;
        require_positive("paddle.height", self.paddle.height)?;
        require_positive("paddle.speed", self.paddle.speed)?;
        require_positive("ball.radius", self.ball.radius)?;
        require_positive("ball.speed", self.ball.speed)?;
        require_positive("bricks.width", self.bricks.width)?;
        require_positive("bricks.height", self.bricks.height)?;

        if self.paddle.width >= self.canvas.width {
            return Err(invalid("paddle.width", "paddle must be narrower than the canvas"));
        }
        if self.paddle.bottom_offset < self.paddle.height
            || self.paddle.bottom_offset >= self.canvas.height
        {
            return Err(invalid(
                "paddle.bottom_offset",
                "paddle must sit fully inside the canvas",
            ));
        }
        if self.ball.spawn_offset <= self.paddle.bottom_offset {
            return Err(invalid(
                "ball.spawn_offset",
                "ball must spawn above the paddle",
            ));
        }

        if self.bricks.rows == 0 || self.bricks.cols == 0 {
            return Err(invalid("bricks", "grid needs at least one row and column"));
        }
        if self.bricks.padding < 0.0 || self.bricks.offset_left < 0.0 || self.bricks.offset_top < 0.0
        {
            return Err(invalid("bricks", "padding and offsets must not be negative"));
        }
        // The last column may overhang the right edge, but the ball center must reach it
        if self.bricks.last_column_left() >= self.canvas.width - self.ball.radius {
            return Err(invalid("bricks.cols", "last column is out of the ball's reach"));
        }
        if self.bricks.grid_bottom() >= self.canvas.height - self.ball.spawn_offset {
            return Err(invalid("bricks.rows", "grid overlaps the serve area"));
        }
        if self.bricks.points == 0 {
            return Err(invalid("bricks.points", "must be at least 1"));
        }
        if self.checked_max_score().is_none() {
            return Err(invalid(
                "bricks.points",
                "rows * cols * points does not fit the score counter",
            ));
        }
        if self.bricks.palette.is_empty() {
            return Err(invalid("bricks.palette", "needs at least one color"));
        }
        for color in &self.bricks.palette {
            if parse_hex_color(color).is_none() {
                return Err(ConfigError::InvalidColor(color.clone()));
            }
        }

        if self.lives == 0 {
            return Err(invalid("lives", "must be at least 1"));
        }
        if self.tick_rate_hz == 0 {
            return Err(invalid("tick_rate_hz", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.audio.master_volume) {
            return Err(invalid("audio.master_volume", "must be within 0.0 - 1.0"));
        }
        Ok(())
    }

    /// Row colors as RGBA, in palette order
    pub fn brick_colors(&self) -> Vec<[f32; 4]> {
        self.bricks
            .palette
            .iter()
            .filter_map(|c| parse_hex_color(c))
            .collect()
    }

    fn checked_max_score(&self) -> Option<u32> {
        let bricks = self.bricks.rows.checked_mul(self.bricks.cols)?;
        u32::try_from(bricks).ok()?.checked_mul(self.bricks.points)
    }

    /// Highest reachable score (every brick destroyed). Saturates for configs
    /// that failed validation.
    pub fn max_score(&self) -> u32 {
        self.checked_max_score().unwrap_or(u32::MAX)
    }

    /// Duration of one simulation tick in seconds
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }

    /// Load the config embedded in the page (`<script id="game-config">`)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("game-config"))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from page");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring page config: {e}");
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Load a config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.max_score(), 600);
        assert_eq!(config.brick_colors().len(), 6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "lives": 5, "bricks": { "rows": 4 } }"#).unwrap();
        assert_eq!(config.lives, 5);
        assert_eq!(config.bricks.rows, 4);
        assert_eq!(config.bricks.cols, BRICK_COLS);
        assert_eq!(config.paddle, PaddleConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ lives: 3 }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = GameConfig::from_json(r##"{ "bricks": { "palette": ["#ff0000", "red"] } }"##)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(ref c) if c == "red"));
    }

    #[test]
    fn test_rejects_empty_grid_and_zero_lives() {
        assert!(GameConfig::from_json(r#"{ "bricks": { "cols": 0 } }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "lives": 0 }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "tick_rate_hz": 0 }"#).is_err());
    }

    #[test]
    fn test_rejects_unreachable_column() {
        let err = GameConfig::from_json(r#"{ "bricks": { "cols": 11 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bricks.cols", .. }));
    }

    #[test]
    fn test_rejects_paddle_wider_than_canvas() {
        let err = GameConfig::from_json(r#"{ "paddle": { "width": 900 } }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid paddle.width: paddle must be narrower than the canvas"
        );
    }

    #[test]
    fn test_rejects_score_overflow() {
        let err = GameConfig::from_json(r#"{ "bricks": { "points": 4294967295 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bricks.points", .. }));

        // 60 bricks * 71582788 = 4294967280, still fits
        let config = GameConfig::from_json(r#"{ "bricks": { "points": 71582788 } }"#).unwrap();
        assert_eq!(config.max_score(), 4_294_967_280);
        assert!(GameConfig::from_json(r#"{ "bricks": { "points": 71582789 } }"#).is_err());
    }

    #[test]
    fn test_lives_come_from_config() {
        let config = GameConfig::from_json(r#"{ "lives": 5 }"#).unwrap();
        let mut state = crate::sim::GameState::with_config(config, 1);
        assert_eq!(state.lives, 5);
        state.lives = 1;
        state.restart();
        assert_eq!(state.lives, 5);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load_file(std::path::Path::new("/nonexistent/brick-breaker.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_grid_extent() {
        let bricks = BrickConfig::default();
        assert_eq!(bricks.last_column_left(), 35.0 + 9.0 * 80.0);
        assert_eq!(bricks.grid_bottom(), 60.0 + 6.0 * 30.0 - 5.0);
    }
}
