//! Brick Breaker - A single-screen brick breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, bricks, phases)
//! - `renderer`: Scene building and the WebGPU vertex pipeline
//! - `platform`: Frame clock and HUD sinks shared by the binaries
//! - `settings`: Data-driven game configuration
//! - `audio`: Procedural sound effects (Web Audio in the browser)

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, GameConfig};

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Canvas dimensions in canvas pixels
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Simulation tick rate. One tick is one Euler step of the ball.
    pub const TICK_RATE_HZ: u32 = 60;
    /// Maximum ticks per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap (seconds) the clock will try to catch up on
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the canvas bottom to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED: f32 = 5.0;
    /// Distance from the canvas bottom to the serve position
    pub const BALL_SPAWN_OFFSET: f32 = 50.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 6;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const POINTS_PER_BRICK: u32 = 10;

    /// Row colors, top row first
    pub const BRICK_PALETTE: [&str; 6] = [
        "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3",
    ];

    pub const STARTING_LIVES: u8 = 3;
}

/// Parse a `#rrggbb` color into RGBA floats
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?, 1.0])
}
