//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick is one Euler step, no delta time
//! - Seeded RNG only
//! - Row-major brick scan order
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Wall, bounce_off_walls, is_miss, paddle_hit_fraction, paddle_rebound};
pub use input::{InputMode, InputState, Key};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, GameOutcome, GamePhase, GameState, Paddle,
};
pub use tick::{GameEvent, tick, update};
