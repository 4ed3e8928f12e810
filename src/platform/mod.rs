//! Platform glue shared by the browser and native front ends
//!
//! - [`clock`]: turns frame timestamps into simulation ticks
//! - [`hud`]: mirrors game state into text displays

pub mod clock;
pub mod hud;

pub use clock::FrameClock;
pub use hud::{HudSink, final_score_text, show_overlay, sync_hud};
