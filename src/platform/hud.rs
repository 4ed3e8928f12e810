//! HUD updates
//!
//! The browser writes into DOM elements; tests record the calls. Both go
//! through [`HudSink`] so the sync logic is shared.

use crate::renderer::Scene;
use crate::sim::{GameEvent, GameState};

/// Text displays the game reports into
pub trait HudSink {
    fn set_score(&mut self, score: u32);
    fn set_lives(&mut self, lives: u8);
    /// Show a centered prompt, or hide it with `None`
    fn set_prompt(&mut self, prompt: Option<&str>);
    /// Reveal the end panel. `final_score` is already formatted.
    fn show_game_over(&mut self, title: &str, final_score: &str);
    fn hide_game_over(&mut self);
}

/// Text for the end panel score line
pub fn final_score_text(score: u32) -> String {
    format!("Final Score: {}", score)
}

/// Push the effects of this frame's events to the HUD
pub fn sync_hud(sink: &mut impl HudSink, state: &GameState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ScoreChanged(score) => sink.set_score(*score),
            GameEvent::LifeLost { lives } => sink.set_lives(*lives),
            GameEvent::Ended(outcome) => {
                sink.show_game_over(outcome.title(), &final_score_text(state.score));
            }
            GameEvent::Restarted => {
                sink.hide_game_over();
                sink.set_score(state.score);
                sink.set_lives(state.lives);
            }
            _ => {}
        }
    }
}

/// Show or hide the text overlay that goes with a drawn frame
pub fn show_overlay(sink: &mut impl HudSink, scene: &Scene) {
    sink.set_prompt(scene.prompt);
}
