//! Frame building
//!
//! [`draw`] turns a read-only view of the game into the triangles for one
//! frame plus the text overlay. It never touches GPU state, so it runs the
//! same in tests as in the browser.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState};

/// Prompt shown while waiting for the start key
pub const START_PROMPT: &str = "Press SPACE to Start!";

const BRICK_CORNER_RADIUS: f32 = 5.0;
const PADDLE_CORNER_RADIUS: f32 = 8.0;
const BRICK_STROKE_WIDTH: f32 = 1.0;
const BALL_SEGMENTS: u32 = 24;
/// How far the glow reaches past the ball edge
const BALL_GLOW: f32 = 4.0;

/// Everything needed to present one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Triangle list in canvas pixels, back to front
    pub vertices: Vec<Vertex>,
    /// Centered text overlay
    pub prompt: Option<&'static str>,
}

/// Build the frame for the current state
pub fn draw(state: &GameState) -> Scene {
    let mut vertices = Vec::new();

    for brick in state.bricks.iter().filter(|b| b.is_active()) {
        let min = Vec2::new(brick.x, brick.y);
        let size = Vec2::new(brick.width, brick.height);
        vertices.extend(shapes::rounded_rect(min, size, BRICK_CORNER_RADIUS, brick.color));
        vertices.extend(shapes::rounded_rect_stroke(
            min,
            size,
            BRICK_CORNER_RADIUS,
            BRICK_STROKE_WIDTH,
            colors::BRICK_STROKE,
        ));
    }

    let ball = &state.ball;
    vertices.extend(shapes::circle(
        ball.pos,
        ball.radius + BALL_GLOW,
        colors::BALL_GLOW,
        BALL_SEGMENTS,
    ));
    vertices.extend(shapes::circle(ball.pos, ball.radius, colors::BALL, BALL_SEGMENTS));

    let paddle = &state.paddle;
    vertices.extend(shapes::rounded_rect(
        Vec2::new(paddle.x, paddle.y),
        Vec2::new(paddle.width, paddle.height),
        PADDLE_CORNER_RADIUS,
        colors::PADDLE,
    ));

    let prompt = (state.phase == GamePhase::NotStarted).then_some(START_PROMPT);

    Scene { vertices, prompt }
}
