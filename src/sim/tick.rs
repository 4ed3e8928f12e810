//! Per-tick simulation
//!
//! [`tick`] is the entry point the frame loop calls; it handles the one-shot
//! commands and then runs [`update`], which only does anything while the
//! game is running.

use super::collision::{bounce_off_walls, is_miss, paddle_hit_fraction, paddle_rebound};
use super::input::{InputMode, InputState};
use super::state::{GameOutcome, GamePhase, GameState};

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Fresh game set up
    Restarted,
    /// Left the start screen
    Started,
    WallBounce,
    PaddleHit { hit_fraction: f32 },
    BrickDestroyed { row: usize, col: usize },
    /// New score total
    ScoreChanged(u32),
    /// Lives remaining after the miss
    LifeLost { lives: u8 },
    Ended(GameOutcome),
}

/// Advance the game by one tick: commands first, then physics
pub fn tick(state: &mut GameState, input: &mut InputState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.take_restart() {
        state.restart();
        input.release_all();
        log::info!("Game restarted");
        events.push(GameEvent::Restarted);
    }

    // A start request is consumed even when it cannot apply, so a press made
    // while running does not fire after the next lost life
    if input.take_start() && state.start() {
        log::info!("Game started ({} lives left)", state.lives);
        events.push(GameEvent::Started);
        return events;
    }

    update(state, input, &mut events);
    events
}

/// Physics step. No-op unless the phase is `Running`.
pub fn update(state: &mut GameState, input: &InputState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.frames += 1;

    move_paddle(state, input);

    // Ball integration: one Euler step per tick
    state.ball.pos += state.ball.vel;

    if bounce_off_walls(&mut state.ball, state.config.canvas.width) {
        events.push(GameEvent::WallBounce);
    }

    if let Some(hit_fraction) = paddle_hit_fraction(&state.ball, &state.paddle) {
        state.ball.vel = paddle_rebound(state.ball.vel, state.ball.base_speed, hit_fraction);
        events.push(GameEvent::PaddleHit { hit_fraction });
    }

    if is_miss(&state.ball, state.config.canvas.height) {
        lose_life(state, events);
        return;
    }

    break_bricks(state, events);
}

fn move_paddle(state: &mut GameState, input: &InputState) {
    let width = state.config.canvas.width;

    if input.autopilot {
        // Track the ball with a slow wobble so rebounds are not always straight up
        let t = state.frames as f32 * 0.01;
        let wobble = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * state.paddle.width;
        state.paddle.center_on(state.ball.pos.x + wobble, width);
        return;
    }

    match input.mode() {
        InputMode::Keyboard => state.paddle.nudge(input.keyboard_direction(), width),
        InputMode::Pointer => {
            if let Some(x) = input.pointer_x() {
                state.paddle.center_on(x, width);
            }
        }
        InputMode::None => {}
    }
}

fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    log::debug!("Ball lost, {} lives left", state.lives);
    events.push(GameEvent::LifeLost { lives: state.lives });

    if state.lives == 0 {
        finish(state, GameOutcome::Defeat, events);
    } else {
        state.reset_ball();
        state.phase = GamePhase::NotStarted;
    }
}

fn break_bricks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let points = state.config.bricks.points;
    let ball = state.ball.pos;
    let hits: Vec<usize> = state
        .bricks
        .iter()
        .enumerate()
        .filter(|(_, brick)| brick.is_active() && brick.contains(ball))
        .map(|(index, _)| index)
        .collect();

    for index in hits {
        let (row, col) = state.bricks.position(index);
        state.bricks.destroy(row, col);
        state.ball.vel.y = -state.ball.vel.y;
        state.score += points;

        log::debug!("Brick ({row}, {col}) destroyed, score {}", state.score);
        events.push(GameEvent::BrickDestroyed { row, col });
        events.push(GameEvent::ScoreChanged(state.score));
    }

    if state.bricks.all_destroyed() {
        finish(state, GameOutcome::Victory, events);
    }
}

fn finish(state: &mut GameState, outcome: GameOutcome, events: &mut Vec<GameEvent>) {
    state.end(outcome);
    log::info!(
        "{} Final score {} after {} ticks",
        outcome.title(),
        state.score,
        state.frames
    );
    events.push(GameEvent::Ended(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Key;
    use crate::sim::state::BrickStatus;
    use glam::Vec2;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    /// Park the ball mid-field, clear of bricks, paddle and walls
    fn park_ball(state: &mut GameState, vel: Vec2) {
        state.ball.pos = Vec2::new(400.0, 400.0);
        state.ball.vel = vel;
    }

    #[test]
    fn test_tick_start_to_running() {
        let mut state = GameState::new(1);
        let mut input = InputState::new();

        let events = tick(&mut state, &mut input);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::NotStarted);

        input.key_down(Key::Start);
        let events = tick(&mut state, &mut input);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Running);
        // The transition tick does not move anything
        assert_eq!(state.ball.pos, Vec2::new(400.0, 550.0));
    }

    #[test]
    fn test_update_is_noop_unless_running() {
        let mut state = GameState::new(3);
        let mut input = InputState::new();
        input.key_down(Key::Right);
        let before = state.clone();

        let mut events = Vec::new();
        update(&mut state, &input, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.ball, before.ball);
        assert_eq!(state.paddle, before.paddle);

        state.end(GameOutcome::Victory);
        update(&mut state, &input, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.ball, before.ball);
        assert_eq!(state.paddle, before.paddle);
        assert_eq!(state.bricks, before.bricks);
    }

    #[test]
    fn test_ball_integration() {
        let mut state = running(1);
        park_ball(&mut state, Vec2::new(5.0, -5.0));
        tick(&mut state, &mut InputState::new());
        assert_eq!(state.ball.pos, Vec2::new(405.0, 395.0));
    }

    #[test]
    fn test_keyboard_moves_paddle() {
        let mut state = running(1);
        park_ball(&mut state, Vec2::new(0.0, -5.0));
        let mut input = InputState::new();
        input.key_down(Key::Right);
        tick(&mut state, &mut input);
        assert_eq!(state.paddle.x, 348.0);

        input.key_up(Key::Right);
        input.key_down(Key::Left);
        tick(&mut state, &mut input);
        tick(&mut state, &mut input);
        assert_eq!(state.paddle.x, 332.0);
    }

    #[test]
    fn test_pointer_centers_paddle() {
        let mut state = running(1);
        park_ball(&mut state, Vec2::new(0.0, -5.0));
        let mut input = InputState::new();
        input.pointer_move(200.0);
        tick(&mut state, &mut input);
        assert_eq!(state.paddle.x, 140.0);

        input.pointer_move(790.0);
        tick(&mut state, &mut input);
        assert_eq!(state.paddle.x, 680.0);

        // Keyboard takes over once a key is pressed
        input.key_down(Key::Left);
        tick(&mut state, &mut input);
        assert_eq!(state.paddle.x, 672.0);
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let mut state = running(1);
        state.ball.pos = Vec2::new(400.0, 557.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        let events = tick(&mut state, &mut InputState::new());
        assert_eq!(state.ball.vel, Vec2::new(0.0, -5.0));
        assert!(events.contains(&GameEvent::PaddleHit { hit_fraction: 0.5 }));
    }

    #[test]
    fn test_paddle_left_edge_hit() {
        let mut state = running(1);
        state.ball.pos = Vec2::new(340.0, 557.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        tick(&mut state, &mut InputState::new());
        assert_eq!(state.ball.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = running(1);
        state.ball.pos = Vec2::new(20.0, 10.0);
        state.ball.vel = Vec2::new(0.0, -5.0);
        let events = tick(&mut state, &mut InputState::new());
        assert_eq!(state.ball.vel, Vec2::new(0.0, 5.0));
        assert_eq!(events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut state = running(1);
        // Just below brick (5, 0), moving up into it
        state.ball.pos = Vec2::new(50.0, 220.0);
        state.ball.vel = Vec2::new(0.0, -5.0);
        let events = tick(&mut state, &mut InputState::new());

        assert_eq!(state.bricks.get(5, 0).unwrap().status, BrickStatus::Destroyed);
        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel, Vec2::new(0.0, 5.0));
        assert_eq!(
            events,
            vec![
                GameEvent::BrickDestroyed { row: 5, col: 0 },
                GameEvent::ScoreChanged(10)
            ]
        );
    }

    #[test]
    fn test_three_misses_end_the_game() {
        let mut state = running(9);
        let mut input = InputState::new();

        for expected_lives in [2, 1, 0] {
            state.ball.pos = Vec2::new(100.0, 590.0);
            state.ball.vel = Vec2::new(0.0, 5.0);
            state.paddle.x = 600.0;
            let events = tick(&mut state, &mut input);
            assert_eq!(state.lives, expected_lives);
            assert!(events.contains(&GameEvent::LifeLost { lives: expected_lives }));

            if expected_lives > 0 {
                assert_eq!(state.phase, GamePhase::NotStarted);
                assert_eq!(state.ball.pos, Vec2::new(400.0, 550.0));
                input.key_down(Key::Start);
                tick(&mut state, &mut input);
                assert!(state.is_running());
            } else {
                assert_eq!(state.phase, GamePhase::Ended(GameOutcome::Defeat));
                assert_eq!(events.last(), Some(&GameEvent::Ended(GameOutcome::Defeat)));
                assert_eq!(state.outcome().unwrap().title(), "Game Over!");
            }
        }
    }

    #[test]
    fn test_clearing_every_brick_wins() {
        let mut state = running(1);
        let mut input = InputState::new();
        let positions: Vec<Vec2> = state
            .bricks
            .iter()
            .map(|b| Vec2::new(b.x + b.width / 2.0, b.y + b.height / 2.0))
            .collect();

        for (i, center) in positions.iter().enumerate() {
            assert!(state.is_running(), "ended early at brick {i}");
            state.ball.vel = Vec2::new(0.0, 1.0);
            state.ball.pos = *center - state.ball.vel;
            tick(&mut state, &mut input);
            assert_eq!(state.score as usize, 10 * state.bricks.destroyed_count());
        }

        assert_eq!(state.score, 600);
        assert_eq!(state.phase, GamePhase::Ended(GameOutcome::Victory));
        assert_eq!(state.outcome().unwrap().title(), "You Win! 🎉");
    }

    #[test]
    fn test_ended_ignores_input() {
        let mut state = running(1);
        state.end(GameOutcome::Defeat);
        let snapshot = state.clone();
        let mut input = InputState::new();
        input.key_down(Key::Start);
        input.key_down(Key::Right);
        input.pointer_move(10.0);

        for _ in 0..10 {
            assert!(tick(&mut state, &mut input).is_empty());
        }
        assert_eq!(state.phase, snapshot.phase);
        assert_eq!(state.ball, snapshot.ball);
        assert_eq!(state.paddle, snapshot.paddle);
        assert_eq!(state.score, snapshot.score);
    }

    #[test]
    fn test_restart_from_ended() {
        let mut state = running(1);
        state.score = 50;
        state.lives = 0;
        state.end(GameOutcome::Defeat);

        let mut input = InputState::new();
        input.key_down(Key::Restart);
        let events = tick(&mut state, &mut input);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks.active_count(), 60);
    }

    #[test]
    fn test_stale_start_is_discarded() {
        let mut state = running(1);
        park_ball(&mut state, Vec2::new(0.0, -5.0));
        let mut input = InputState::new();
        input.key_down(Key::Start);
        tick(&mut state, &mut input);

        // Miss; the earlier press must not auto-serve
        state.ball.pos = Vec2::new(100.0, 590.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        state.paddle.x = 600.0;
        tick(&mut state, &mut input);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        let mut input_a = InputState::new();
        let mut input_b = InputState::new();
        input_a.autopilot = true;
        input_b.autopilot = true;

        for _ in 0..5_000 {
            if a.phase == GamePhase::NotStarted {
                input_a.key_down(Key::Start);
                input_b.key_down(Key::Start);
            }
            assert_eq!(tick(&mut a, &mut input_a), tick(&mut b, &mut input_b));
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.score, b.score);
        assert_eq!(a.frames, b.frames);
    }
}
