//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::GameConfig;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every life lost
    Defeat,
    /// Every brick destroyed
    Victory,
}

impl GameOutcome {
    /// Title shown on the end-of-game panel
    pub fn title(&self) -> &'static str {
        match self {
            GameOutcome::Defeat => "Game Over!",
            GameOutcome::Victory => "You Win! 🎉",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start key (new game or after a lost life)
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended; only a restart leaves this phase
    Ended(GameOutcome),
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Horizontal speed at the paddle edges, and serve speed on both axes
    pub base_speed: f32,
}

impl Ball {
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed for the whole game)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick under keyboard control
    pub speed: f32,
}

impl Paddle {
    /// Largest allowed `x`
    pub fn max_x(&self, canvas_width: f32) -> f32 {
        (canvas_width - self.width).max(0.0)
    }

    /// Move by `direction * speed`, staying on the canvas
    pub fn nudge(&mut self, direction: f32, canvas_width: f32) {
        self.x = (self.x + direction * self.speed).clamp(0.0, self.max_x(canvas_width));
    }

    /// Center on `target_x`, staying on the canvas
    pub fn center_on(&mut self, target_x: f32, canvas_width: f32) {
        self.x = (target_x - self.width / 2.0).clamp(0.0, self.max_x(canvas_width));
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Brick lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub status: BrickStatus,
    pub color: [f32; 4],
}

impl Brick {
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Strict point-in-rectangle test (edges do not count)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }
}

/// Fixed-size brick grid stored row-major in a flat array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a grid with every brick active
    pub fn new(config: &GameConfig) -> Self {
        let layout = &config.bricks;
        let colors = config.brick_colors();
        let mut bricks = Vec::with_capacity(layout.rows * layout.cols);

        for row in 0..layout.rows {
            let color = colors
                .get(row % colors.len().max(1))
                .copied()
                .unwrap_or([1.0; 4]);
            for col in 0..layout.cols {
                bricks.push(Brick {
                    x: col as f32 * (layout.width + layout.padding) + layout.offset_left,
                    y: row as f32 * (layout.height + layout.padding) + layout.offset_top,
                    width: layout.width,
                    height: layout.height,
                    status: BrickStatus::Active,
                    color,
                });
            }
        }

        Self {
            rows: layout.rows,
            cols: layout.cols,
            bricks,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Flat index of `(row, col)`
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// `(row, col)` of a flat index
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.index(row, col).map(|i| &self.bricks[i])
    }

    /// Bricks in row-major scan order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.len() - self.active_count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }

    /// Mark a brick destroyed; returns false if it already was
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(i) if self.bricks[i].is_active() => {
                self.bricks[i].status = BrickStatus::Destroyed;
                true
            }
            _ => false,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub score: u32,
    pub lives: u8,
    pub phase: GamePhase,
    /// Ticks spent running
    pub frames: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with the default layout
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    /// Create a new game from a (validated) config
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let canvas = &config.canvas;
        let paddle = Paddle {
            x: (canvas.width - config.paddle.width) / 2.0,
            y: canvas.height - config.paddle.bottom_offset,
            width: config.paddle.width,
            height: config.paddle.height,
            speed: config.paddle.speed,
        };
        // The first serve always goes up and to the right
        let ball = Ball {
            pos: Self::serve_position(&config),
            vel: Vec2::new(config.ball.speed, -config.ball.speed),
            radius: config.ball.radius,
            base_speed: config.ball.speed,
        };

        Self {
            bricks: BrickGrid::new(&config),
            lives: config.lives,
            config,
            seed,
            ball,
            paddle,
            score: 0,
            phase: GamePhase::NotStarted,
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn serve_position(config: &GameConfig) -> Vec2 {
        Vec2::new(
            config.canvas.width / 2.0,
            config.canvas.height - config.ball.spawn_offset,
        )
    }

    /// Repopulate the grid with every brick active
    pub fn init_bricks(&mut self) {
        self.bricks = BrickGrid::new(&self.config);
    }

    /// Put the ball back at the serve position with a random horizontal direction
    pub fn reset_ball(&mut self) {
        let speed = self.ball.base_speed;
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.pos = Self::serve_position(&self.config);
        self.ball.vel = Vec2::new(speed * dir, -speed);
    }

    /// Leave the start screen. Ignored unless the game is waiting to start.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
            true
        } else {
            false
        }
    }

    /// Fresh game: score, lives, bricks, ball and phase back to their initial values
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.config.lives;
        self.frames = 0;
        self.phase = GamePhase::NotStarted;
        self.paddle.x = (self.config.canvas.width - self.paddle.width) / 2.0;
        self.init_bricks();
        self.reset_ball();
    }

    /// Score with every brick destroyed
    pub fn max_score(&self) -> u32 {
        self.config.max_score()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// End the run
    pub(crate) fn end(&mut self, outcome: GameOutcome) {
        self.phase = GamePhase::Ended(outcome);
    }
}
