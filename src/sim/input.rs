//! Player input
//!
//! Event callbacks write into [`InputState`]; the next tick reads it. Nothing
//! here touches the game state directly.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Start the run / serve after a lost life
    Start,
    /// Start a fresh game
    Restart,
    /// Toggle the demo autopilot
    Autopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Start),
            "r" | "R" => Some(Key::Restart),
            "a" | "A" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

/// Which device steers the paddle. Whichever fired last wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    None,
    Keyboard,
    Pointer,
}

/// Input accumulated between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    pointer_x: Option<f32>,
    mode: InputMode,
    start_requested: bool,
    restart_requested: bool,
    /// Demo mode - the paddle follows the ball
    pub autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true when the browser's default action
    /// for the key (page scroll on space) should be suppressed.
    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Left => {
                self.left = true;
                self.mode = InputMode::Keyboard;
            }
            Key::Right => {
                self.right = true;
                self.mode = InputMode::Keyboard;
            }
            Key::Start => self.start_requested = true,
            Key::Restart => self.restart_requested = true,
            Key::Autopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
        }
        key == Key::Start
    }

    /// [`key_down`](Self::key_down) for a raw keyboard event. Auto-repeats
    /// of a held toggle key are dropped so it flips once per press.
    pub fn key_event(&mut self, key: Key, repeat: bool) -> bool {
        if repeat && key == Key::Autopilot {
            return false;
        }
        self.key_down(key)
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            _ => {}
        }
    }

    /// Record the pointer position, relative to the canvas left edge
    pub fn pointer_move(&mut self, x: f32) {
        self.pointer_x = Some(x);
        self.mode = InputMode::Pointer;
    }

    /// Ask for a fresh game (restart button)
    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn pointer_x(&self) -> Option<f32> {
        self.pointer_x
    }

    /// -1, 0 or +1. Right wins when both keys are held.
    pub fn keyboard_direction(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }

    /// Consume a pending start request
    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start_requested)
    }

    /// Consume a pending restart request
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Drop held keys (window lost focus, game restarted)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }
}
