//! Sound effects
//!
//! Each effect is a short list of oscillator tones, synthesized with the
//! Web Audio API in the browser. No sample files needed. The event to
//! effect mapping and the tone tables are plain data so they work natively
//! too.

use crate::sim::{GameEvent, GameOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a side or the top
    WallHit,
    BrickBreak,
    /// Ball fell past the paddle
    LifeLost,
    /// Ball launched from the start screen
    Start,
    GameOver,
    /// All bricks cleared
    Victory,
}

/// Oscillator shape, mirrored from Web Audio's `OscillatorType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator note in an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Exponential glide target, if the pitch bends
    pub glide_to: Option<f32>,
    pub waveform: Waveform,
    /// Peak gain before master volume
    pub gain: f32,
    /// Seconds from the effect start
    pub delay: f64,
    pub duration: f64,
}

impl Tone {
    const fn new(freq: f32, waveform: Waveform, gain: f32, duration: f64) -> Self {
        Self {
            freq,
            glide_to: None,
            waveform,
            gain,
            delay: 0.0,
            duration,
        }
    }

    const fn glide(mut self, to: f32) -> Self {
        self.glide_to = Some(to);
        self
    }

    const fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

const PADDLE_HIT: &[Tone] = &[Tone::new(150.0, Waveform::Sine, 0.6, 0.15).glide(60.0)];

const WALL_HIT: &[Tone] = &[Tone::new(400.0, Waveform::Sine, 0.3, 0.1)];

const BRICK_BREAK: &[Tone] = &[
    Tone::new(600.0, Waveform::Square, 0.2, 0.12).glide(1200.0),
    Tone::new(900.0, Waveform::Triangle, 0.15, 0.1).after(0.03),
];

const LIFE_LOST: &[Tone] = &[Tone::new(300.0, Waveform::Sawtooth, 0.3, 0.5).glide(50.0)];

const START: &[Tone] = &[Tone::new(200.0, Waveform::Triangle, 0.3, 0.25).glide(600.0)];

const GAME_OVER: &[Tone] = &[
    Tone::new(400.0, Waveform::Sine, 0.3, 0.4),
    Tone::new(350.0, Waveform::Sine, 0.3, 0.4).after(0.2),
    Tone::new(300.0, Waveform::Sine, 0.3, 0.4).after(0.4),
    Tone::new(200.0, Waveform::Sine, 0.3, 0.4).after(0.6),
];

const VICTORY: &[Tone] = &[
    Tone::new(400.0, Waveform::Triangle, 0.3, 0.5),
    Tone::new(500.0, Waveform::Triangle, 0.3, 0.5).after(0.1),
    Tone::new(600.0, Waveform::Triangle, 0.3, 0.5).after(0.2),
    Tone::new(800.0, Waveform::Triangle, 0.3, 0.5).after(0.3),
    Tone::new(1000.0, Waveform::Triangle, 0.25, 0.6).after(0.4),
];

impl SoundEffect {
    /// The effect a game event should trigger, if any
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::WallBounce => Some(SoundEffect::WallHit),
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
            // The final miss plays the game over jingle instead
            GameEvent::LifeLost { lives } if *lives > 0 => Some(SoundEffect::LifeLost),
            GameEvent::Ended(GameOutcome::Defeat) => Some(SoundEffect::GameOver),
            GameEvent::Ended(GameOutcome::Victory) => Some(SoundEffect::Victory),
            _ => None,
        }
    }

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::PaddleHit => PADDLE_HIT,
            SoundEffect::WallHit => WALL_HIT,
            SoundEffect::BrickBreak => BRICK_BREAK,
            SoundEffect::LifeLost => LIFE_LOST,
            SoundEffect::Start => START,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::Victory => VICTORY,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::settings::AudioConfig;
    use crate::sim::GameEvent;

    /// Ramp floor; exponential ramps cannot reach zero
    const SILENCE: f32 = 0.01;

    impl From<Waveform> for OscillatorType {
        fn from(w: Waveform) -> Self {
            match w {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        /// Created on first use; browsers refuse to start audio before a
        /// user gesture anyway
        ctx: Option<AudioContext>,
        /// Set once creation failed so we stop retrying
        disabled: bool,
        master_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(config: &AudioConfig) -> Self {
            Self {
                ctx: None,
                disabled: false,
                master_volume: config.master_volume.clamp(0.0, 1.0),
                muted: config.muted,
            }
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() && !self.disabled {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(e) => {
                        log::warn!("Failed to create AudioContext, audio disabled: {:?}", e);
                        self.disabled = true;
                    }
                }
            }
            self.ctx.as_ref()
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&mut self) {
            if let Some(ctx) = self.context() {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        /// Play every effect triggered by this frame's events
        pub fn play_events(&mut self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::from_event) {
                self.play(effect);
            }
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.context() else { return };

            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let now = ctx.current_time();
            for tone in effect.tones() {
                play_tone(ctx, tone, now, vol);
            }
        }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(ctx: &AudioContext, tone: &Tone, now: f64, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, tone.freq, tone.waveform.into()) else {
            return;
        };
        let t = now + tone.delay;
        let end = t + tone.duration;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(SILENCE, end).ok();
        if let Some(target) = tone.glide_to {
            osc.frequency().set_value_at_time(tone.freq, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(target, end).ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.02).ok();
    }
}
