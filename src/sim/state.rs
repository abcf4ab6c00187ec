//! Game state and core round types
//!
//! Everything the round engine mutates lives in `GameState`; tunables live
//! in the `GameConfig` it was built with.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::GameConfig;

/// Where the current round is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Block is falling and can be steered
    Falling,
    /// Landing resolved; waiting for the message to expire
    Landed,
}

/// The block the player steers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingShape {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame, fixed for the block's lifetime
    pub fall_speed: f32,
}

impl FallingShape {
    /// New block just above the visible area at a random column
    pub fn spawn(rng: &mut Pcg32, config: &GameConfig, base_speed: f32) -> Self {
        let jitter = config.fall_speed_jitter;
        Self {
            pos: Vec2::new(random_column(rng, config), -config.shape_size),
            size: config.shape_size,
            fall_speed: base_speed + rng.random_range(-jitter..=jitter),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Advance one frame
    pub fn fall(&mut self) {
        self.pos.y += self.fall_speed;
    }

    /// Move horizontally, keeping the block inside `[0, max_x]`
    pub fn shift(&mut self, dx: f32, max_x: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, max_x);
    }
}

/// The target outline near the bottom of the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOutline {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
}

impl TargetOutline {
    pub fn spawn(rng: &mut Pcg32, config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(random_column(rng, config), config.outline_y()),
            size: config.shape_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// Whole-pixel x in `[0, screen_width - shape_size]`
fn random_column(rng: &mut Pcg32, config: &GameConfig) -> f32 {
    let max = config.max_x().max(0.0) as u32;
    rng.random_range(0..=max) as f32
}

/// A timed on-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub started_at_ms: u64,
}

/// Single-slot message register
///
/// Not a queue: `set` replaces whatever is showing, so when several
/// messages are set in one frame only the last is ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSlot {
    current: Option<Message>,
    duration_ms: u64,
}

impl MessageSlot {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            current: None,
            duration_ms,
        }
    }

    /// Overwrite the slot and restart its timer
    pub fn set(&mut self, text: impl Into<String>, now_ms: u64) {
        self.current = Some(Message {
            text: text.into(),
            started_at_ms: now_ms,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Last message set, expired or not
    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    /// The message, if it is still within its display window
    pub fn active(&self, now_ms: u64) -> Option<&Message> {
        self.current
            .as_ref()
            .filter(|m| now_ms.saturating_sub(m.started_at_ms) < self.duration_ms)
    }

    /// Nothing set, or the display window has elapsed
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.active(now_ms).is_none()
    }

    /// Drop the message once its window has elapsed
    pub fn clear_expired(&mut self, now_ms: u64) {
        if self.current.is_some() && self.is_expired(now_ms) {
            self.current = None;
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Total points
    pub score: u32,
    /// Current level (starts at 1)
    pub level: u32,
    /// Base fall speed for the next block
    pub fall_speed: f32,
    pub round: RoundState,
    pub shape: FallingShape,
    pub outline: TargetOutline,
    pub message: MessageSlot,
}

impl GameState {
    /// Create a new game with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let fall_speed = config.initial_fall_speed;
        let shape = FallingShape::spawn(&mut rng, &config, fall_speed);
        let outline = TargetOutline::spawn(&mut rng, &config);
        let message = MessageSlot::new(config.message_duration_ms);

        Self {
            config,
            seed,
            rng,
            score: 0,
            level: 1,
            fall_speed,
            round: RoundState::Falling,
            shape,
            outline,
            message,
        }
    }

    /// Replace the block and outline and start a new round
    pub fn reset_round(&mut self) {
        self.shape = FallingShape::spawn(&mut self.rng, &self.config, self.fall_speed);
        self.outline = TargetOutline::spawn(&mut self.rng, &self.config);
        self.round = RoundState::Falling;
        self.message.clear();
    }

    /// Progress through the current level as a whole percentage
    pub fn progress_percent(&self) -> u32 {
        crate::progress_percent(self.score, self.config.level_up_score)
    }
}
