//! Game tunables
//!
//! One immutable `GameConfig` is built at startup and handed to the engine.
//! Defaults reproduce the reference 400x600 layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;

/// All tunables for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Frame cap
    pub fps: u32,

    // === Shapes ===
    /// Side length of the falling block and the outline
    pub shape_size: f32,
    /// Gap between the outline's bottom edge and the screen bottom
    pub outline_margin: f32,

    // === Motion (pixels per frame) ===
    pub initial_fall_speed: f32,
    /// Added to the base fall speed on every level up
    pub fall_speed_increment: f32,
    /// Each new block's speed is the base speed +/- up to this much
    pub fall_speed_jitter: f32,
    pub move_speed: f32,

    // === Scoring ===
    pub level_up_score: u32,
    pub points_per_alignment: u32,
    /// Max center-to-center distance (pixels) for a landing to count
    pub alignment_tolerance: f32,
    /// Progress percentages `[start, end)` that trigger the halfway message
    pub halfway_band: (u32, u32),
    /// Every Nth level also shows the encouragement message
    pub encouragement_every: u32,

    // === Messages ===
    pub message_duration_ms: u64,

    /// Multiplier applied to every pixel quantity when a config file is
    /// loaded; always 1.0 once applied
    pub scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,

            shape_size: SHAPE_SIZE,
            outline_margin: OUTLINE_MARGIN,

            initial_fall_speed: INITIAL_FALL_SPEED,
            fall_speed_increment: FALL_SPEED_INCREMENT,
            fall_speed_jitter: FALL_SPEED_JITTER,
            move_speed: PLAYER_MOVE_SPEED,

            level_up_score: LEVEL_UP_SCORE,
            points_per_alignment: POINTS_PER_ALIGNMENT,
            alignment_tolerance: ALIGNMENT_TOLERANCE,
            halfway_band: (50, 60),
            encouragement_every: ENCOURAGEMENT_EVERY,

            message_duration_ms: MESSAGE_DURATION_MS,

            scale: 1.0,
        }
    }
}

impl GameConfig {
    /// Scale every pixel quantity by `factor` (tolerance stays proportional)
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            screen_width: self.screen_width * factor,
            screen_height: self.screen_height * factor,
            shape_size: self.shape_size * factor,
            outline_margin: self.outline_margin * factor,
            initial_fall_speed: self.initial_fall_speed * factor,
            fall_speed_increment: self.fall_speed_increment * factor,
            fall_speed_jitter: self.fall_speed_jitter * factor,
            move_speed: self.move_speed * factor,
            alignment_tolerance: self.alignment_tolerance * factor,
            scale: 1.0,
            ..self.clone()
        }
    }

    /// Rightmost x a block may occupy
    pub fn max_x(&self) -> f32 {
        self.screen_width - self.shape_size
    }

    /// Top edge of the outline
    pub fn outline_y(&self) -> f32 {
        self.screen_height - self.shape_size - self.outline_margin
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if self.shape_size <= 0.0 {
            return invalid(format!("shape_size must be positive, got {}", self.shape_size));
        }
        if self.shape_size > self.screen_width || self.outline_y() < 0.0 {
            return invalid(format!(
                "shape_size {} does not fit a {}x{} screen",
                self.shape_size, self.screen_width, self.screen_height
            ));
        }
        if self.fps == 0 {
            return invalid("fps must be at least 1".to_string());
        }
        if self.points_per_alignment == 0 || self.level_up_score == 0 {
            return invalid("level_up_score and points_per_alignment must be non-zero".to_string());
        }
        if self.level_up_score % self.points_per_alignment != 0 {
            return invalid(format!(
                "level_up_score {} is not a multiple of points_per_alignment {}",
                self.level_up_score, self.points_per_alignment
            ));
        }
        if self.encouragement_every == 0 {
            return invalid("encouragement_every must be at least 1".to_string());
        }
        if self.alignment_tolerance < 0.0 || self.fall_speed_jitter < 0.0 {
            return invalid("alignment_tolerance and fall_speed_jitter must not be negative".to_string());
        }
        if self.initial_fall_speed - self.fall_speed_jitter <= 0.0 {
            return invalid(format!(
                "initial_fall_speed {} must exceed fall_speed_jitter {}",
                self.initial_fall_speed, self.fall_speed_jitter
            ));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    ///
    /// Pixel quantities are given at `scale` 1.0 and scaled after parsing.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, GameError> {
        let raw: Self = serde_json::from_str(json).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        if !raw.scale.is_finite() || raw.scale <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "scale must be positive, got {}",
                raw.scale
            )));
        }
        let config = raw.scaled(raw.scale);
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn load_from(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json, path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config named by `HARMONY_BLOCKS_CONFIG`, or the defaults
    pub fn load() -> Result<Self, GameError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }
}
