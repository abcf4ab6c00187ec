//! Harmony Blocks - steer a falling block into its outline
//!
//! Core modules:
//! - `sim`: Round engine (falling shape, alignment, score and level)
//! - `renderer`: Translates game state into draw commands
//! - `platform`: Window, input, clock and the frame loop driver
//! - `settings`: Game tunables

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::GameConfig;

/// Reference tunables (400x600 window, 50px blocks)
pub mod consts {
    /// Window title
    pub const SCREEN_TITLE: &str = "Harmony Blocks";
    /// Logical window size
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Frame cap
    pub const FPS: u32 = 60;

    /// Side length of both the falling block and its outline
    pub const SHAPE_SIZE: f32 = 50.0;
    /// Gap between the outline and the bottom of the screen
    pub const OUTLINE_MARGIN: f32 = 10.0;

    /// Pixels per frame
    pub const INITIAL_FALL_SPEED: f32 = 2.0;
    pub const FALL_SPEED_INCREMENT: f32 = 0.5;
    /// Per-block fall speed varies uniformly by +/- this much
    pub const FALL_SPEED_JITTER: f32 = 0.5;
    pub const PLAYER_MOVE_SPEED: f32 = 5.0;

    /// Points required to level up
    pub const LEVEL_UP_SCORE: u32 = 50;
    pub const POINTS_PER_ALIGNMENT: u32 = 10;
    /// Max center-to-center distance that still counts as aligned
    pub const ALIGNMENT_TOLERANCE: f32 = 10.0;

    pub const MESSAGE_DURATION_MS: u64 = 2000;
    /// Every Nth level gets an extra encouragement message
    pub const ENCOURAGEMENT_EVERY: u32 = 3;

    /// Log file written by the binary
    pub const LOG_FILE: &str = "harmony_blocks.log";
    /// Environment variable naming an optional JSON config file
    pub const CONFIG_ENV: &str = "HARMONY_BLOCKS_CONFIG";
}

/// Progress through the current level as a whole percentage (0..100)
#[inline]
pub fn progress_percent(score: u32, level_up_score: u32) -> u32 {
    if level_up_score == 0 {
        return 0;
    }
    (u64::from(score % level_up_score) * 100 / u64::from(level_up_score)) as u32
}
