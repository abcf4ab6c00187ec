//! Native window backend (macroquad)

use macroquad::prelude::{
    Color as MqColor, Conf, KeyCode, draw_rectangle, draw_rectangle_lines, draw_text,
    is_key_down, is_quit_requested, measure_text, next_frame, prevent_quit,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{Driver, FrameLimiter, InputFrame, InputSource, MonotonicClock, Surface};
use crate::consts::SCREEN_TITLE;
use crate::renderer::{Color, DrawCommand, TextAnchor};
use crate::sim::GameState;
use crate::{GameConfig, GameError};

/// Fixed-size window matching the configured resolution
pub fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: SCREEN_TITLE.to_string(),
        window_width: config.screen_width as i32,
        window_height: config.screen_height as i32,
        window_resizable: false,
        fullscreen: false,
        ..Default::default()
    }
}

fn to_mq(color: Color) -> MqColor {
    MqColor::new(color[0], color[1], color[2], color[3])
}

/// Draws into the current macroquad frame
#[derive(Debug, Default)]
pub struct MacroquadSurface;

impl Surface for MacroquadSurface {
    fn draw(&mut self, command: &DrawCommand) -> Result<(), GameError> {
        match command {
            DrawCommand::Rect {
                pos,
                size,
                color,
                outline_width: None,
            } => draw_rectangle(pos.x, pos.y, size.x, size.y, to_mq(*color)),
            DrawCommand::Rect {
                pos,
                size,
                color,
                outline_width: Some(width),
            } => draw_rectangle_lines(pos.x, pos.y, size.x, size.y, *width, to_mq(*color)),
            DrawCommand::Text {
                text,
                pos,
                font_size,
                color,
                anchor,
            } => {
                if !font_size.is_finite() || *font_size < 1.0 {
                    return Err(GameError::Frame(format!(
                        "bad font size {} for {:?}",
                        font_size, text
                    )));
                }
                let dims = measure_text(text, None, *font_size as u16, 1.0);
                // draw_text positions the baseline
                let (x, y) = match anchor {
                    TextAnchor::TopLeft => (pos.x, pos.y + dims.offset_y),
                    TextAnchor::Center => (
                        pos.x - dims.width / 2.0,
                        pos.y - dims.height / 2.0 + dims.offset_y,
                    ),
                };
                draw_text(text, x, y, *font_size, to_mq(*color));
            }
        }
        Ok(())
    }
}

/// Arrow keys plus the window close button
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> InputFrame {
        InputFrame {
            quit_requested: is_quit_requested(),
            left: is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::Right),
        }
    }
}

/// Error for a panic that escaped `Window::from_config`
///
/// Before the loop starts that can only be the window or graphics context;
/// afterwards it happened between frames.
pub fn launch_failure(loop_started: bool) -> GameError {
    if loop_started {
        GameError::Frame("game loop aborted outside a frame".to_string())
    } else {
        GameError::DisplayInit("window or graphics context could not be created".to_string())
    }
}

/// Main loop; returns when the window is closed or a frame fails
///
/// Sets `loop_started` once the window is up and the first frame is about to run.
pub async fn run(config: GameConfig, seed: u64, loop_started: Arc<AtomicBool>) {
    // Close requests arrive as input so the last frame and the log line happen
    prevent_quit();
    loop_started.store(true, Ordering::SeqCst);

    let mut limiter = FrameLimiter::new(config.fps);
    let mut driver = Driver::new(GameState::new(config, seed));
    let mut input = KeyboardInput;
    let mut surface = MacroquadSurface;
    let clock = MonotonicClock::new();

    log::info!("Game started (seed {}).", seed);

    while driver.guarded_frame(&mut input, &mut surface, &clock) {
        next_frame().await;
        limiter.wait();
    }

    log::info!(
        "Game exited. Final score: {}, level: {}",
        driver.state().score,
        driver.state().level
    );
}
