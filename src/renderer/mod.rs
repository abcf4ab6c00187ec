//! Render model
//!
//! Turns a `GameState` into a flat list of draw commands. Nothing here
//! touches the window; `platform` replays the commands onto a surface.

pub mod shapes;

use glam::Vec2;

use crate::sim::GameState;

/// RGBA color, components in 0..1
pub type Color = [f32; 4];

/// Opaque color from 0-255 components
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};

    pub const GRADIENT_TOP: Color = rgb(173, 216, 230); // Light blue
    pub const GRADIENT_BOTTOM: Color = rgb(144, 238, 144); // Light green
    pub const SHAPE: Color = rgb(255, 255, 255);
    pub const OUTLINE: Color = rgb(240, 255, 255); // Azure
    pub const TEXT: Color = rgb(50, 50, 50);
    pub const PROGRESS_BG: Color = rgb(200, 200, 200);
    pub const PROGRESS_FILL: Color = rgb(100, 200, 100);
}

/// Font sizes in pixels
pub const FONT_SMALL: f32 = 24.0;

/// How a text position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// A single primitive for the display surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Rectangle; `outline_width` draws only the border
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        outline_width: Option<f32>,
    },
    Text {
        text: String,
        pos: Vec2,
        font_size: f32,
        color: Color,
        anchor: TextAnchor,
    },
}

impl DrawCommand {
    pub fn fill(pos: Vec2, size: Vec2, color: Color) -> Self {
        DrawCommand::Rect {
            pos,
            size,
            color,
            outline_width: None,
        }
    }

    pub fn border(pos: Vec2, size: Vec2, color: Color, width: f32) -> Self {
        DrawCommand::Rect {
            pos,
            size,
            color,
            outline_width: Some(width),
        }
    }

    pub fn text(text: impl Into<String>, pos: Vec2, anchor: TextAnchor) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            font_size: FONT_SMALL,
            color: colors::TEXT,
            anchor,
        }
    }
}

/// Outline border thickness
const OUTLINE_WIDTH: f32 = 3.0;

/// Build the full frame, back to front
pub fn render_model(state: &GameState, now_ms: u64) -> Vec<DrawCommand> {
    let config = &state.config;
    let mut commands = shapes::gradient_background(config.screen_width, config.screen_height);

    let size = Vec2::splat(config.shape_size);
    commands.push(DrawCommand::fill(state.shape.pos, size, colors::SHAPE));
    commands.push(DrawCommand::border(
        state.outline.pos,
        size,
        colors::OUTLINE,
        OUTLINE_WIDTH,
    ));

    commands.extend(shapes::score_and_level(state.score, state.level, config.screen_width));
    commands.extend(shapes::progress_bar(
        state.score,
        config.level_up_score,
        config.screen_width,
    ));

    if let Some(message) = state.message.active(now_ms) {
        let center = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
        commands.push(DrawCommand::text(
            message.text.clone(),
            center,
            TextAnchor::Center,
        ));
    }

    commands
}
