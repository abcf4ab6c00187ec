//! Draw command generation for the background and HUD

use glam::Vec2;

use super::{Color, DrawCommand, TextAnchor, colors};
use crate::progress_percent;

/// Progress bar placement (below the score line)
const BAR_MARGIN: f32 = 10.0;
const BAR_TOP: f32 = 60.0;
const BAR_HEIGHT: f32 = 20.0;
const BAR_BORDER: f32 = 2.0;

/// Linear blend between two colors
fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Vertical gradient, one band per pixel row
pub fn gradient_background(width: f32, height: f32) -> Vec<DrawCommand> {
    let rows = height.max(0.0) as u32;
    (0..rows)
        .map(|y| {
            let t = y as f32 / height;
            DrawCommand::fill(
                Vec2::new(0.0, y as f32),
                Vec2::new(width, 1.0),
                lerp_color(colors::GRADIENT_TOP, colors::GRADIENT_BOTTOM, t),
            )
        })
        .collect()
}

/// Score in the top-left corner, level in the top-right
pub fn score_and_level(score: u32, level: u32, width: f32) -> [DrawCommand; 2] {
    [
        DrawCommand::text(
            format!("Score: {}", score),
            Vec2::new(10.0, 10.0),
            TextAnchor::TopLeft,
        ),
        DrawCommand::text(
            format!("Level: {}", level),
            Vec2::new(width - 100.0, 10.0),
            TextAnchor::TopLeft,
        ),
    ]
}

/// Bar showing progress toward the next level
pub fn progress_bar(score: u32, level_up_score: u32, width: f32) -> Vec<DrawCommand> {
    let bar_pos = Vec2::new(BAR_MARGIN, BAR_TOP);
    let bar_size = Vec2::new(width - 2.0 * BAR_MARGIN, BAR_HEIGHT);

    let progress = if level_up_score == 0 {
        0.0
    } else {
        (score % level_up_score) as f32 / level_up_score as f32
    };
    let fill_width = (bar_size.x * progress).floor();
    let percent = progress_percent(score, level_up_score);

    vec![
        DrawCommand::fill(bar_pos, bar_size, colors::PROGRESS_BG),
        DrawCommand::fill(bar_pos, Vec2::new(fill_width, BAR_HEIGHT), colors::PROGRESS_FILL),
        DrawCommand::border(bar_pos, bar_size, colors::TEXT, BAR_BORDER),
        DrawCommand::text(
            format!("{}% to Next Level", percent),
            Vec2::new(width / 2.0, BAR_TOP + BAR_HEIGHT / 2.0),
            TextAnchor::Center,
        ),
    ]
}
