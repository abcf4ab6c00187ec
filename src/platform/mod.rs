//! Platform abstraction layer
//!
//! The round engine never talks to the window directly. The driver talks to
//! these seams instead:
//! - `Surface`: draws rectangles and text
//! - `InputSource`: quit signal and the two steering keys, once per frame
//! - `Clock`: monotonic milliseconds
//!
//! `desktop` implements them on top of macroquad.

pub mod desktop;
pub mod driver;
pub mod time;

pub use driver::Driver;
pub use time::{FrameLimiter, MonotonicClock};

use crate::GameError;
use crate::renderer::DrawCommand;

/// Input sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Window close (or equivalent) was requested
    pub quit_requested: bool,
    pub left: bool,
    pub right: bool,
}

/// Something the render model can be drawn onto
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand) -> Result<(), GameError>;

    /// Replay a whole frame
    fn draw_all(&mut self, commands: &[DrawCommand]) -> Result<(), GameError> {
        for command in commands {
            self.draw(command)?;
        }
        Ok(())
    }
}

pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

pub trait Clock {
    /// Milliseconds since the clock was created, never decreasing
    fn now_ms(&self) -> u64;
}
