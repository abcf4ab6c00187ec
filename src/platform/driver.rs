//! Frame loop driver
//!
//! Owns the game state and runs one frame at a time: poll input, read the
//! clock once, tick, draw. `guarded_frame` is the outermost boundary: any
//! error or panic from a frame is logged once and stops the loop.

use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

use super::{Clock, InputSource, Surface};
use crate::GameError;
use crate::renderer::render_model;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Driver {
    state: GameState,
    running: bool,
    frames: u64,
}

impl Driver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            running: true,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run a single frame
    ///
    /// A quit request stops the loop after this frame has been drawn.
    pub fn frame<I, S, C>(
        &mut self,
        input: &mut I,
        surface: &mut S,
        clock: &C,
    ) -> Result<Vec<GameEvent>, GameError>
    where
        I: InputSource + ?Sized,
        S: Surface + ?Sized,
        C: Clock + ?Sized,
    {
        let polled = input.poll();
        if polled.quit_requested && self.running {
            self.running = false;
            log::info!("User requested to quit the game.");
        }

        let now_ms = clock.now_ms();
        let events = tick(
            &mut self.state,
            &TickInput {
                left: polled.left,
                right: polled.right,
                now_ms,
            },
        );

        surface.draw_all(&render_model(&self.state, now_ms))?;
        self.frames += 1;
        Ok(events)
    }

    /// Run a frame, turning errors and panics into a logged stop
    ///
    /// Returns whether the loop should continue.
    pub fn guarded_frame<I, S, C>(&mut self, input: &mut I, surface: &mut S, clock: &C) -> bool
    where
        I: InputSource + ?Sized,
        S: Surface + ?Sized,
        C: Clock + ?Sized,
    {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.frame(input, surface, clock)));

        match result {
            Ok(Ok(_)) => self.running,
            Ok(Err(err)) => {
                log::error!(
                    "An error occurred during the game loop (frame {}): {}",
                    self.frames,
                    error_chain(&err)
                );
                self.running = false;
                false
            }
            Err(payload) => {
                log::error!(
                    "The game loop panicked (frame {}): {}",
                    self.frames,
                    panic_message(payload.as_ref())
                );
                self.running = false;
                false
            }
        }
    }
}

/// "outer: cause: root cause"
fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
