//! Round engine
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One clock reading per frame, passed in with the input
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Alignment, Rect, check_alignment};
pub use state::{FallingShape, GameState, Message, MessageSlot, RoundState, TargetOutline};
pub use tick::{GameEvent, TickInput, messages, tick};
