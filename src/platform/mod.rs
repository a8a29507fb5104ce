//! Platform abstraction layer
//!
//! Capabilities the host provides to the core:
//! - Input polling (keyboard + one gamepad)
//! - Uniform randomness
//! - The game clock (pause, single-step, time scale)

pub mod clock;
pub mod input;
pub mod rng;

pub use clock::{BlinkTimer, ClockHandle, GameClock};
pub use input::{Button, InputSnapshot, InputState, Key};
pub use rng::{RandomSource, SeededRng};
