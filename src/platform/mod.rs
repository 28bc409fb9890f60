//! Platform abstraction layer
//!
//! Everything the simulation consumes from the outside world:
//! - Time (monotonic milliseconds) and frame pacing
//! - Input events

pub mod clock;
pub mod input;

pub use clock::{Clock, FramePacer, ManualClock, SystemClock};
pub use input::{Autopilot, InputSource, ScriptedInput};
