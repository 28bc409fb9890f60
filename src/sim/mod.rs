//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One call to `tick` advances exactly one frame
//! - Time comes in as a millisecond timestamp, never read from the OS
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod phase;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{Collidable, burst_size, circles_overlap};
pub use entities::{Destroyed, Invincibility, Obstacle, Particle, Projectile, Ship, SizeClass, Updatable};
pub use phase::HitOutcome;
pub use state::{EntityIds, GamePhase, GameState, SessionState};
pub use tick::{InputEvent, TickOutcome, tick};
pub use wave::generate_wave;
