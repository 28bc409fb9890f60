//! Rendering module
//!
//! The simulation never draws. Each frame the runner hands the full state to
//! a [`Renderer`]; renderers flatten it into a [`Scene`] of world-space draw
//! items and push those to whatever surface they own.

pub mod headless;
pub mod scene;

pub use headless::HeadlessRenderer;
pub use scene::{GlyphDraw, Hud, Scene, ShipDraw, TextDraw};

use crate::sim::GameState;

/// Anything that can present a frame. Receives state, returns nothing.
pub trait Renderer {
    fn render(&mut self, state: &GameState, now: u64);
}
