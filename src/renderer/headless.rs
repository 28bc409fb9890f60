//! Log-only renderer for running without a window

use super::scene::{Hud, Scene, hud_line};
use super::Renderer;
use crate::sim::GameState;

/// Builds the scene every frame and logs the HUD whenever it changes
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames_rendered: u64,
    last_hud: Option<Hud>,
    /// Largest number of draw items seen in a single frame
    peak_items: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn peak_items(&self) -> usize {
        self.peak_items
    }

    pub fn last_hud(&self) -> Option<&Hud> {
        self.last_hud.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, state: &GameState, now: u64) {
        let scene = Scene::build(state, now);
        self.frames_rendered += 1;
        self.peak_items = self.peak_items.max(scene.item_count());

        if self.last_hud != Some(scene.hud) {
            log::info!("{}", hud_line(&scene.hud));
            self.last_hud = Some(scene.hud);
        }
        log::trace!(
            "frame {}: {} blocks, {} shots, {} particles",
            self.frames_rendered,
            scene.obstacles.len(),
            scene.projectiles.len(),
            scene.particles.len()
        );
    }
}
