//! Per-frame draw data
//!
//! Packs the game state into flat lists, one entry per drawable, in the order
//! a renderer should paint them: blocks, shots, particles, ship, then HUD.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Block text colour (terminal green)
pub const OBSTACLE_COLOR: u32 = 0x00FF00;

/// Ship triangle plus optional thrust flame
#[derive(Debug, Clone, PartialEq)]
pub struct ShipDraw {
    pub outline: [Vec2; 3],
    pub flame: Option<[Vec2; 3]>,
}

/// A block's code fragment, centred on the block
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub pos: Vec2,
    pub text: String,
    /// Font size in pixels
    pub size: f32,
    pub color: u32,
}

/// One particle glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    pub pos: Vec2,
    pub glyph: char,
    pub color: u32,
    /// 1.0 at spawn, fading to 0.0 at expiry
    pub alpha: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub phase: GamePhase,
    pub game_over: bool,
    /// Level announced by the "Level N" banner, if showing
    pub banner: Option<u32>,
}

impl Hud {
    pub fn from_state(state: &GameState, now: u64) -> Self {
        let session = &state.session;
        Self {
            score: session.score,
            lives: session.lives,
            level: session.level,
            phase: session.phase,
            game_over: session.game_over,
            banner: session.level_banner(now),
        }
    }
}

/// Everything to draw for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub obstacles: Vec<TextDraw>,
    pub projectiles: Vec<Vec2>,
    pub particles: Vec<GlyphDraw>,
    /// `None` while hidden or on the off beat of the invincibility blink
    pub ship: Option<ShipDraw>,
    pub hud: Hud,
}

impl Scene {
    pub fn build(state: &GameState, now: u64) -> Self {
        let obstacles = state
            .obstacles
            .iter()
            .filter(|o| o.alive)
            .map(|o| TextDraw {
                pos: o.pos,
                text: o.fragment.clone(),
                size: o.size.scale() * 0.6,
                color: OBSTACLE_COLOR,
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .filter(|p| p.alive)
            .map(|p| p.pos)
            .collect();

        let particles = state
            .particles
            .iter()
            .filter(|p| p.alive)
            .map(|p| GlyphDraw {
                pos: p.pos,
                glyph: p.glyph,
                color: p.color,
                alpha: if p.lifespan_ms == 0 {
                    0.0
                } else {
                    p.remaining_ms(now) as f32 / p.lifespan_ms as f32
                },
            })
            .collect();

        let ship = state.ship.is_drawn().then(|| ShipDraw {
            outline: state.ship.outline(),
            flame: state.ship.flame(),
        });

        Self {
            obstacles,
            projectiles,
            particles,
            ship,
            hud: Hud::from_state(state, now),
        }
    }

    /// Total number of draw items, HUD excluded
    pub fn item_count(&self) -> usize {
        self.obstacles.len()
            + self.projectiles.len()
            + self.particles.len()
            + usize::from(self.ship.is_some())
    }
}

/// Human-readable HUD line, e.g. `Score: 120  Lives: 2  Level: 3`
pub fn hud_line(hud: &Hud) -> String {
    let mut line = format!(
        "Score: {}  Lives: {}  Level: {}",
        hud.score, hud.lives, hud.level
    );
    if hud.game_over {
        line.push_str("  GAME OVER");
    } else if let Some(level) = hud.banner {
        line.push_str(&format!("  Level {}", level));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::{Particle, tick};

    #[test]
    fn test_scene_waiting_has_banner_and_ship() {
        let state = GameState::new(&Settings::default(), 3, 0);
        let scene = Scene::build(&state, 100);
        assert!(scene.obstacles.is_empty());
        assert!(scene.ship.is_some());
        assert_eq!(scene.hud.banner, Some(1));
        assert_eq!(scene.hud.lives, 3);
        assert_eq!(scene.item_count(), 1);
    }

    #[test]
    fn test_scene_lists_blocks_and_hides_blinking_ship() {
        let mut state = GameState::new(&Settings::default(), 3, 0);
        tick(&mut state, &[], WAIT_FOR_LEVEL_START_MS + 1);
        state.ship.activate_invincibility(0);
        state.ship.invincibility.blink_on = false;

        let scene = Scene::build(&state, WAIT_FOR_LEVEL_START_MS + 1);
        assert_eq!(scene.obstacles.len(), state.obstacles.len());
        assert!(scene.ship.is_none());
        assert_eq!(scene.hud.banner, None);
    }

    #[test]
    fn test_flame_only_when_thrusting() {
        let mut state = GameState::new(&Settings::default(), 3, 0);
        state.ship.thrusting = true;
        let scene = Scene::build(&state, 0);
        assert!(scene.ship.as_ref().is_some_and(|s| s.flame.is_some()));
    }

    #[test]
    fn test_particle_alpha_fades() {
        let mut state = GameState::new(&Settings::default(), 3, 0);
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            glyph: 'x',
            color: PARTICLE_COLOR,
            spawned_at: 0,
            lifespan_ms: PARTICLE_LIFESPAN_MS,
            alive: true,
        });
        let scene = Scene::build(&state, PARTICLE_LIFESPAN_MS / 2);
        assert!((scene.particles[0].alpha - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_hud_line() {
        let mut hud = Hud {
            score: 120,
            lives: 2,
            level: 3,
            phase: GamePhase::Playing,
            game_over: false,
            banner: None,
        };
        assert_eq!(hud_line(&hud), "Score: 120  Lives: 2  Level: 3");
        hud.game_over = true;
        assert!(hud_line(&hud).ends_with("GAME OVER"));
    }
}
