//! Game state and session bookkeeping
//!
//! `GameState` owns every live entity collection plus the session counters.
//! Nothing else holds entities; systems borrow what they need for one frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Obstacle, Particle, Projectile, Ship};
use super::wave;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pause before a wave starts (level start or after losing a life)
    Waiting,
    /// Active gameplay
    Playing,
    /// Run ended, showing the game over screen
    GameOver,
}

/// Score, lives, level and phase timers for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub lives: u32,
    /// Current level, starting at 1
    pub level: u32,
    pub phase: GamePhase,
    /// Clock time the current phase was entered
    pub phase_entered_at: u64,
    /// Set on game over, cleared on restart; blocks the next wave from starting
    pub game_over: bool,
    /// Runs that ended in game over during this session
    pub games_played: u32,
}

impl SessionState {
    pub fn new(starting_lives: u32, now: u64) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            level: 1,
            phase: GamePhase::Waiting,
            phase_entered_at: now,
            game_over: false,
            games_played: 0,
        }
    }

    /// Milliseconds since the current phase was entered
    pub fn phase_elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.phase_entered_at)
    }

    pub fn enter_phase(&mut self, phase: GamePhase, now: u64) {
        self.phase = phase;
        self.phase_entered_at = now;
    }

    /// Level number to announce, during the first part of a wait
    pub fn level_banner(&self, now: u64) -> Option<u32> {
        let banner_ms = (WAIT_FOR_LEVEL_START_MS as f32 * LEVEL_BANNER_FRACTION) as u64;
        (self.phase == GamePhase::Waiting && !self.game_over && self.phase_elapsed(now) < banner_ms)
            .then_some(self.level)
    }

    /// Whether a restart command would be accepted now
    pub fn can_restart(&self, now: u64) -> bool {
        self.phase == GamePhase::GameOver && self.phase_elapsed(now) > GAME_OVER_HOLD_MS
    }
}

/// Monotonic entity id allocator
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete state of a running session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Screen size; every position wraps into [0, bounds)
    pub bounds: Vec2,
    pub starting_lives: u32,
    /// Per-burst particle cap (0 disables bursts)
    pub max_particles: usize,
    pub session: SessionState,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub rng: Pcg32,
    pub ids: EntityIds,
}

impl GameState {
    /// Create a session in the `Waiting` phase
    pub fn new(settings: &Settings, seed: u64, now: u64) -> Self {
        let bounds = settings.bounds();
        log::info!("New session: seed={} screen={}x{}", seed, bounds.x, bounds.y);
        Self {
            seed,
            bounds,
            starting_lives: settings.starting_lives,
            max_particles: settings.max_particles(),
            session: SessionState::new(settings.starting_lives, now),
            ship: Ship::new(bounds / 2.0),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIds::default(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds / 2.0
    }

    /// Drop every obstacle, projectile and particle
    pub fn clear_transients(&mut self) {
        self.obstacles.clear();
        self.projectiles.clear();
        self.particles.clear();
    }

    /// Remove entities destroyed or expired during this pass
    pub fn compact(&mut self) {
        self.projectiles.retain(|p| p.alive);
        self.obstacles.retain(|o| o.alive);
        self.particles.retain(|p| p.alive);
    }

    /// Spawn the obstacle wave for the current level around the ship
    pub fn spawn_wave(&mut self) {
        let wave = wave::generate_wave(
            self.session.level,
            self.ship.pos,
            self.bounds,
            &mut self.rng,
            &mut self.ids,
        );
        self.obstacles.extend(wave);
    }

    /// Fire from the ship, if it can
    pub fn fire(&mut self, now: u64) -> bool {
        if !self.ship.visible {
            return false;
        }
        let id = self.ids.next_id();
        match self.ship.shoot(id, now) {
            Some(projectile) => {
                self.projectiles.push(projectile);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_waits() {
        let state = GameState::new(&Settings::default(), 1, 500);
        assert_eq!(state.session.phase, GamePhase::Waiting);
        assert_eq!(state.session.phase_entered_at, 500);
        assert_eq!(state.session.lives, SHIP_START_LIVES);
        assert_eq!(state.session.level, 1);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_level_banner_window() {
        let session = SessionState::new(3, 0);
        assert_eq!(session.level_banner(0), Some(1));
        assert_eq!(session.level_banner(2249), Some(1));
        assert_eq!(session.level_banner(2250), None);

        let mut over = session.clone();
        over.game_over = true;
        assert_eq!(over.level_banner(0), None);
    }

    #[test]
    fn test_can_restart_only_after_hold() {
        let mut session = SessionState::new(3, 0);
        assert!(!session.can_restart(100_000));
        session.enter_phase(GamePhase::GameOver, 1000);
        assert!(!session.can_restart(1000 + GAME_OVER_HOLD_MS));
        assert!(session.can_restart(1000 + GAME_OVER_HOLD_MS + 1));
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut ids = EntityIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fire_and_compact() {
        let mut state = GameState::new(&Settings::default(), 1, 0);
        assert!(state.fire(0));
        assert!(state.fire(0));
        assert_eq!(state.projectiles.len(), 2);
        assert_ne!(state.projectiles[0].id, state.projectiles[1].id);

        state.projectiles[0].alive = false;
        state.compact();
        assert_eq!(state.projectiles.len(), 1);

        state.ship.visible = false;
        assert!(!state.fire(0));
        assert_eq!(state.projectiles.len(), 1);
    }
}
