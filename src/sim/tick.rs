//! Frame tick
//!
//! One call advances the session by exactly one frame:
//! input → phase gate → entity updates → collisions → transition checks.
//! Rendering happens afterwards, outside the simulation.

use glam::Vec2;

use super::collision::{find_projectile_hits, score_hits, ship_hit, spawn_burst};
use super::entities::Updatable;
use super::phase;
use super::state::{GamePhase, GameState};

/// Discrete input edges delivered by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Rotate counter-clockwise (pressed / released)
    RotateLeft(bool),
    /// Rotate clockwise (pressed / released)
    RotateRight(bool),
    /// Engine (pressed / released)
    Thrust(bool),
    /// Fire one projectile (edge triggered)
    Fire,
    /// Start a new run from the game over screen
    Restart,
    /// End the session
    Quit,
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, events: &[InputEvent], now: u64) -> TickOutcome {
    for &event in events {
        if handle_input(state, event, now) == TickOutcome::Quit {
            log::info!("Quit requested");
            return TickOutcome::Quit;
        }
    }

    match state.session.phase {
        GamePhase::Waiting => {
            phase::update_waiting(state, now);
        }
        GamePhase::Playing => step_playing(state, now),
        GamePhase::GameOver => {}
    }

    TickOutcome::Continue
}

/// Apply one input edge
///
/// Presses only steer the ship while playing. Releases always apply so a key
/// let go during a pause does not stay stuck down.
fn handle_input(state: &mut GameState, event: InputEvent, now: u64) -> TickOutcome {
    let playing = state.session.phase == GamePhase::Playing;

    match event {
        InputEvent::RotateLeft(on) if playing || !on => state.ship.rotating_left = on,
        InputEvent::RotateRight(on) if playing || !on => state.ship.rotating_right = on,
        InputEvent::Thrust(on) if playing || !on => state.ship.thrusting = on,
        InputEvent::Fire if playing => {
            state.fire(now);
        }
        InputEvent::Restart => {
            phase::restart(state, now);
        }
        InputEvent::Quit => return TickOutcome::Quit,
        _ => {}
    }

    TickOutcome::Continue
}

/// Gameplay frame: move everything, resolve hits, check for clear/death
fn step_playing(state: &mut GameState, now: u64) {
    let bounds: Vec2 = state.bounds;

    state.ship.update(now, bounds);
    for obstacle in &mut state.obstacles {
        obstacle.update(now, bounds);
    }
    for projectile in &mut state.projectiles {
        projectile.update(now, bounds);
    }
    for particle in &mut state.particles {
        particle.update(now, bounds);
    }
    // Expired shots must not hit anything this frame
    state.compact();

    let hits = find_projectile_hits(&mut state.projectiles, &mut state.obstacles);
    score_hits(&mut state.session, &hits);
    for debris in &hits {
        let burst = spawn_burst(debris, now, state.max_particles, &mut state.rng);
        state.particles.extend(burst);
    }
    state.compact();

    if !state.ship.is_invincible() && ship_hit(&state.ship, &state.obstacles) {
        phase::player_hit(state, now);
    }

    if state.session.phase == GamePhase::Playing && state.obstacles.is_empty() {
        phase::wave_cleared(state, now);
    }
}
