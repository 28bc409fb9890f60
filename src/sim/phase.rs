//! Phase transitions
//!
//! ```text
//!            wait elapsed                 lives > 0 after hit
//!  Waiting ───────────────▶ Playing ──────────────────────────▶ Waiting
//!     ▲                       │  │        all blocks destroyed
//!     │                       │  └────────────────────────────▶ Waiting (level + 1)
//!     │ restart after hold    │ lives == 0 after hit
//!     └──────── GameOver ◀────┘
//! ```
//!
//! Lives only change in [`player_hit`]; the score is never touched here.

use super::entities::Ship;
use super::state::{GamePhase, GameState, SessionState};
use crate::consts::*;

/// Result of the ship touching a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Ship was invincible or not in play; nothing changed
    Ignored,
    /// Lost a life, waiting to respawn
    Respawn,
    /// Lost the last life
    GameOver,
}

/// Start the wave for the current level once the wait has elapsed
///
/// Returns true if the session moved to `Playing`.
pub fn update_waiting(state: &mut GameState, now: u64) -> bool {
    let session = &state.session;
    if session.phase != GamePhase::Waiting
        || session.game_over
        || session.phase_elapsed(now) <= WAIT_FOR_LEVEL_START_MS
    {
        return false;
    }
    start_wave(state, now);
    true
}

/// `Waiting -> Playing`: fresh arena, centered invincible ship, new blocks
pub fn start_wave(state: &mut GameState, now: u64) {
    log::info!("Starting level {}", state.session.level);

    state.clear_transients();
    let center = state.center();
    state.ship.respawn(center, now);
    state.spawn_wave();
    state.session.enter_phase(GamePhase::Playing, now);
}

/// `Playing -> Waiting` after the last block of the wave is destroyed
pub fn wave_cleared(state: &mut GameState, now: u64) {
    if state.session.phase != GamePhase::Playing {
        return;
    }
    state.session.level += 1;
    state.ship.visible = false;
    state.session.enter_phase(GamePhase::Waiting, now);
    log::info!(
        "Wave cleared! Next level {}, score {}",
        state.session.level,
        state.session.score
    );
}

/// Handle the ship touching a block
///
/// Invincible ships and ships outside `Playing` ignore the hit, so repeated
/// calls during invincibility never cost a life.
pub fn player_hit(state: &mut GameState, now: u64) -> HitOutcome {
    if state.session.phase != GamePhase::Playing || state.ship.is_invincible() {
        return HitOutcome::Ignored;
    }

    state.session.lives = state.session.lives.saturating_sub(1);
    state.clear_transients();

    if state.session.lives == 0 {
        state.ship.visible = false;
        state.session.game_over = true;
        state.session.games_played += 1;
        state.session.enter_phase(GamePhase::GameOver, now);
        log::info!(
            "Game over: score {}, level {}",
            state.session.score,
            state.session.level
        );
        HitOutcome::GameOver
    } else {
        let center = state.center();
        state.ship.respawn(center, now);
        state.session.enter_phase(GamePhase::Waiting, now);
        log::info!("Ship hit! Lives remaining: {}", state.session.lives);
        HitOutcome::Respawn
    }
}

/// `GameOver -> Waiting`: reset the run
///
/// Only accepted after the game over screen has been held long enough;
/// otherwise a no-op returning false.
pub fn restart(state: &mut GameState, now: u64) -> bool {
    if !state.session.can_restart(now) {
        log::debug!("Restart ignored in {:?}", state.session.phase);
        return false;
    }

    let games_played = state.session.games_played;
    state.session = SessionState::new(state.starting_lives, now);
    state.session.games_played = games_played;
    state.ship = Ship::new(state.center());
    state.clear_transients();
    log::info!("Restarting (game {})", games_played + 1);
    true
}
