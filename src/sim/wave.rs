//! Wave generation
//!
//! Every level starts with a batch of large blocks scattered around the
//! screen, kept a safe distance away from the ship. Later levels bring more
//! and faster blocks and allow them a little closer.

use glam::Vec2;
use rand::Rng;

use super::entities::{Obstacle, SizeClass};
use super::state::EntityIds;
use crate::consts::*;
use crate::heading_vector;
use crate::snippets::random_fragment;

/// Placement attempts before settling for the farthest candidate
const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Number of blocks in the wave for `level`
pub fn wave_size(level: u32) -> usize {
    let extra = level.saturating_sub(1) as usize * OBSTACLE_COUNT_PER_LEVEL;
    (OBSTACLE_START_COUNT + extra).min(OBSTACLE_MAX_COUNT)
}

/// Minimum distance between a new block and the ship
pub fn safe_distance(level: u32, bounds: Vec2) -> f32 {
    let shrink = level.saturating_sub(1) as f32 * SAFE_DISTANCE_SHRINK_PER_LEVEL;
    (bounds.max_element() / 3.0 - shrink).max(SAFE_DISTANCE_MIN)
}

/// Upper bound of block speed for `level`
pub fn max_speed(level: u32) -> f32 {
    let boost = level.saturating_sub(1) as f32 * OBSTACLE_SPEED_PER_LEVEL;
    (OBSTACLE_SPEED_MAX + boost).min(OBSTACLE_SPEED_CAP)
}

/// Pick a uniformly random spot farther than `min_distance` from `avoid`.
///
/// Screens too small to satisfy the distance fall back to the farthest
/// sampled candidate instead of spinning forever.
fn place_away_from<R: Rng + ?Sized>(
    avoid: Vec2,
    min_distance: f32,
    bounds: Vec2,
    rng: &mut R,
) -> Vec2 {
    let mut best = Vec2::ZERO;
    let mut best_distance = f32::NEG_INFINITY;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(0.0..bounds.x),
            rng.random_range(0.0..bounds.y),
        );
        let distance = candidate.distance(avoid);
        if distance > min_distance {
            return candidate;
        }
        if distance > best_distance {
            best = candidate;
            best_distance = distance;
        }
    }

    log::warn!(
        "No spawn point {:.0}px from the ship after {} attempts, using {:.0}px",
        min_distance,
        MAX_PLACEMENT_ATTEMPTS,
        best_distance
    );
    best
}

/// Generate the blocks for `level`, avoiding `player_pos`
pub fn generate_wave<R: Rng + ?Sized>(
    level: u32,
    player_pos: Vec2,
    bounds: Vec2,
    rng: &mut R,
    ids: &mut EntityIds,
) -> Vec<Obstacle> {
    let count = wave_size(level);
    let min_distance = safe_distance(level, bounds);
    let top_speed = max_speed(level);

    log::info!(
        "Level {}: {} blocks, safe distance {:.0}, speed {}..{}",
        level,
        count,
        min_distance,
        OBSTACLE_SPEED_MIN,
        top_speed
    );

    (0..count)
        .map(|_| {
            let pos = place_away_from(player_pos, min_distance, bounds, rng);
            let angle = rng.random_range(0.0..360.0);
            let speed = rng.random_range(OBSTACLE_SPEED_MIN..=top_speed);
            let size = SizeClass::Large;
            let fragment = random_fragment(size.text_length(), rng);
            Obstacle::new(ids.next_id(), pos, heading_vector(angle) * speed, size, fragment)
        })
        .collect()
}
