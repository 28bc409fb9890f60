//! Collision detection and scoring
//!
//! Everything collides as a circle. Projectile hits are resolved in discovery
//! order with one-shot removal: once a projectile or obstacle is destroyed it
//! is skipped for the rest of the pass, so a single shot can never score
//! twice and a single block can never burst twice.

use glam::Vec2;
use rand::Rng;

use super::entities::{Destroyed, Obstacle, Particle, Projectile, Ship};
use super::state::SessionState;
use crate::consts::*;
use crate::heading_vector;

/// Glyph used when a destroyed block carried no text
pub const DEFAULT_GLYPH: char = '*';

/// Anything with a collision circle
pub trait Collidable {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// Circle-circle overlap test
    fn collides_with<C: Collidable + ?Sized>(&self, other: &C) -> bool {
        circles_overlap(self.center(), self.radius(), other.center(), other.radius())
    }
}

impl Collidable for Ship {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        SHIP_COLLISION_RADIUS
    }
}

impl Collidable for Projectile {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        PROJECTILE_RADIUS
    }
}

impl Collidable for Obstacle {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.size.collision_radius()
    }
}

/// True when the centers are closer than the sum of the radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Match live projectiles against live obstacles.
///
/// Each projectile takes out at most the first live obstacle it overlaps.
/// Both are marked dead immediately; the caller compacts the collections.
pub fn find_projectile_hits(
    projectiles: &mut [Projectile],
    obstacles: &mut [Obstacle],
) -> Vec<Destroyed> {
    let mut hits = Vec::new();

    for projectile in projectiles.iter_mut().filter(|p| p.alive) {
        let target = obstacles
            .iter_mut()
            .filter(|o| o.alive)
            .find(|o| projectile.collides_with(&**o));

        if let Some(obstacle) = target {
            if let Some(debris) = obstacle.destroy() {
                projectile.alive = false;
                hits.push(debris);
            }
        }
    }

    hits
}

/// Add the value of every destroyed obstacle to the score
pub fn score_hits(session: &mut SessionState, hits: &[Destroyed]) {
    for hit in hits {
        session.score += hit.score;
    }
}

/// Whether the ship overlaps any live obstacle
///
/// Returns a single yes/no so that several overlapping blocks still count as
/// one hit.
pub fn ship_hit(ship: &Ship, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .filter(|o| o.alive)
        .any(|o| ship.collides_with(o))
}

/// Number of particles for a fragment of `fragment_len` characters
///
/// 1.5 per character rounded, at least one, at most `cap`. A cap of zero
/// disables bursts.
pub fn burst_size(fragment_len: usize, cap: usize) -> usize {
    if cap == 0 {
        return 0;
    }
    let count = (fragment_len as f32 * PARTICLE_COUNT_MULTIPLIER).round() as usize;
    count.max(1).min(cap)
}

/// Spawn the particle burst for a destroyed obstacle
///
/// Glyphs cycle through the fragment. Each particle flies in a random
/// direction at a random speed from a point jittered around the center.
pub fn spawn_burst<R: Rng + ?Sized>(
    debris: &Destroyed,
    now: u64,
    cap: usize,
    rng: &mut R,
) -> Vec<Particle> {
    let glyphs: Vec<char> = debris.fragment.chars().collect();
    let count = burst_size(glyphs.len(), cap);
    let jitter = debris.radius * PARTICLE_JITTER_FACTOR;

    let particles: Vec<Particle> = (0..count)
        .map(|i| {
            let glyph = if glyphs.is_empty() {
                DEFAULT_GLYPH
            } else {
                glyphs[i % glyphs.len()]
            };
            let angle = rng.random_range(0.0..360.0);
            let speed = rng.random_range(PARTICLE_SPEED_MIN..=PARTICLE_SPEED_MAX);
            let offset = Vec2::new(
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            );
            Particle {
                pos: debris.pos + offset,
                vel: heading_vector(angle) * speed,
                glyph,
                color: PARTICLE_COLOR,
                spawned_at: now,
                lifespan_ms: PARTICLE_LIFESPAN_MS,
                alive: true,
            }
        })
        .collect();

    log::debug!(
        "Block {} burst into {} particles",
        debris.obstacle_id,
        particles.len()
    );
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::SizeClass;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn block(id: u32, pos: Vec2, size: SizeClass, text: &str) -> Obstacle {
        Obstacle::new(id, pos, Vec2::ZERO, size, text.to_string())
    }

    fn shot(id: u32, pos: Vec2) -> Projectile {
        Projectile {
            id,
            pos,
            vel: Vec2::ZERO,
            spawned_at: 0,
            alive: true,
        }
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(20.0, 0.0), 5.0));
    }

    #[test]
    fn test_single_projectile_destroys_one_obstacle() {
        // Two overlapping blocks, one shot in the middle of both
        let mut obstacles = vec![
            block(1, Vec2::new(100.0, 100.0), SizeClass::Large, "abc"),
            block(2, Vec2::new(110.0, 100.0), SizeClass::Large, "def"),
        ];
        let mut projectiles = vec![shot(10, Vec2::new(105.0, 100.0))];

        let hits = find_projectile_hits(&mut projectiles, &mut obstacles);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].obstacle_id, 1);
        assert!(!projectiles[0].alive);
        assert!(!obstacles[0].alive);
        assert!(obstacles[1].alive);
    }

    #[test]
    fn test_two_projectiles_one_obstacle_scores_once() {
        let mut obstacles = vec![block(1, Vec2::new(100.0, 100.0), SizeClass::Small, "x")];
        let mut projectiles = vec![
            shot(10, Vec2::new(100.0, 100.0)),
            shot(11, Vec2::new(101.0, 100.0)),
        ];

        let hits = find_projectile_hits(&mut projectiles, &mut obstacles);
        assert_eq!(hits.len(), 1);
        assert!(!projectiles[0].alive);
        // Second shot flies on: its target was already gone
        assert!(projectiles[1].alive);

        let mut session = SessionState::new(3, 0);
        score_hits(&mut session, &hits);
        assert_eq!(session.score, 100);
    }

    #[test]
    fn test_dead_entities_ignored() {
        let mut obstacles = vec![block(1, Vec2::new(100.0, 100.0), SizeClass::Large, "x")];
        let mut projectiles = vec![shot(10, Vec2::new(100.0, 100.0))];
        projectiles[0].alive = false;
        assert!(find_projectile_hits(&mut projectiles, &mut obstacles).is_empty());

        projectiles[0].alive = true;
        obstacles[0].alive = false;
        assert!(find_projectile_hits(&mut projectiles, &mut obstacles).is_empty());
    }

    #[test]
    fn test_score_values_per_size() {
        let mut session = SessionState::new(3, 0);
        for (size, value) in [
            (SizeClass::Large, 20),
            (SizeClass::Medium, 50),
            (SizeClass::Small, 100),
        ] {
            let before = session.score;
            let mut obstacles = vec![block(1, Vec2::ZERO, size, "abc")];
            let mut projectiles = vec![shot(1, Vec2::ZERO)];
            let hits = find_projectile_hits(&mut projectiles, &mut obstacles);
            score_hits(&mut session, &hits);
            assert_eq!(session.score - before, value);
        }
    }

    #[test]
    fn test_ship_hit() {
        let ship = Ship::new(Vec2::new(400.0, 300.0));
        let far = vec![block(1, Vec2::new(100.0, 100.0), SizeClass::Large, "x")];
        assert!(!ship_hit(&ship, &far));

        let near = vec![
            block(1, Vec2::new(420.0, 300.0), SizeClass::Large, "x"),
            block(2, Vec2::new(380.0, 300.0), SizeClass::Large, "y"),
        ];
        assert!(ship_hit(&ship, &near));
    }

    #[test]
    fn test_burst_size() {
        assert_eq!(burst_size(8, 50), 12);
        assert_eq!(burst_size(0, 50), 1);
        assert_eq!(burst_size(1, 50), 2);
        assert_eq!(burst_size(30, 50), 45);
        assert_eq!(burst_size(100, 50), 50);
        assert_eq!(burst_size(8, 0), 0);
    }

    #[test]
    fn test_spawn_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(5);
        let debris = Destroyed {
            obstacle_id: 1,
            pos: Vec2::new(200.0, 200.0),
            radius: 45.0,
            fragment: "fn main".to_string(),
            score: 20,
        };
        let particles = spawn_burst(&debris, 1000, MAX_PARTICLES_PER_BURST, &mut rng);
        assert_eq!(particles.len(), 11);
        let glyphs: String = particles.iter().take(7).map(|p| p.glyph).collect();
        assert_eq!(glyphs, "fn main");
        for p in &particles {
            assert!((p.pos.x - 200.0).abs() <= 22.5 + 1e-3);
            assert!((p.pos.y - 200.0).abs() <= 22.5 + 1e-3);
            let speed = p.vel.length();
            assert!(speed >= PARTICLE_SPEED_MIN - 1e-3 && speed <= PARTICLE_SPEED_MAX + 1e-3);
            assert_eq!(p.remaining_ms(1000), PARTICLE_LIFESPAN_MS);
        }
    }

    #[test]
    fn test_spawn_burst_empty_fragment() {
        let mut rng = Pcg32::seed_from_u64(5);
        let debris = Destroyed {
            obstacle_id: 1,
            pos: Vec2::ZERO,
            radius: 0.0,
            fragment: String::new(),
            score: 20,
        };
        let particles = spawn_burst(&debris, 0, MAX_PARTICLES_PER_BURST, &mut rng);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].glyph, DEFAULT_GLYPH);
        assert_eq!(particles[0].pos, Vec2::ZERO);
    }
}
