//! Entity types and their per-frame update rules
//!
//! Every moving thing in the arena advances exactly one frame per
//! [`Updatable::update`] call. Entities that can die carry an `alive` flag:
//! destroying one only clears the flag, and the owning collection is
//! compacted once the pass is over.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::snippets::PLACEHOLDER_FRAGMENT;
use crate::{heading_vector, normalize_degrees, rotate_local, wrap_position};

/// Advance one frame
pub trait Updatable {
    fn update(&mut self, now: u64, bounds: Vec2);
}

/// Timed invulnerability after a (re)spawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invincibility {
    pub active: bool,
    /// Clock time the invincibility was granted
    pub started_at: u64,
    /// Blink state for renderers (ship drawn when on)
    pub blink_on: bool,
    pub last_blink_at: u64,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees, [0, 360). y grows downward, so 270 faces up.
    pub heading: f32,
    pub thrusting: bool,
    pub rotating_left: bool,
    pub rotating_right: bool,
    /// Hidden ships neither move, shoot nor render
    pub visible: bool,
    pub invincibility: Invincibility,
}

impl Ship {
    /// New ship at the given position, facing up, at rest
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: SHIP_START_HEADING,
            thrusting: false,
            rotating_left: false,
            rotating_right: false,
            visible: true,
            invincibility: Invincibility::default(),
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.active
    }

    /// Start the invincibility timer (also makes the ship visible)
    pub fn activate_invincibility(&mut self, now: u64) {
        self.visible = true;
        self.invincibility = Invincibility {
            active: true,
            started_at: now,
            blink_on: true,
            last_blink_at: now,
        };
    }

    /// Put the ship back at `pos`, at rest and invincible
    pub fn respawn(&mut self, pos: Vec2, now: u64) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.activate_invincibility(now);
    }

    /// Whether a renderer should draw the ship this frame
    pub fn is_drawn(&self) -> bool {
        self.visible && (!self.invincibility.active || self.invincibility.blink_on)
    }

    /// Nose, left corner and right corner in world coordinates
    pub fn outline(&self) -> [Vec2; 3] {
        [
            Vec2::new(0.0, -SHIP_SIZE * 1.5),
            Vec2::new(-SHIP_SIZE, SHIP_SIZE * 1.5),
            Vec2::new(SHIP_SIZE, SHIP_SIZE * 1.5),
        ]
        .map(|p| self.pos + rotate_local(p, self.heading))
    }

    /// Thrust flame triangle in world coordinates, when thrusting
    pub fn flame(&self) -> Option<[Vec2; 3]> {
        if !self.thrusting {
            return None;
        }
        Some(
            [
                Vec2::new(-SHIP_SIZE * 0.8, SHIP_SIZE * 1.5),
                Vec2::new(0.0, SHIP_SIZE * 1.5 + FLAME_LENGTH),
                Vec2::new(SHIP_SIZE * 0.8, SHIP_SIZE * 1.5),
            ]
            .map(|p| self.pos + rotate_local(p, self.heading)),
        )
    }

    /// Tip of the ship, where projectiles spawn
    pub fn nose(&self) -> Vec2 {
        self.outline()[0]
    }

    /// Fire a projectile from the nose along the heading
    ///
    /// Returns `None` while the ship is hidden.
    pub fn shoot(&self, id: u32, now: u64) -> Option<Projectile> {
        if !self.visible {
            return None;
        }
        Some(Projectile {
            id,
            pos: self.nose(),
            vel: heading_vector(self.heading) * PROJECTILE_SPEED,
            spawned_at: now,
            alive: true,
        })
    }

    fn update_invincibility(&mut self, now: u64) {
        let inv = &mut self.invincibility;
        if !inv.active {
            return;
        }
        if now.saturating_sub(inv.started_at) > INVINCIBILITY_DURATION_MS {
            inv.active = false;
            self.visible = true;
        } else if now.saturating_sub(inv.last_blink_at) > BLINK_INTERVAL_MS {
            inv.blink_on = !inv.blink_on;
            inv.last_blink_at = now;
        }
    }
}

impl Updatable for Ship {
    fn update(&mut self, now: u64, bounds: Vec2) {
        if !self.visible {
            return;
        }

        // Decreasing heading turns counter-clockwise on a y-down screen
        if self.rotating_left {
            self.heading -= SHIP_ROTATION_SPEED;
        }
        if self.rotating_right {
            self.heading += SHIP_ROTATION_SPEED;
        }
        self.heading = normalize_degrees(self.heading);

        if self.thrusting {
            self.vel += heading_vector(self.heading) * SHIP_THRUST;
        }

        self.vel *= SHIP_DRAG;
        self.vel = self.vel.clamp_length_max(SHIP_MAX_SPEED);

        self.pos = wrap_position(self.pos + self.vel, bounds);

        self.update_invincibility(now);
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub spawned_at: u64,
    pub alive: bool,
}

impl Projectile {
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.spawned_at)
    }
}

impl Updatable for Projectile {
    fn update(&mut self, now: u64, bounds: Vec2) {
        self.pos = wrap_position(self.pos + self.vel, bounds);
        if self.age(now) > PROJECTILE_LIFESPAN_MS {
            self.alive = false;
        }
    }
}

/// Obstacle size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeClass {
    #[default]
    Large,
    Medium,
    Small,
}

impl SizeClass {
    /// Visual scale (font size for the fragment)
    pub fn scale(&self) -> f32 {
        match self {
            SizeClass::Large => 30.0,
            SizeClass::Medium => 20.0,
            SizeClass::Small => 15.0,
        }
    }

    /// Characters of code shown on the block
    pub fn text_length(&self) -> usize {
        match self {
            SizeClass::Large => 30,
            SizeClass::Medium => 15,
            SizeClass::Small => 8,
        }
    }

    /// Declared child count on destruction. Blocks never actually split.
    pub fn split_factor(&self) -> u32 {
        match self {
            SizeClass::Large | SizeClass::Medium => 2,
            SizeClass::Small => 0,
        }
    }

    /// Points for destroying a block of this size (smaller is worth more)
    pub fn score(&self) -> u64 {
        match self {
            SizeClass::Large => 20,
            SizeClass::Medium => 50,
            SizeClass::Small => 100,
        }
    }

    pub fn collision_radius(&self) -> f32 {
        self.scale() * OBSTACLE_RADIUS_FACTOR
    }
}

/// A drifting block of code
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: SizeClass,
    /// Cosmetic code text; never empty
    pub fragment: String,
    pub alive: bool,
}

/// What is left of an obstacle after it is destroyed
#[derive(Debug, Clone, PartialEq)]
pub struct Destroyed {
    pub obstacle_id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub fragment: String,
    pub score: u64,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: SizeClass, fragment: String) -> Self {
        let fragment = if fragment.is_empty() {
            log::warn!("Obstacle {} created without text, using placeholder", id);
            PLACEHOLDER_FRAGMENT.to_string()
        } else {
            fragment
        };
        Self {
            id,
            pos,
            vel,
            size,
            fragment,
            alive: true,
        }
    }

    pub fn score(&self) -> u64 {
        self.size.score()
    }

    /// Destroy the obstacle, returning its text and score value.
    ///
    /// Returns `None` if it was already destroyed, so a block can only ever
    /// be scored once.
    pub fn destroy(&mut self) -> Option<Destroyed> {
        if !self.alive {
            return None;
        }
        self.alive = false;
        Some(Destroyed {
            obstacle_id: self.id,
            pos: self.pos,
            radius: self.size.collision_radius(),
            fragment: self.fragment.clone(),
            score: self.score(),
        })
    }
}

impl Updatable for Obstacle {
    fn update(&mut self, _now: u64, bounds: Vec2) {
        self.pos = wrap_position(self.pos + self.vel, bounds);
    }
}

/// A single glyph flying out of a destroyed block
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub glyph: char,
    pub color: u32,
    pub spawned_at: u64,
    pub lifespan_ms: u64,
    pub alive: bool,
}

impl Particle {
    /// Milliseconds left before the particle expires
    pub fn remaining_ms(&self, now: u64) -> u64 {
        self.lifespan_ms
            .saturating_sub(now.saturating_sub(self.spawned_at))
    }
}

impl Updatable for Particle {
    fn update(&mut self, now: u64, _bounds: Vec2) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DRAG;
        if now.saturating_sub(self.spawned_at) > self.lifespan_ms {
            self.alive = false;
        }
    }
}
