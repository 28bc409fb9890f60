//! Code Asteroids - shoot drifting blocks of code before they hit your ship
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, waves, phases)
//! - `renderer`: Renderer interface plus a headless log renderer
//! - `platform`: Clock and input source abstractions
//! - `runner`: Paced session loop tying platform, sim and renderer together
//! - `settings`: Runtime configuration loaded from JSON
//! - `snippets`: Code fragments carried by obstacles

pub mod error;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod snippets;

pub use error::SettingsError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Velocities and accelerations are per frame; durations are milliseconds.
pub mod consts {
    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Target frame rate of the external ticker
    pub const TARGET_FPS: u32 = 60;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 15.0;
    pub const SHIP_THRUST: f32 = 0.2;
    pub const SHIP_ROTATION_SPEED: f32 = 3.0; // degrees per frame
    pub const SHIP_MAX_SPEED: f32 = 8.0;
    pub const SHIP_DRAG: f32 = 0.995;
    pub const SHIP_COLLISION_RADIUS: f32 = SHIP_SIZE * 1.2;
    /// Facing screen-up (y grows downward)
    pub const SHIP_START_HEADING: f32 = 270.0;
    pub const SHIP_START_LIVES: u32 = 3;
    pub const INVINCIBILITY_DURATION_MS: u64 = 3000;
    pub const BLINK_INTERVAL_MS: u64 = 100;
    /// Thrust flame length behind the ship
    pub const FLAME_LENGTH: f32 = SHIP_SIZE * 1.2;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_LIFESPAN_MS: u64 = 1000;
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Obstacle (code block) defaults
    pub const OBSTACLE_SPEED_MIN: f32 = 1.0;
    pub const OBSTACLE_SPEED_MAX: f32 = 4.0;
    /// Absolute ceiling for level-scaled obstacle speed
    pub const OBSTACLE_SPEED_CAP: f32 = 8.0;
    pub const OBSTACLE_SPEED_PER_LEVEL: f32 = 0.5;
    pub const OBSTACLE_START_COUNT: usize = 4;
    pub const OBSTACLE_COUNT_PER_LEVEL: usize = 2;
    pub const OBSTACLE_MAX_COUNT: usize = 15;
    /// Collision radius as a multiple of the visual scale
    pub const OBSTACLE_RADIUS_FACTOR: f32 = 1.5;
    pub const SAFE_DISTANCE_SHRINK_PER_LEVEL: f32 = 10.0;
    pub const SAFE_DISTANCE_MIN: f32 = 100.0;

    /// Particle defaults
    pub const PARTICLE_LIFESPAN_MS: u64 = 800;
    pub const PARTICLE_SPEED_MIN: f32 = 1.0;
    pub const PARTICLE_SPEED_MAX: f32 = 5.0;
    pub const PARTICLE_DRAG: f32 = 0.98;
    /// Particles emitted per character of the destroyed fragment
    pub const PARTICLE_COUNT_MULTIPLIER: f32 = 1.5;
    pub const MAX_PARTICLES_PER_BURST: usize = 50;
    /// Spawn jitter as a fraction of the obstacle's collision radius
    pub const PARTICLE_JITTER_FACTOR: f32 = 0.5;
    pub const PARTICLE_COLOR: u32 = 0xFFFF00;

    /// Phase timers
    pub const WAIT_FOR_LEVEL_START_MS: u64 = 3000;
    pub const GAME_OVER_HOLD_MS: u64 = 5000;
    /// Fraction of the wait during which the level banner is shown
    pub const LEVEL_BANNER_FRACTION: f32 = 0.75;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector pointing along a heading given in degrees
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Wrap a position onto the screen torus so that 0 <= x < width and 0 <= y < height
#[inline]
pub fn wrap_position(pos: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, bounds.x), wrap_axis(pos.y, bounds.y))
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Rotate a ship-local point (defined with the nose pointing up) to a heading.
///
/// Local shapes point toward -y, which is a heading of 270 degrees, so the
/// point is rotated by the difference.
#[inline]
pub fn rotate_local(point: Vec2, heading_degrees: f32) -> Vec2 {
    let rotation = (heading_degrees - consts::SHIP_START_HEADING).to_radians();
    Vec2::from_angle(rotation).rotate(point)
}
