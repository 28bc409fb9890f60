//! Input sources
//!
//! The simulation only sees [`InputEvent`] edges. A windowing backend would
//! translate key presses into them; the sources here are the built-in demo
//! pilot and a scripted source for tests.

use std::collections::VecDeque;

use crate::sim::{GamePhase, GameState, InputEvent};

/// Anything that can produce input edges for a frame
pub trait InputSource {
    /// Events for the coming frame, in the order they happened
    fn poll(&mut self, state: &GameState, now: u64) -> Vec<InputEvent>;
}

/// Replays a fixed list of `(frame, event)` pairs
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, InputEvent)>,
    frame: u64,
}

impl ScriptedInput {
    /// Events must be sorted by frame
    pub fn new(script: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            frame: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.script.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState, _now: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(&(frame, event)) = self.script.front() {
            if frame > self.frame {
                break;
            }
            events.push(event);
            self.script.pop_front();
        }
        self.frame += 1;
        events
    }
}

/// Heading error (degrees) under which the pilot stops turning
const AIM_TOLERANCE: f32 = 4.0;
/// Heading error under which the pilot opens fire
const FIRE_CONE: f32 = 10.0;
/// Frames between shots (each shot is a fresh press)
const FIRE_INTERVAL_FRAMES: u64 = 8;
/// Targets farther than this are approached under thrust
const APPROACH_DISTANCE: f32 = 250.0;
/// Pilot never thrusts above this speed
const CRUISE_SPEED: f32 = 3.0;

/// Demo pilot: turns toward the nearest block, shoots when lined up and
/// drifts closer when targets are far. After a game over it restarts until
/// it has played `games` runs, then quits.
#[derive(Debug, Clone)]
pub struct Autopilot {
    games: u32,
    frame: u64,
    left: bool,
    right: bool,
    thrust: bool,
}

impl Autopilot {
    pub fn new(games: u32) -> Self {
        Self {
            games: games.max(1),
            frame: 0,
            left: false,
            right: false,
            thrust: false,
        }
    }

    /// Emit a press/release edge only when the desired key state changes
    fn set_key(
        current: &mut bool,
        desired: bool,
        make: fn(bool) -> InputEvent,
        events: &mut Vec<InputEvent>,
    ) {
        if *current != desired {
            *current = desired;
            events.push(make(desired));
        }
    }

    fn steer(&mut self, state: &GameState, events: &mut Vec<InputEvent>) {
        let ship = &state.ship;
        let nearest = state
            .obstacles
            .iter()
            .filter(|o| o.alive)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .partial_cmp(&b.pos.distance_squared(ship.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let (left, right, thrust, fire) = match nearest {
            Some(target) => {
                let to_target = target.pos - ship.pos;
                let desired = to_target.y.atan2(to_target.x).to_degrees();
                // Signed error in (-180, 180]; positive means turn clockwise
                let error = (desired - ship.heading + 540.0).rem_euclid(360.0) - 180.0;
                let far = to_target.length() > APPROACH_DISTANCE;
                let slow = ship.vel.length() < CRUISE_SPEED;
                (
                    error < -AIM_TOLERANCE,
                    error > AIM_TOLERANCE,
                    far && slow && error.abs() < FIRE_CONE,
                    error.abs() < FIRE_CONE && self.frame % FIRE_INTERVAL_FRAMES == 0,
                )
            }
            None => (false, false, false, false),
        };

        Self::set_key(&mut self.left, left, InputEvent::RotateLeft, events);
        Self::set_key(&mut self.right, right, InputEvent::RotateRight, events);
        Self::set_key(&mut self.thrust, thrust, InputEvent::Thrust, events);
        if fire {
            events.push(InputEvent::Fire);
        }
    }

    fn release_all(&mut self, events: &mut Vec<InputEvent>) {
        Self::set_key(&mut self.left, false, InputEvent::RotateLeft, events);
        Self::set_key(&mut self.right, false, InputEvent::RotateRight, events);
        Self::set_key(&mut self.thrust, false, InputEvent::Thrust, events);
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState, now: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        self.frame += 1;

        match state.session.phase {
            GamePhase::Playing => self.steer(state, &mut events),
            GamePhase::Waiting => self.release_all(&mut events),
            GamePhase::GameOver => {
                self.release_all(&mut events);
                if state.session.can_restart(now) {
                    if state.session.games_played >= self.games {
                        events.push(InputEvent::Quit);
                    } else {
                        events.push(InputEvent::Restart);
                    }
                }
            }
        }

        events
    }
}
