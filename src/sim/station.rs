//! Hostile turret stations
//!
//! Each station runs a small state machine:
//!
//! ```text
//! Spawning ──► Idle ◄──► Bursting
//!                ▲  ╲
//!                │   ╲ (ship destroyed)
//!                └── Wandering
//! ```
//!
//! Body movement (orbiting the ship) and turret aiming are independent; the
//! turret decides when to fire through [`step_fire_control`], a pure transition
//! function fed with pre-rolled randomness.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::projectile::Projectile;
use crate::consts::*;
use crate::tuning::LevelParams;
use crate::{normalize_angle, shortest_angle_delta, unit_vector};

/// Station behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationState {
    /// Phasing in: drifts slowly, no AI
    Spawning { frames_left: u32 },
    /// Tracking the ship, waiting for cooldown and a clean aim
    Idle,
    /// Emitting a burst
    Bursting { remaining: u32, next_shot_in: u32 },
    /// Ship is down: coast on the assigned wander velocity
    Wandering,
}

/// Circular path around the ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    pub angle: f32,
    /// Radians per frame (sign picks direction)
    pub speed: f32,
}

/// What a station can see of the ship this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationTarget {
    pub pos: Vec2,
    /// Ship lies inside the padded viewport
    pub on_screen: bool,
}

/// An enemy station
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cruise speed (world units per frame)
    pub speed: f32,
    /// Steering smoothing factor (0-1)
    pub turn_rate: f32,
    /// Base cooldown between bursts (frames)
    pub fire_rate: u32,
    /// Frames until the next burst may start
    pub cooldown: u32,
    pub gun_angle: f32,
    pub gun_turn_rate: f32,
    pub orbit: Orbit,
    /// Cosmetic hull rotation
    pub spin_angle: f32,
    pub spin_speed: f32,
    pub state: StationState,
}

impl Station {
    /// Fully initialised station phasing in at `pos`, oriented on `ship_pos`
    pub fn new<R: Rng + ?Sized>(pos: Vec2, ship_pos: Vec2, params: &LevelParams, rng: &mut R) -> Self {
        let from_ship = pos - ship_pos;
        let bearing_to_ship = (-from_ship).y.atan2(-from_ship.x);
        let orbit_dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let spin_dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        Self {
            pos,
            vel: wander_velocity(rng, params.station_speed),
            radius: STATION_RADIUS,
            speed: params.station_speed,
            turn_rate: STATION_TURN_RATE,
            fire_rate: params.station_fire_rate,
            cooldown: params.station_fire_rate / 2 + rng.random_range(0..=params.station_fire_rate / 2),
            gun_angle: bearing_to_ship,
            gun_turn_rate: rng.random_range(GUN_TURN_RATE_MIN..=GUN_TURN_RATE_MAX),
            orbit: Orbit {
                radius: ORBIT_RADIUS + rng.random_range(-ORBIT_RADIUS_JITTER..=ORBIT_RADIUS_JITTER),
                angle: from_ship.y.atan2(from_ship.x),
                speed: rng.random_range(ORBIT_SPEED_MIN..ORBIT_SPEED_MAX) * orbit_dir,
            },
            spin_angle: rng.random_range(0.0..TAU),
            spin_speed: rng.random_range(0.005..0.02) * spin_dir,
            state: StationState::Spawning {
                frames_left: STATION_SPAWN_FRAMES,
            },
        }
    }

    #[inline]
    pub fn is_spawning(&self) -> bool {
        matches!(self.state, StationState::Spawning { .. })
    }

    /// Ship went down: pick a fresh drift and drop any burst in progress
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.vel = wander_velocity(rng, self.speed);
        if !self.is_spawning() {
            self.state = StationState::Wandering;
        }
    }

    /// Advance one frame. Returns a shot if the turret fired.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        target: Option<StationTarget>,
        shot_speed: f32,
        rng: &mut R,
    ) -> Option<Projectile> {
        self.spin_angle = normalize_angle(self.spin_angle + self.spin_speed);

        if let StationState::Spawning { frames_left } = self.state {
            self.pos += self.vel * SPAWN_DRIFT_FACTOR;
            let frames_left = frames_left.saturating_sub(1);
            self.state = match (frames_left, target) {
                (0, Some(_)) => StationState::Idle,
                (0, None) => StationState::Wandering,
                _ => StationState::Spawning { frames_left },
            };
            return None;
        }

        let Some(target) = target else {
            self.state = StationState::Wandering;
            self.pos += self.vel;
            return None;
        };

        if self.state == StationState::Wandering {
            self.state = StationState::Idle;
        }

        self.steer_toward_orbit(target.pos);
        self.pos += self.vel;
        self.aim_turret(target.pos);

        let to_ship = target.pos - self.pos;
        let bearing = to_ship.y.atan2(to_ship.x);
        let gate = FireGate {
            open: target.on_screen && to_ship.length() <= MAX_FIRE_DIST,
            aim_error: shortest_angle_delta(self.gun_angle, bearing),
        };

        let rolls = FireRolls::roll(rng);
        let step = step_fire_control(self.state, self.cooldown, self.fire_rate, gate, &rolls);
        self.state = step.state;
        self.cooldown = step.cooldown;

        step.shot_spread
            .map(|spread| Projectile::station_shot(self.pos, self.gun_angle + spread, shot_speed))
    }

    /// Exponentially steer toward the current orbit point around the ship
    fn steer_toward_orbit(&mut self, ship_pos: Vec2) {
        self.orbit.angle = normalize_angle(self.orbit.angle + self.orbit.speed);
        let goal = ship_pos + unit_vector(self.orbit.angle) * self.orbit.radius;

        let to_goal = goal - self.pos;
        let dist = to_goal.length();
        if dist < MIN_STEER_DISTANCE {
            return;
        }

        let desired = to_goal / dist * self.speed.min(dist);
        self.vel += (desired - self.vel) * self.turn_rate;
    }

    /// Swing the turret toward the ship along the short way round
    fn aim_turret(&mut self, ship_pos: Vec2) {
        let to_ship = ship_pos - self.pos;
        let desired = to_ship.y.atan2(to_ship.x);
        let delta = shortest_angle_delta(self.gun_angle, desired);
        self.gun_angle = normalize_angle(self.gun_angle + delta * self.gun_turn_rate);
    }
}

/// Random drift in any direction at 50-100% of `speed`
pub fn wander_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    unit_vector(angle) * speed * rng.random_range(0.5..=1.0)
}

/// Firing conditions seen by the turret this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireGate {
    /// Ship alive, on screen and within `MAX_FIRE_DIST`
    pub open: bool,
    /// Signed gap between gun angle and bearing to the ship
    pub aim_error: f32,
}

/// Randomness consumed by one fire-control step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRolls {
    pub aim_jitter: f32,
    pub burst_len: u32,
    pub shot_delay: u32,
    pub spread: f32,
    pub cooldown_mult: f32,
}

impl FireRolls {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            aim_jitter: rng.random_range(-AIM_JITTER..=AIM_JITTER),
            burst_len: rng.random_range(BURST_MIN_SHOTS..=BURST_MAX_SHOTS),
            shot_delay: rng.random_range(BURST_MIN_DELAY..=BURST_MAX_DELAY),
            spread: rng.random_range(-SHOT_SPREAD..=SHOT_SPREAD),
            cooldown_mult: rng.random_range(COOLDOWN_MIN_MULT..=COOLDOWN_MAX_MULT),
        }
    }

    /// Rolls with no noise (tests, scripted scenarios)
    pub fn steady(burst_len: u32) -> Self {
        Self {
            aim_jitter: 0.0,
            burst_len,
            shot_delay: BURST_MIN_DELAY,
            spread: 0.0,
            cooldown_mult: COOLDOWN_MIN_MULT,
        }
    }
}

/// Outcome of one fire-control step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireStep {
    pub state: StationState,
    pub cooldown: u32,
    /// Angular offset of the shot fired this frame, if any
    pub shot_spread: Option<f32>,
}

/// Turret transition: Idle arms a burst when cooled down and on target,
/// Bursting spaces its shots and re-arms the cooldown when done.
/// Spawning and Wandering stations never fire.
pub fn step_fire_control(
    state: StationState,
    cooldown: u32,
    fire_rate: u32,
    gate: FireGate,
    rolls: &FireRolls,
) -> FireStep {
    let rearm = || (fire_rate as f32 * rolls.cooldown_mult).round() as u32;
    let hold = |state| FireStep {
        state,
        cooldown,
        shot_spread: None,
    };

    match state {
        StationState::Spawning { .. } | StationState::Wandering => hold(state),

        StationState::Idle => {
            let cooldown = cooldown.saturating_sub(1);
            let on_target = (gate.aim_error + rolls.aim_jitter).abs() <= AIM_TOLERANCE;
            let state = if gate.open && cooldown == 0 && on_target {
                StationState::Bursting {
                    remaining: rolls.burst_len.max(1),
                    next_shot_in: 0,
                }
            } else {
                StationState::Idle
            };
            FireStep {
                state,
                cooldown,
                shot_spread: None,
            }
        }

        StationState::Bursting { .. } if !gate.open => FireStep {
            state: StationState::Idle,
            cooldown: rearm(),
            shot_spread: None,
        },

        StationState::Bursting {
            remaining,
            next_shot_in,
        } if next_shot_in > 0 => hold(StationState::Bursting {
            remaining,
            next_shot_in: next_shot_in - 1,
        }),

        StationState::Bursting { remaining, .. } => {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                FireStep {
                    state: StationState::Idle,
                    cooldown: rearm(),
                    shot_spread: Some(rolls.spread),
                }
            } else {
                FireStep {
                    state: StationState::Bursting {
                        remaining,
                        next_shot_in: rolls.shot_delay.saturating_sub(1),
                    },
                    cooldown,
                    shot_spread: Some(rolls.spread),
                }
            }
        }
    }
}
