//! Player ship: thrust/friction integrator and the death/respawn lifecycle

use glam::Vec2;

use super::input::TickInput;
use crate::consts::{SHIP_RADIUS, SHIP_RESPAWN_FRAMES, SHIP_SPAWN_FRAMES};
use crate::tuning::{LevelParams, Tuning};
use crate::unit_vector;

/// Whether the ship is flying or waiting to respawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShipStatus {
    Alive,
    /// Exploded; returns to `respawn_at` once the timer runs out
    Destroyed { respawn_in: u32, respawn_at: Vec2 },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians, 0 = +X)
    pub angle: f32,
    pub radius: f32,
    pub thrust: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub turn_rate: f32,
    /// Frames left in the spawn-phasing window (invulnerable, fading in)
    pub spawn_timer: u32,
    pub status: ShipStatus,
}

impl Ship {
    /// A fresh ship at the origin, facing +X, at rest
    pub fn new(tuning: &Tuning, params: &LevelParams) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            radius: SHIP_RADIUS,
            thrust: params.ship_thrust,
            friction: tuning.ship_friction,
            max_speed: params.ship_max_speed,
            turn_rate: tuning.ship_turn_rate,
            spawn_timer: 0,
            status: ShipStatus::Alive,
        }
    }

    /// Pick up level-scaled handling
    pub fn apply_level(&mut self, params: &LevelParams) {
        self.thrust = params.ship_thrust;
        self.max_speed = params.ship_max_speed;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self.status, ShipStatus::Alive)
    }

    #[inline]
    pub fn is_spawning(&self) -> bool {
        self.is_alive() && self.spawn_timer > 0
    }

    /// Alive and past the spawn-phasing window
    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        self.is_alive() && self.spawn_timer == 0
    }

    /// Unit vector the nose points along
    #[inline]
    pub fn facing(&self) -> Vec2 {
        unit_vector(self.angle)
    }

    /// Integrate one frame of flight. No-op while destroyed.
    pub fn update(&mut self, input: &TickInput) {
        if !self.is_alive() {
            return;
        }

        if input.turn_left {
            self.angle -= self.turn_rate;
        }
        if input.turn_right {
            self.angle += self.turn_rate;
        }
        if input.thrust {
            self.vel += self.facing() * self.thrust;
        }

        self.vel *= self.friction;

        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed;
        }

        self.pos += self.vel;

        self.spawn_timer = self.spawn_timer.saturating_sub(1);
    }

    /// Blow the ship up; it will come back where it died
    pub fn destroy(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.status = ShipStatus::Destroyed {
            respawn_in: SHIP_RESPAWN_FRAMES,
            respawn_at: self.pos,
        };
        self.spawn_timer = 0;
    }

    /// Freeze the respawn countdown at zero (game over)
    pub fn suspend_respawn(&mut self) {
        if let ShipStatus::Destroyed { respawn_in, .. } = &mut self.status {
            *respawn_in = 0;
        }
    }

    /// Count down the respawn timer. Respawns when the timer has elapsed and
    /// `clear_to_respawn` holds. Returns true on the frame the ship reappears.
    pub fn tick_respawn(&mut self, clear_to_respawn: bool) -> bool {
        let ShipStatus::Destroyed {
            respawn_in,
            respawn_at,
        } = &mut self.status
        else {
            return false;
        };

        *respawn_in = respawn_in.saturating_sub(1);
        if *respawn_in > 0 || !clear_to_respawn {
            return false;
        }

        self.pos = *respawn_at;
        self.vel = Vec2::ZERO;
        self.spawn_timer = SHIP_SPAWN_FRAMES;
        self.status = ShipStatus::Alive;
        true
    }
}
