//! Straight-line projectiles (player plasma and station shots)
//!
//! Velocity is fixed at creation. There is no time-to-live: a projectile lives
//! until it leaves the padded camera view.

use glam::Vec2;

use super::camera::Camera;
use crate::consts::VIEW_MARGIN;

/// A plasma bolt or station shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    /// Player plasma: fired along the nose, inheriting the ship's momentum
    pub fn plasma(origin: Vec2, facing: Vec2, ship_vel: Vec2, speed: f32) -> Self {
        Self {
            pos: origin,
            vel: facing * speed + ship_vel,
        }
    }

    /// Station shot along `angle`
    pub fn station_shot(origin: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            pos: origin,
            vel: crate::unit_vector(angle) * speed,
        }
    }
}

/// Advance every projectile one frame, then drop those outside the padded view
pub fn integrate_and_cull(projectiles: &mut Vec<Projectile>, camera: &Camera) {
    for p in projectiles.iter_mut() {
        p.pos += p.vel;
    }
    projectiles.retain(|p| camera.contains(p.pos, VIEW_MARGIN));
}
