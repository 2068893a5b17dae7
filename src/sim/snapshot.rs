//! Read-only per-frame view handed to renderers

use glam::Vec2;

use super::camera::Camera;
use super::explosion::Explosion;
use super::projectile::Projectile;
use super::state::GamePhase;
use super::station::Station;

/// What a renderer needs to know about the ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipView {
    pub pos: Vec2,
    pub angle: f32,
    pub alive: bool,
    /// Inside the spawn-phasing window
    pub spawning: bool,
    /// 0 → 1 while phasing in, 1 otherwise
    pub fade_in: f32,
}

/// Borrowed snapshot of everything drawable
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub camera: Camera,
    pub ship: ShipView,
    pub stations: &'a [Station],
    pub plasma: &'a [Projectile],
    pub station_shots: &'a [Projectile],
    pub explosions: &'a [Explosion],
    pub ship_explosion: Option<&'a Explosion>,
    pub level: u32,
    pub lives: u32,
    pub phase: GamePhase,
}
