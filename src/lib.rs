//! Station Siege - an open-world arcade space shooter
//!
//! Core modules:
//! - `sim`: Simulation core (ship, stations, projectiles, collisions, progression)
//! - `session`: Frame orchestration and the session control surface
//! - `starfield`: Procedural infinite background
//! - `renderer`: Rendering seam (Canvas2D on the web)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (mute)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod starfield;
pub mod tuning;

pub use session::Session;
pub use settings::Settings;
pub use tuning::{LevelParams, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frames the ship stays destroyed before respawning (2 s at 60 Hz)
    pub const SHIP_RESPAWN_FRAMES: u32 = 120;
    /// Spawn-phasing window for the ship (invulnerable, fading in)
    pub const SHIP_SPAWN_FRAMES: u32 = 60;
    /// Spawn-phasing window for stations (inert, drifting)
    pub const STATION_SPAWN_FRAMES: u32 = 60;

    /// Collision radii
    pub const SHIP_RADIUS: f32 = 16.0;
    pub const STATION_RADIUS: f32 = 30.0;
    pub const PLASMA_RADIUS: f32 = 4.0;
    pub const STATION_SHOT_RADIUS: f32 = 5.0;

    /// Padding around the viewport for culling and on-screen checks
    pub const VIEW_MARGIN: f32 = 50.0;

    /// Default viewport (canvas) size
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Station turret AI
    pub const MAX_FIRE_DIST: f32 = 1000.0;
    pub const AIM_TOLERANCE: f32 = 0.22;
    pub const AIM_JITTER: f32 = 0.05;
    pub const SHOT_SPREAD: f32 = 0.07;
    pub const BURST_MIN_SHOTS: u32 = 1;
    pub const BURST_MAX_SHOTS: u32 = 3;
    pub const BURST_MIN_DELAY: u32 = 6;
    pub const BURST_MAX_DELAY: u32 = 9;
    pub const COOLDOWN_MIN_MULT: f32 = 1.2;
    pub const COOLDOWN_MAX_MULT: f32 = 2.0;

    /// Station movement
    pub const STATION_TURN_RATE: f32 = 0.12;
    pub const GUN_TURN_RATE_MIN: f32 = 0.15;
    pub const GUN_TURN_RATE_MAX: f32 = 0.18;
    pub const ORBIT_RADIUS: f32 = 200.0;
    pub const ORBIT_RADIUS_JITTER: f32 = 20.0;
    pub const ORBIT_SPEED_MIN: f32 = 0.004;
    pub const ORBIT_SPEED_MAX: f32 = 0.012;
    /// Fraction of velocity applied while a station phases in
    pub const SPAWN_DRIFT_FACTOR: f32 = 0.2;
    /// Below this distance to its orbit point a station skips steering
    pub const MIN_STEER_DISTANCE: f32 = 1.0;

    /// Wave spawn ring around the ship
    pub const WAVE_SPAWN_MIN_DIST: f32 = 450.0;
    pub const WAVE_SPAWN_MAX_DIST: f32 = 750.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Signed shortest rotation taking `from` onto `to`, in [-π, π)
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn unit_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
