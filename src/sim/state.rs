//! Simulation state aggregate
//!
//! Everything the session owns for one play-through lives here and is threaded
//! explicitly through the tick pipeline.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::events::GameEvent;
use super::explosion::Explosion;
use super::progression::Progression;
use super::projectile::Projectile;
use super::ship::Ship;
use super::snapshot::{RenderFrame, ShipView};
use super::station::Station;
use crate::consts::{SHIP_SPAWN_FRAMES, WAVE_SPAWN_MAX_DIST, WAVE_SPAWN_MIN_DIST};
use crate::tuning::{LevelParams, Tuning};
use crate::unit_vector;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; only `restart` leaves this phase
    GameOver,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Level-scaled values for the current level
    pub params: LevelParams,
    pub phase: GamePhase,
    pub progression: Progression,
    pub ship: Ship,
    /// Stations in spawn order (collision tie-breaks follow this order)
    pub stations: Vec<Station>,
    pub plasma: Vec<Projectile>,
    pub station_shots: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    /// The ship's own explosion; respawn waits for it to fade
    pub ship_explosion: Option<Explosion>,
    pub viewport: Vec2,
    pub camera: Camera,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl SimulationState {
    /// Create a new session state with the first wave already spawned
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let params = tuning.for_level(1);
        let viewport = Vec2::new(tuning.viewport_width, tuning.viewport_height);
        let ship = Ship::new(&tuning, &params);

        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            progression: Progression::new(&tuning),
            params,
            phase: GamePhase::Playing,
            camera: Camera::centered_on(ship.pos, viewport),
            ship,
            stations: Vec::new(),
            plasma: Vec::new(),
            station_shots: Vec::new(),
            explosions: Vec::new(),
            ship_explosion: None,
            viewport,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };

        state.spawn_wave();
        state.announce_counters();
        state
    }

    /// Back to level 1 with full lives and a fresh first wave.
    /// The RNG keeps running so consecutive runs differ.
    pub fn reset(&mut self) {
        self.params = self.tuning.for_level(1);
        self.progression = Progression::new(&self.tuning);
        self.phase = GamePhase::Playing;
        self.ship = Ship::new(&self.tuning, &self.params);
        self.stations.clear();
        self.plasma.clear();
        self.station_shots.clear();
        self.explosions.clear();
        self.ship_explosion = None;
        self.time_ticks = 0;
        self.events.clear();
        self.update_camera();

        self.spawn_wave();
        self.announce_counters();
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Resize the visible area (canvas resize)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.update_camera();
    }

    /// Recentre the camera on the ship
    pub fn update_camera(&mut self) {
        self.camera = Camera::centered_on(self.ship.pos, self.viewport);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn announce_counters(&mut self) {
        self.emit(GameEvent::LevelChanged(self.progression.level));
        self.emit(GameEvent::LivesChanged(self.progression.lives));
    }

    /// Spawn `stations_per_level` stations in a ring around the ship
    pub fn spawn_wave(&mut self) {
        let count = self.progression.stations_per_level;
        let center = self.ship.pos;
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let dist = self.rng.random_range(WAVE_SPAWN_MIN_DIST..WAVE_SPAWN_MAX_DIST);
            let pos = center + unit_vector(angle) * dist;
            let station = Station::new(pos, center, &self.params, &mut self.rng);
            self.stations.push(station);
        }
        log::debug!("Spawned wave of {} stations (level {})", count, self.progression.level);
    }

    /// Wave cleared: bump the level, rescale difficulty, spawn the next wave
    pub fn advance_level(&mut self) {
        let up = self.progression.advance(&self.tuning);
        self.params = self.tuning.for_level(up.level);
        self.ship.apply_level(&self.params);

        log::info!(
            "Level {} ({} stations{})",
            up.level,
            self.params.stations_per_level,
            if up.bonus_life { ", bonus life" } else { "" }
        );
        self.emit(GameEvent::LevelChanged(up.level));
        if up.bonus_life {
            self.emit(GameEvent::LivesChanged(self.progression.lives));
        }

        self.spawn_wave();
    }

    /// Read-only view for renderers
    pub fn render_frame(&self) -> RenderFrame<'_> {
        let ship = &self.ship;
        let fade_in = if ship.spawn_timer > 0 {
            1.0 - ship.spawn_timer as f32 / SHIP_SPAWN_FRAMES as f32
        } else {
            1.0
        };

        RenderFrame {
            camera: self.camera,
            ship: ShipView {
                pos: ship.pos,
                angle: ship.angle,
                alive: ship.is_alive(),
                spawning: ship.is_spawning(),
                fade_in,
            },
            stations: &self.stations,
            plasma: &self.plasma,
            station_shots: &self.station_shots,
            explosions: &self.explosions,
            ship_explosion: self.ship_explosion.as_ref(),
            level: self.progression.level,
            lives: self.progression.lives,
            phase: self.phase,
        }
    }
}
