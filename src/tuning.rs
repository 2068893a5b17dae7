//! Data-driven game balance
//!
//! Base values plus per-level growth. Everything that scales with difficulty is
//! derived through [`Tuning::for_level`]; fixed geometry lives in `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Balance knobs, loadable from JSON. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Acceleration per frame while thrusting
    pub ship_thrust: f32,
    pub ship_thrust_per_level: f32,
    pub ship_thrust_cap: f32,
    /// Per-frame multiplicative velocity decay (< 1)
    pub ship_friction: f32,
    pub ship_max_speed: f32,
    pub ship_max_speed_per_level: f32,
    pub ship_max_speed_cap: f32,
    /// Radians per frame
    pub ship_turn_rate: f32,

    // === Plasma ===
    pub plasma_speed: f32,
    pub plasma_speed_per_level: f32,
    pub plasma_speed_cap: f32,

    // === Stations ===
    pub station_speed: f32,
    pub station_speed_per_level: f32,
    pub station_speed_cap: f32,
    /// Cooldown frames between bursts
    pub station_fire_rate: u32,
    pub station_fire_rate_step: u32,
    pub station_fire_rate_floor: u32,
    pub station_shot_speed: f32,
    pub station_shot_speed_per_level: f32,
    pub station_shot_speed_cap: f32,

    // === Progression ===
    pub starting_lives: u32,
    pub base_wave_size: u32,
    /// Wave grows by one station every this many levels
    pub wave_growth_interval: u32,
    /// A bonus life is awarded on reaching each multiple of this level
    pub bonus_life_interval: u32,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_thrust: 0.15,
            ship_thrust_per_level: 0.003,
            ship_thrust_cap: 0.25,
            ship_friction: 0.99,
            ship_max_speed: 6.0,
            ship_max_speed_per_level: 0.1,
            ship_max_speed_cap: 9.0,
            ship_turn_rate: 0.07,

            plasma_speed: 8.0,
            plasma_speed_per_level: 0.1,
            plasma_speed_cap: 12.0,

            station_speed: 1.2,
            station_speed_per_level: 0.08,
            station_speed_cap: 3.0,
            station_fire_rate: 120,
            station_fire_rate_step: 5,
            station_fire_rate_floor: 30,
            station_shot_speed: 5.0,
            station_shot_speed_per_level: 0.15,
            station_shot_speed_cap: 9.0,

            starting_lives: 5,
            base_wave_size: 3,
            wave_growth_interval: 10,
            bonus_life_interval: 5,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

/// Level-dependent values, recomputed whenever the level changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub level: u32,
    pub ship_thrust: f32,
    pub ship_max_speed: f32,
    pub plasma_speed: f32,
    pub station_speed: f32,
    pub station_fire_rate: u32,
    pub station_shot_speed: f32,
    pub stations_per_level: u32,
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse tuning overrides, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key holding balance overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "station_siege_tuning";

    /// Environment variable naming a tuning JSON file (native)
    #[allow(dead_code)]
    const PATH_ENV: &'static str = "STATION_SIEGE_TUNING";

    /// Load overrides from LocalStorage (WASM only), defaults when absent
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored {
            Some(json) => {
                log::info!("Loaded tuning overrides from LocalStorage");
                Self::from_json_or_default(&json)
            }
            None => Self::default(),
        }
    }

    /// Load overrides from the file named by `STATION_SIEGE_TUNING`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::PATH_ENV) {
            Some(path) => Self::load_from_path(path),
            None => Self::default(),
        }
    }

    /// Read a tuning file; unreadable or malformed files fall back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Cannot read tuning file {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Wave size for a level: grows by one at every growth milestone
    pub fn stations_per_level(&self, level: u32) -> u32 {
        let interval = self.wave_growth_interval.max(1);
        self.base_wave_size + level.saturating_sub(1) / interval
    }

    /// True when reaching `level` awards a bonus life
    pub fn is_bonus_life_level(&self, level: u32) -> bool {
        let interval = self.bonus_life_interval.max(1);
        level > 1 && level % interval == 0
    }

    /// Derive every level-scaled value for `level` (1-based)
    pub fn for_level(&self, level: u32) -> LevelParams {
        let steps = level.saturating_sub(1);
        let grow = |base: f32, per: f32, cap: f32| (base + per * steps as f32).min(cap);

        let fire_rate = self
            .station_fire_rate
            .saturating_sub(self.station_fire_rate_step.saturating_mul(steps))
            .max(self.station_fire_rate_floor);

        LevelParams {
            level,
            ship_thrust: grow(self.ship_thrust, self.ship_thrust_per_level, self.ship_thrust_cap),
            ship_max_speed: grow(
                self.ship_max_speed,
                self.ship_max_speed_per_level,
                self.ship_max_speed_cap,
            ),
            plasma_speed: grow(self.plasma_speed, self.plasma_speed_per_level, self.plasma_speed_cap),
            station_speed: grow(
                self.station_speed,
                self.station_speed_per_level,
                self.station_speed_cap,
            ),
            station_fire_rate: fire_rate,
            station_shot_speed: grow(
                self.station_shot_speed,
                self.station_shot_speed_per_level,
                self.station_shot_speed_cap,
            ),
            stations_per_level: self.stations_per_level(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_uses_base_values() {
        let tuning = Tuning::default();
        let params = tuning.for_level(1);
        assert_eq!(params.ship_thrust, 0.15);
        assert_eq!(params.ship_max_speed, 6.0);
        assert_eq!(params.plasma_speed, 8.0);
        assert_eq!(params.station_fire_rate, 120);
        assert_eq!(params.stations_per_level, 3);
    }

    #[test]
    fn test_fire_rate_floors() {
        let tuning = Tuning::default();
        let late = tuning.for_level(500);
        assert_eq!(late.station_fire_rate, tuning.station_fire_rate_floor);
        assert!(late.station_speed <= tuning.station_speed_cap);
        assert!(late.ship_max_speed <= tuning.ship_max_speed_cap);
    }

    #[test]
    fn test_fire_rate_decreases_with_level() {
        let tuning = Tuning::default();
        assert!(tuning.for_level(4).station_fire_rate < tuning.for_level(1).station_fire_rate);
    }

    #[test]
    fn test_wave_growth_milestones() {
        let tuning = Tuning::default();
        assert_eq!(tuning.stations_per_level(10), 3);
        assert_eq!(tuning.stations_per_level(11), 4);
        assert_eq!(tuning.stations_per_level(21), 5);
    }

    #[test]
    fn test_bonus_life_levels() {
        let tuning = Tuning::default();
        assert!(!tuning.is_bonus_life_level(1));
        assert!(!tuning.is_bonus_life_level(4));
        assert!(tuning.is_bonus_life_level(5));
        assert!(tuning.is_bonus_life_level(10));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 3 }"#).unwrap();
        assert_eq!(tuning.starting_lives, 3);
        assert_eq!(tuning.ship_friction, 0.99);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("station_siege_tuning_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "starting_lives": 7, "base_wave_size": 4 }"#).unwrap();
        let tuning = Tuning::load_from_path(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(tuning.starting_lives, 7);
        assert_eq!(tuning.for_level(1).stations_per_level, 4);
        assert_eq!(tuning.ship_thrust, 0.15);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tuning = Tuning::load_from_path("/nonexistent/station_siege/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
