//! Collision detection and resolution
//!
//! Runs once per tick on end-of-frame positions. No sub-stepping or swept
//! tests: fast projectiles may tunnel through small targets.

use glam::Vec2;

use super::events::GameEvent;
use super::explosion::Explosion;
use super::state::{GamePhase, SimulationState};
use crate::consts::{PLASMA_RADIUS, STATION_SHOT_RADIUS};

/// True when two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Resolve every collision for this tick
pub fn resolve_collisions(state: &mut SimulationState) {
    resolve_plasma_hits(state);
    resolve_ship_hits(state);
}

/// Plasma × station. Each bolt is consumed by the first active station it
/// touches (spawn order). Clearing the last station advances the level.
pub fn resolve_plasma_hits(state: &mut SimulationState) {
    let mut kills = 0;
    let mut i = 0;

    while i < state.plasma.len() {
        let bolt = state.plasma[i];
        let hit = state.stations.iter().position(|s| {
            !s.is_spawning() && circles_overlap(bolt.pos, PLASMA_RADIUS, s.pos, s.radius)
        });

        match hit {
            Some(j) => {
                let station = state.stations.remove(j);
                state.plasma.remove(i);
                state.explosions.push(Explosion::new(station.pos));
                state.progression.record_kill();
                state.emit(GameEvent::StationDestroyed);
                kills += 1;
            }
            None => i += 1,
        }
    }

    if kills > 0 && state.stations.is_empty() {
        state.advance_level();
    }
}

/// Station shot × ship. Skipped while the ship is phasing in or already down.
pub fn resolve_ship_hits(state: &mut SimulationState) {
    if !state.ship.is_vulnerable() {
        return;
    }

    let ship_pos = state.ship.pos;
    let ship_radius = state.ship.radius;
    let hit = state
        .station_shots
        .iter()
        .position(|shot| circles_overlap(shot.pos, STATION_SHOT_RADIUS, ship_pos, ship_radius));

    if let Some(i) = hit {
        state.station_shots.remove(i);
        destroy_ship(state);
    }
}

/// Kill the ship: explosion, lose a life, scatter the stations, maybe game over
pub fn destroy_ship(state: &mut SimulationState) {
    state.ship_explosion = Some(Explosion::new(state.ship.pos));
    state.ship.destroy();

    let lives = state.progression.lose_life();
    state.emit(GameEvent::ShipDestroyed);
    state.emit(GameEvent::LivesChanged(lives));

    for station in &mut state.stations {
        station.scatter(&mut state.rng);
    }

    if state.progression.is_out_of_lives() {
        state.phase = GamePhase::GameOver;
        state.ship.suspend_respawn();
        state.emit(GameEvent::GameOver);
        log::info!("Game over at level {}", state.progression.level);
    } else {
        log::debug!("Ship destroyed, {} lives left", lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::Projectile;
    use crate::sim::ship::ShipStatus;
    use crate::sim::station::StationState;
    use crate::tuning::Tuning;

    fn state() -> SimulationState {
        let mut state = SimulationState::new(2024, Tuning::default());
        // Spread the wave out so no two stations can share a hit
        for (k, s) in state.stations.iter_mut().enumerate() {
            s.state = StationState::Idle;
            s.pos = crate::unit_vector(k as f32 * 2.1) * 600.0;
        }
        state.drain_events();
        state
    }

    fn bolt_at(pos: Vec2) -> Projectile {
        Projectile { pos, vel: Vec2::ZERO }
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 30.0, Vec2::new(33.9, 0.0), 4.0));
        assert!(!circles_overlap(Vec2::ZERO, 30.0, Vec2::new(34.0, 0.0), 4.0));
    }

    #[test]
    fn test_plasma_kills_station() {
        let mut state = state();
        let target = state.stations[1].pos;
        state.plasma.push(bolt_at(target + Vec2::new(20.0, 0.0)));

        resolve_collisions(&mut state);

        assert_eq!(state.stations.len(), 2);
        assert!(state.plasma.is_empty());
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].pos, target);
        assert_eq!(state.progression.destroyed_this_level, 1);
        assert_eq!(state.progression.level, 1);
        assert_eq!(state.drain_events(), vec![GameEvent::StationDestroyed]);
    }

    #[test]
    fn test_bolt_consumed_by_first_station_only() {
        let mut state = state();
        let pos = state.stations[0].pos;
        state.stations[2].pos = pos;
        state.plasma.push(bolt_at(pos));

        resolve_plasma_hits(&mut state);
        assert_eq!(state.stations.len(), 2);
        assert_eq!(state.stations[1].pos, pos, "overlapping station survives");
    }

    #[test]
    fn test_spawning_station_is_immune() {
        let mut state = state();
        state.stations[0].state = StationState::Spawning { frames_left: 10 };
        let pos = state.stations[0].pos;
        state.plasma.push(bolt_at(pos));

        resolve_plasma_hits(&mut state);
        assert_eq!(state.stations.len(), 3);
        assert_eq!(state.plasma.len(), 1);
    }

    #[test]
    fn test_last_kill_advances_level() {
        let mut state = state();
        state.stations.truncate(1);
        let last = state.stations[0].pos;
        state.plasma.push(bolt_at(last + Vec2::new(0.0, 33.0)));

        resolve_collisions(&mut state);

        assert_eq!(state.progression.level, 2);
        assert_eq!(state.explosions[0].pos, last);
        assert_eq!(state.stations.len() as u32, state.progression.stations_per_level);
        assert!(state.stations.iter().all(|s| s.state == StationState::Spawning { frames_left: 60 }));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::StationDestroyed, GameEvent::LevelChanged(2)]
        );
    }

    #[test]
    fn test_shot_kills_ship() {
        let mut state = state();
        state.ship.pos = Vec2::new(10.0, 10.0);
        state.station_shots.push(bolt_at(Vec2::new(10.0, 30.0)));

        resolve_collisions(&mut state);

        assert!(!state.ship.is_alive());
        assert!(state.station_shots.is_empty());
        assert!(state.ship_explosion.is_some());
        assert_eq!(state.progression.lives, 4);
        assert!(state.stations.iter().all(|s| s.state == StationState::Wandering));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ShipDestroyed, GameEvent::LivesChanged(4)]
        );
    }

    #[test]
    fn test_spawning_ship_is_invulnerable() {
        let mut state = state();
        state.ship.spawn_timer = 30;
        state.station_shots.push(bolt_at(state.ship.pos));

        resolve_collisions(&mut state);
        assert!(state.ship.is_alive());
        assert_eq!(state.station_shots.len(), 1);
        assert_eq!(state.progression.lives, 5);
    }

    #[test]
    fn test_last_life_is_game_over() {
        let mut state = state();
        state.progression.lives = 1;
        state.station_shots.push(bolt_at(state.ship.pos));

        resolve_collisions(&mut state);

        assert_eq!(state.progression.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            state.ship.status,
            ShipStatus::Destroyed { respawn_in: 0, .. }
        ));
        assert_eq!(state.drain_events().last(), Some(&GameEvent::GameOver));
    }
}
