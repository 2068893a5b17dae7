//! One-shot simulation events and the sink that consumes them
//!
//! The core only records events; audio and HUD adapters implement
//! [`EffectSink`] and are handed the events once per frame.

/// Something the outside world may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlasmaFired,
    StationFired,
    StationDestroyed,
    ShipDestroyed,
    LevelChanged(u32),
    LivesChanged(u32),
    GameOver,
}

/// Receiver for simulation side effects (sound cues, HUD updates)
///
/// Every hook defaults to a no-op so adapters implement only what they use.
/// Implementations must not fail: a cue that cannot play is simply skipped.
pub trait EffectSink {
    fn plasma_fired(&mut self) {}
    fn station_fired(&mut self) {}
    fn station_destroyed(&mut self) {}
    fn ship_destroyed(&mut self) {}
    fn level_changed(&mut self, _level: u32) {}
    fn lives_changed(&mut self, _lives: u32) {}
    fn game_over(&mut self) {}

    /// Route an event to its hook
    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::PlasmaFired => self.plasma_fired(),
            GameEvent::StationFired => self.station_fired(),
            GameEvent::StationDestroyed => self.station_destroyed(),
            GameEvent::ShipDestroyed => self.ship_destroyed(),
            GameEvent::LevelChanged(level) => self.level_changed(level),
            GameEvent::LivesChanged(lives) => self.lives_changed(lives),
            GameEvent::GameOver => self.game_over(),
        }
    }
}

/// Discards everything
impl EffectSink for () {}

/// Records everything (headless runs, tests)
impl EffectSink for Vec<GameEvent> {
    fn dispatch(&mut self, event: GameEvent) {
        self.push(event);
    }
}
