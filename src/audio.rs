//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Playback is fire-and-forget: any Web Audio failure just drops the cue.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::EffectSink;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player plasma bolt
    PlasmaFire,
    /// Station turret shot
    StationFire,
    /// Station destroyed
    StationExplode,
    /// Player ship destroyed
    ShipExplode,
    /// Wave cleared, next level
    LevelUp,
    /// Out of lives
    GameOver,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings: settings.clone(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.settings.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PlasmaFire => self.play_plasma(ctx, vol),
            SoundEffect::StationFire => self.play_station_fire(ctx, vol),
            SoundEffect::StationExplode => self.play_station_explode(ctx, vol),
            SoundEffect::ShipExplode => self.play_ship_explode(ctx, vol),
            SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Swept tone with an exponential fade
    #[allow(clippy::too_many_arguments)]
    fn sweep(
        &self,
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        peak: f32,
        start: f64,
        length: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        gain.gain().set_value_at_time(peak, start).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, start + length)
            .ok();
        osc.frequency().set_value_at_time(from, start).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, start + length)
            .ok();
        osc.start_with_when(start).ok();
        osc.stop_with_when(start + length + 0.02).ok();
    }

    /// Plasma - bright descending zap
    fn play_plasma(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        self.sweep(ctx, OscillatorType::Square, 1400.0, 300.0, vol * 0.18, t, 0.12);
    }

    /// Station shot - low buzzy blip
    fn play_station_fire(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        self.sweep(ctx, OscillatorType::Sawtooth, 420.0, 180.0, vol * 0.12, t, 0.1);
    }

    /// Station explosion - crackle over a bass thump
    fn play_station_explode(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(90.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(1200.0, t + 0.06).ok();
            osc.frequency().set_value_at_time(70.0, t + 0.09).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }

        self.sweep(ctx, OscillatorType::Sine, 90.0, 35.0, vol * 0.5, t, 0.3);
    }

    /// Ship explosion - long rumbling fall
    fn play_ship_explode(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        self.sweep(ctx, OscillatorType::Sawtooth, 300.0, 30.0, vol * 0.4, t, 0.9);
        self.sweep(ctx, OscillatorType::Sine, 70.0, 25.0, vol * 0.6, t, 1.0);
    }

    /// Level up - rising arpeggio
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let notes = [523.25, 659.25, 783.99, 1046.5]; // C5 E5 G5 C6
        for (i, freq) in notes.iter().enumerate() {
            let start = t + i as f64 * 0.08;
            self.sweep(ctx, OscillatorType::Triangle, *freq, *freq, vol * 0.3, start, 0.18);
        }
    }

    /// Game over - sad descending tones
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let notes = [392.0, 329.63, 261.63, 196.0]; // G4 E4 C4 G3
        for (i, freq) in notes.iter().enumerate() {
            let start = t + i as f64 * 0.25;
            self.sweep(ctx, OscillatorType::Sine, *freq, *freq * 0.98, vol * 0.35, start, 0.3);
        }
    }
}

impl EffectSink for AudioManager {
    fn plasma_fired(&mut self) {
        self.play(SoundEffect::PlasmaFire);
    }

    fn station_fired(&mut self) {
        self.play(SoundEffect::StationFire);
    }

    fn station_destroyed(&mut self) {
        self.play(SoundEffect::StationExplode);
    }

    fn ship_destroyed(&mut self) {
        self.play(SoundEffect::ShipExplode);
    }

    fn level_changed(&mut self, level: u32) {
        // Level 1 is announced on start/restart; only real advances chime
        if level > 1 {
            self.play(SoundEffect::LevelUp);
        }
    }

    fn game_over(&mut self) {
        self.play(SoundEffect::GameOver);
    }
}
