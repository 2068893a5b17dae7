//! Game session: frame orchestration and the outer control surface
//!
//! One [`Session::frame`] call per display refresh. The background is always
//! drawn; the update pipeline only runs while started, unpaused and not over.

use crate::renderer::Renderer;
use crate::sim::{EdgeTracker, EffectSink, InputState, SimulationState, tick};
use crate::starfield::StarField;
use crate::tuning::Tuning;

/// A play session
#[derive(Debug, Clone)]
pub struct Session {
    state: SimulationState,
    starfield: StarField,
    edges: EdgeTracker,
    started: bool,
    paused: bool,
}

impl Session {
    /// New session with the first wave spawned; call [`Session::start`] to play
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Session created with seed {}", seed);
        Self {
            state: SimulationState::new(seed, tuning),
            starfield: StarField::new(seed),
            edges: EdgeTracker::default(),
            started: false,
            paused: false,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable access for scripted setups (tests, demos)
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn starfield(&self) -> &StarField {
        &self.starfield
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Begin (or resume) simulation
    pub fn start(&mut self) {
        self.started = true;
        self.paused = false;
        log::info!("Session started");
    }

    /// Fresh run: level 1, full lives, empty world plus a new first wave
    pub fn restart(&mut self) {
        self.state.reset();
        self.edges.reset();
        self.started = true;
        self.paused = false;
        log::info!("Session restarted");
    }

    /// Flip pause. Ignored before start and after game over.
    pub fn toggle_pause(&mut self) {
        if !self.started || self.state.is_game_over() {
            return;
        }
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.state.set_viewport(width, height);
    }

    /// Run one display frame: sample input, update, dispatch effects, draw
    pub fn frame<S, R>(&mut self, input: &InputState, sink: &mut S, renderer: &mut R)
    where
        S: EffectSink + ?Sized,
        R: Renderer + ?Sized,
    {
        // Edges refresh even while paused so a held fire key
        // does not shoot the moment play resumes
        let (tick_input, pause_pressed) = self.edges.sample(input);
        if pause_pressed {
            self.toggle_pause();
        }

        renderer.draw_background(&self.starfield, &self.state.camera);

        if self.started && !self.paused {
            tick(&mut self.state, &tick_input);
        }

        for event in self.state.drain_events() {
            sink.dispatch(event);
        }

        renderer.draw_frame(&self.state.render_frame());
        if self.paused {
            renderer.draw_pause_overlay();
        }
    }
}
