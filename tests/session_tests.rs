//! Session-level tests driving the public API the way a front end would

use glam::Vec2;
use station_siege::renderer::Renderer;
use station_siege::sim::{
    Camera, EffectSink, GamePhase, InputState, Projectile, RenderFrame, StationState,
};
use station_siege::starfield::StarField;
use station_siege::{Session, Tuning};

/// Counts draw calls and keeps the last frame's headline numbers
#[derive(Default)]
struct RecordingRenderer {
    backgrounds: u32,
    frames: u32,
    overlays: u32,
    last_level: u32,
    last_lives: u32,
    last_stations: usize,
    last_phase: Option<GamePhase>,
}

impl Renderer for RecordingRenderer {
    fn draw_background(&mut self, _stars: &StarField, _camera: &Camera) {
        self.backgrounds += 1;
    }

    fn draw_frame(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        self.last_level = frame.level;
        self.last_lives = frame.lives;
        self.last_stations = frame.stations.len();
        self.last_phase = Some(frame.phase);
    }

    fn draw_pause_overlay(&mut self) {
        self.overlays += 1;
    }
}

/// HUD-style sink
#[derive(Default)]
struct RecordingSink {
    level: u32,
    lives: u32,
    plasma: u32,
    ship_losses: u32,
    game_overs: u32,
}

impl EffectSink for RecordingSink {
    fn plasma_fired(&mut self) {
        self.plasma += 1;
    }

    fn ship_destroyed(&mut self) {
        self.ship_losses += 1;
    }

    fn level_changed(&mut self, level: u32) {
        self.level = level;
    }

    fn lives_changed(&mut self, lives: u32) {
        self.lives = lives;
    }

    fn game_over(&mut self) {
        self.game_overs += 1;
    }
}

fn idle() -> InputState {
    InputState::default()
}

/// Park a motionless station shot on the ship and run one frame
fn shoot_ship(session: &mut Session, sink: &mut RecordingSink, renderer: &mut RecordingRenderer) {
    let state = session.state_mut();
    state.ship.spawn_timer = 0;
    let pos = state.ship.pos;
    state
        .station_shots
        .push(Projectile::station_shot(pos, 0.0, 0.0));
    session.frame(&idle(), sink, renderer);
}

#[test]
fn test_first_frame_reports_counters() {
    let mut session = Session::new(3, Tuning::default());
    let mut sink = RecordingSink::default();
    let mut renderer = RecordingRenderer::default();

    session.frame(&idle(), &mut sink, &mut renderer);

    assert_eq!(sink.level, 1);
    assert_eq!(sink.lives, 5);
    assert_eq!(renderer.last_level, 1);
    assert_eq!(renderer.last_lives, 5);
    assert_eq!(renderer.last_stations, 3);
    assert_eq!(renderer.last_phase, Some(GamePhase::Playing));
}

#[test]
fn test_start_begins_simulation() {
    let mut session = Session::new(3, Tuning::default());
    let mut renderer = RecordingRenderer::default();

    session.frame(&idle(), &mut (), &mut renderer);
    assert_eq!(session.state().time_ticks, 0);

    session.start();
    assert!(session.is_started());
    session.frame(&idle(), &mut (), &mut renderer);
    session.frame(&idle(), &mut (), &mut renderer);
    assert_eq!(session.state().time_ticks, 2);
}

#[test]
fn test_background_drawn_while_paused() {
    let mut session = Session::new(9, Tuning::default());
    let mut renderer = RecordingRenderer::default();
    session.start();
    session.toggle_pause();

    let thrust = InputState {
        thrust: true,
        ..Default::default()
    };
    for _ in 0..10 {
        session.frame(&thrust, &mut (), &mut renderer);
    }

    assert_eq!(renderer.backgrounds, 10);
    assert_eq!(renderer.frames, 10);
    assert_eq!(renderer.overlays, 10);
    assert_eq!(session.state().time_ticks, 0);
    assert_eq!(session.state().ship.vel, Vec2::ZERO);
}

#[test]
fn test_no_overlay_while_running() {
    let mut session = Session::new(9, Tuning::default());
    let mut renderer = RecordingRenderer::default();
    session.start();
    for _ in 0..5 {
        session.frame(&idle(), &mut (), &mut renderer);
    }
    assert_eq!(renderer.backgrounds, 5);
    assert_eq!(renderer.overlays, 0);
}

#[test]
fn test_fire_edge_through_session() {
    let mut session = Session::new(21, Tuning::default());
    let mut sink = RecordingSink::default();
    let mut renderer = RecordingRenderer::default();
    session.start();

    let fire = InputState {
        fire: true,
        ..Default::default()
    };
    // Held for three frames: one shot
    for _ in 0..3 {
        session.frame(&fire, &mut sink, &mut renderer);
    }
    assert_eq!(sink.plasma, 1);

    session.frame(&idle(), &mut sink, &mut renderer);
    session.frame(&fire, &mut sink, &mut renderer);
    assert_eq!(sink.plasma, 2);
}

#[test]
fn test_losing_last_life_ends_game() {
    let mut session = Session::new(5, Tuning::default());
    let mut sink = RecordingSink::default();
    let mut renderer = RecordingRenderer::default();
    session.start();
    session.state_mut().progression.lives = 1;

    shoot_ship(&mut session, &mut sink, &mut renderer);

    assert!(session.is_game_over());
    assert_eq!(sink.ship_losses, 1);
    assert_eq!(sink.lives, 0);
    assert_eq!(sink.game_overs, 1);
    assert_eq!(renderer.last_phase, Some(GamePhase::GameOver));

    // Pause is refused once the game is over
    session.toggle_pause();
    assert!(!session.is_paused());
}

#[test]
fn test_restart_after_game_over() {
    let mut session = Session::new(5, Tuning::default());
    let mut sink = RecordingSink::default();
    let mut renderer = RecordingRenderer::default();
    session.start();

    let thrust = InputState {
        thrust: true,
        ..Default::default()
    };
    for _ in 0..30 {
        session.frame(&thrust, &mut sink, &mut renderer);
    }
    session.state_mut().progression.lives = 1;
    shoot_ship(&mut session, &mut sink, &mut renderer);
    assert!(session.is_game_over());

    session.restart();
    session.frame(&idle(), &mut sink, &mut renderer);

    let state = session.state();
    assert!(!session.is_game_over());
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.progression.level, 1);
    assert_eq!(state.progression.lives, 5);
    assert!(state.ship.is_alive());
    assert!(state.ship.pos.length() < 1e-3, "ship restarts at the origin");
    assert!(state.station_shots.is_empty());
    assert!(state.ship_explosion.is_none());
    assert_eq!(state.stations.len(), 3);
    assert!(
        state
            .stations
            .iter()
            .all(|s| matches!(s.state, StationState::Spawning { .. }))
    );
    assert_eq!(sink.level, 1);
    assert_eq!(sink.lives, 5);
}

#[test]
fn test_viewport_resize_moves_camera() {
    let mut session = Session::new(1, Tuning::default());
    session.set_viewport(1280.0, 720.0);
    let cam = session.state().camera;
    assert_eq!(cam.viewport, Vec2::new(1280.0, 720.0));
    assert!(cam.contains(Vec2::ZERO, 0.0));
}
