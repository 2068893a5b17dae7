//! Canvas2D renderer for the browser build
//!
//! Vector shapes only: hull triangle, station disc + turret barrel, bolts as
//! dots, explosions as fading rings.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Renderer;
use crate::consts::{PLASMA_RADIUS, SHIP_RADIUS, STATION_SHOT_RADIUS};
use crate::sim::{Camera, Explosion, GamePhase, RenderFrame, Station, StationState};
use crate::starfield::StarField;

const BACKGROUND: &str = "#05060f";
const SHIP_COLOR: &str = "#9fe8ff";
const STATION_COLOR: &str = "#c8c8d8";
const STATION_BURST_COLOR: &str = "#ff8a5c";
const PLASMA_COLOR: &str = "#62f4ff";
const SHOT_COLOR: &str = "#ff4f6d";
const EXPLOSION_COLOR: &str = "#ffb347";

/// Draws onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Grab the canvas' 2D context. `None` if the browser refuses one.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn disc(&self, center: Vec2, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn ring(&self, center: Vec2, radius: f32, color: &str, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.stroke();
    }

    fn draw_ship(&self, pos: Vec2, angle: f32, alpha: f64) {
        let ctx = &self.ctx;
        let r = SHIP_RADIUS as f64;
        ctx.save();
        ctx.set_global_alpha(alpha);
        let _ = ctx.translate(pos.x as f64, pos.y as f64);
        let _ = ctx.rotate(angle as f64);
        ctx.set_fill_style_str(SHIP_COLOR);
        ctx.begin_path();
        ctx.move_to(r, 0.0);
        ctx.line_to(-r * 0.8, r * 0.7);
        ctx.line_to(-r * 0.4, 0.0);
        ctx.line_to(-r * 0.8, -r * 0.7);
        ctx.close_path();
        ctx.fill();
        ctx.restore();
    }

    fn draw_station(&self, station: &Station, screen: Vec2) {
        let ctx = &self.ctx;
        let alpha = match station.state {
            StationState::Spawning { frames_left } => {
                1.0 - frames_left as f64 / crate::consts::STATION_SPAWN_FRAMES as f64
            }
            _ => 1.0,
        };
        let hull = match station.state {
            StationState::Bursting { .. } => STATION_BURST_COLOR,
            _ => STATION_COLOR,
        };

        ctx.save();
        ctx.set_global_alpha(alpha.max(0.1));

        // Hull with spinning spokes
        self.ring(screen, station.radius, hull, 3.0);
        ctx.set_line_width(2.0);
        for k in 0..4 {
            let a = station.spin_angle + k as f32 * std::f32::consts::FRAC_PI_2;
            let tip = screen + crate::unit_vector(a) * station.radius;
            ctx.begin_path();
            ctx.move_to(screen.x as f64, screen.y as f64);
            ctx.line_to(tip.x as f64, tip.y as f64);
            ctx.stroke();
        }

        // Turret barrel
        let muzzle = screen + crate::unit_vector(station.gun_angle) * (station.radius + 10.0);
        ctx.set_line_width(5.0);
        ctx.begin_path();
        ctx.move_to(screen.x as f64, screen.y as f64);
        ctx.line_to(muzzle.x as f64, muzzle.y as f64);
        ctx.stroke();
        self.disc(screen, station.radius * 0.35, hull);

        ctx.restore();
    }

    fn draw_explosion(&self, boom: &Explosion, camera: &Camera) {
        let screen = camera.to_screen(boom.pos);
        self.ctx.save();
        self.ctx.set_global_alpha(boom.alpha as f64);
        self.disc(screen, 20.0 * boom.scale, EXPLOSION_COLOR);
        self.ring(screen, 32.0 * boom.scale, EXPLOSION_COLOR, 2.0);
        self.ctx.restore();
    }
}

impl Renderer for CanvasRenderer {
    fn draw_background(&mut self, stars: &StarField, camera: &Camera) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        for star in stars.visible_stars(camera) {
            self.ctx.set_global_alpha(star.brightness as f64);
            self.disc(star.screen_pos, star.radius, "#ffffff");
        }
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_frame(&mut self, frame: &RenderFrame<'_>) {
        let cam = &frame.camera;

        for station in frame.stations {
            self.draw_station(station, cam.to_screen(station.pos));
        }
        for shot in frame.station_shots {
            self.disc(cam.to_screen(shot.pos), STATION_SHOT_RADIUS, SHOT_COLOR);
        }
        for bolt in frame.plasma {
            self.disc(cam.to_screen(bolt.pos), PLASMA_RADIUS, PLASMA_COLOR);
        }
        for boom in frame.explosions {
            self.draw_explosion(boom, cam);
        }
        if let Some(boom) = frame.ship_explosion {
            self.draw_explosion(boom, cam);
        }

        if frame.ship.alive {
            // Blink while phasing in
            let alpha = if frame.ship.spawning {
                0.3 + 0.7 * frame.ship.fade_in as f64
            } else {
                1.0
            };
            self.draw_ship(cam.to_screen(frame.ship.pos), frame.ship.angle, alpha);
        }

        if frame.phase == GamePhase::GameOver {
            self.ctx.set_fill_style_str("rgba(40, 0, 0, 0.35)");
            self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        }
    }

    fn draw_pause_overlay(&mut self) {
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }
}
