//! Canvas 2D painter
//!
//! Draws one frame from a [`GameState`] in CSS pixels. Back to front: ocean,
//! wave breaks, world border, ports, icebergs, ship, minimap, HUD, then the
//! end screen when the session is over.

use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::camera::Camera;
use super::shapes::{
    Minimap, hull_outline, iceberg_outline, rudder_line, visible_icebergs, wave_marks,
};
use crate::hud;
use crate::sim::{GameState, Port};

const OCEAN: &str = "#0b3d5c";
const WAVE: &str = "rgba(255, 255, 255, 0.18)";
const ICE_FILL: &str = "#e8f4fa";
const ICE_EDGE: &str = "#9cc7dd";
const HULL: &str = "#5a3b22";
const DECK: &str = "#c9a46b";
const RUDDER: &str = "#2a1a0e";
const BORDER: &str = "rgba(255, 80, 80, 0.6)";
const START_PORT: &str = "rgba(120, 200, 255, 0.35)";
const GOAL_PORT: &str = "rgba(90, 230, 120, 0.45)";
const TEXT: &str = "#ffffff";
const SHADE: &str = "rgba(0, 0, 0, 0.55)";
const BUTTON: &str = "#2e7dd1";

const WAVE_CELL: f32 = 48.0;
const WAVE_THRESHOLD: f64 = 0.12;

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Device-pixel scale; everything afterwards is drawn in CSS pixels
    pub fn set_pixel_ratio(&self, dpr: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }

    pub fn draw(&self, state: &GameState, autopilot: bool) -> Result<(), JsValue> {
        let viewport = state.viewport();
        let camera = Camera::new(state.ship.pos, viewport);
        let ctx = &self.ctx;

        ctx.set_fill_style_str(OCEAN);
        ctx.fill_rect(0.0, 0.0, viewport.width() as f64, viewport.height() as f64);

        ctx.set_fill_style_str(WAVE);
        for mark in wave_marks(&camera, WAVE_CELL, WAVE_THRESHOLD) {
            let p = camera.world_to_screen(mark);
            ctx.fill_rect(p.x as f64 - 8.0, p.y as f64 - 1.0, 16.0, 2.0);
        }

        if let Some(bounds) = state.world_bounds() {
            let min = camera.world_to_screen(bounds.min);
            ctx.set_stroke_style_str(BORDER);
            ctx.set_line_width(4.0);
            ctx.stroke_rect(
                min.x as f64,
                min.y as f64,
                bounds.width() as f64,
                bounds.height() as f64,
            );
        }
        if let Some(start) = &state.start {
            self.port(&camera, start, START_PORT)?;
        }
        if let Some(goal) = &state.goal {
            self.port(&camera, goal, GOAL_PORT)?;
        }

        let margin = state.config().world.max_iceberg_size;
        ctx.set_fill_style_str(ICE_FILL);
        ctx.set_stroke_style_str(ICE_EDGE);
        ctx.set_line_width(2.0);
        for berg in visible_icebergs(&state.world, &camera, margin) {
            self.polygon(&camera, &iceberg_outline(berg));
            ctx.fill();
            ctx.stroke();
        }

        self.ship(state, &camera);

        if let Some(bounds) = state.world_bounds() {
            self.minimap(state, &Minimap::new(bounds, viewport))?;
        }

        self.hud(state, autopilot)?;

        if let Some(title) = hud::banner(state.phase) {
            self.end_screen(state, title)?;
        }
        Ok(())
    }

    /// Trace a closed path through world-space points
    fn polygon(&self, camera: &Camera, points: &[Vec2]) {
        self.ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            let s = camera.world_to_screen(*p);
            if i == 0 {
                self.ctx.move_to(s.x as f64, s.y as f64);
            } else {
                self.ctx.line_to(s.x as f64, s.y as f64);
            }
        }
        self.ctx.close_path();
    }

    fn port(&self, camera: &Camera, port: &Port, color: &str) -> Result<(), JsValue> {
        let c = camera.world_to_screen(port.pos);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.arc(c.x as f64, c.y as f64, port.radius as f64, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn ship(&self, state: &GameState, camera: &Camera) {
        let cfg = &state.config().ship;
        let ctx = &self.ctx;

        let (from, to) = rudder_line(&state.ship, cfg);
        let (from, to) = (camera.world_to_screen(from), camera.world_to_screen(to));
        ctx.set_stroke_style_str(RUDDER);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();

        let hull = hull_outline(&state.ship, cfg);
        self.polygon(camera, &hull);
        ctx.set_fill_style_str(HULL);
        ctx.fill();

        // Deck inset toward the hull center
        let deck: Vec<Vec2> = hull
            .iter()
            .map(|p| state.ship.pos + (*p - state.ship.pos) * 0.7)
            .collect();
        self.polygon(camera, &deck);
        ctx.set_fill_style_str(DECK);
        ctx.fill();
    }

    fn minimap(&self, state: &GameState, map: &Minimap) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let s = map.screen;
        ctx.set_fill_style_str(SHADE);
        ctx.fill_rect(s.min.x as f64, s.min.y as f64, s.width() as f64, s.height() as f64);
        ctx.set_stroke_style_str(TEXT);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(s.min.x as f64, s.min.y as f64, s.width() as f64, s.height() as f64);

        let dot = |pos: Vec2, radius: f64, color: &str| -> Result<(), JsValue> {
            let p = map.project(pos);
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            ctx.arc(p.x as f64, p.y as f64, radius, 0.0, TAU)?;
            ctx.fill();
            Ok(())
        };
        if let Some(start) = &state.start {
            dot(start.pos, (map.scale(start.radius) as f64).max(2.0), START_PORT)?;
        }
        if let Some(goal) = &state.goal {
            dot(goal.pos, (map.scale(goal.radius) as f64).max(3.0), GOAL_PORT)?;
        }
        dot(state.ship.pos, 2.5, TEXT)
    }

    fn hud(&self, state: &GameState, autopilot: bool) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_font("16px monospace");
        ctx.set_text_align("left");
        ctx.set_fill_style_str(TEXT);
        let mut y = 24.0;
        for line in hud::status_lines(state) {
            ctx.fill_text(&line, 16.0, y)?;
            y += 22.0;
        }
        if autopilot {
            ctx.fill_text("Autopilot", 16.0, y)?;
        }
        Ok(())
    }

    fn end_screen(&self, state: &GameState, title: &str) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let viewport = state.viewport();
        let (w, h) = (viewport.width() as f64, viewport.height() as f64);

        ctx.set_fill_style_str(SHADE);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_text_align("center");
        ctx.set_fill_style_str(TEXT);
        ctx.set_font("bold 36px sans-serif");
        ctx.fill_text(title, w / 2.0, h / 2.0 - 12.0)?;
        ctx.set_font("18px sans-serif");
        ctx.fill_text(&hud::clock_label(state.elapsed_secs), w / 2.0, h / 2.0 + 20.0)?;

        let btn = hud::restart_button(viewport);
        ctx.set_fill_style_str(BUTTON);
        ctx.fill_rect(btn.x as f64, btn.y as f64, btn.width as f64, btn.height as f64);
        let c = btn.center();
        ctx.set_fill_style_str(TEXT);
        ctx.set_font("bold 20px sans-serif");
        ctx.set_text_baseline("middle");
        ctx.fill_text(hud::RESTART_LABEL, c.x as f64, c.y as f64)?;
        ctx.set_text_baseline("alphabetic");
        Ok(())
    }
}
