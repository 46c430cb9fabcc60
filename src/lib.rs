//! Icebound - steer a coal-fired ship through an endless iceberg field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, ship physics, encounters)
//! - `config`: Immutable tuning structs, loadable from JSON
//! - `renderer`: Camera math and draw-ready shapes for the canvas layer
//! - `hud`: HUD text and the restart button surface
//! - `error`: Config loading errors

pub mod config;
pub mod error;
pub mod hud;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, GameMode};
pub use error::ConfigError;

use glam::Vec2;

/// Frame timing constants
pub mod consts {
    /// Nominal frame length the per-tick constants are tuned for (60 Hz)
    pub const NOMINAL_FRAME_SECS: f32 = 1.0 / 60.0;
    /// Upper bound on the frame-time scaling factor (2x nominal)
    pub const MAX_DT_SCALE: f32 = 2.0;
    /// Smallest accepted viewport extent, in world units. Chunk density scales
    /// with 1 / viewport area, so this also caps icebergs per chunk.
    pub const MIN_VIEWPORT_EXTENT: f32 = 100.0;
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

/// Unit vector pointing along `heading`
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Convert a real frame duration into the tick scaling factor, clamped to [0, 2]
#[inline]
pub fn dt_scale(frame_secs: f32) -> f32 {
    if !frame_secs.is_finite() {
        return 1.0;
    }
    (frame_secs / consts::NOMINAL_FRAME_SECS).clamp(0.0, consts::MAX_DT_SCALE)
}
