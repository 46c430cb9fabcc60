//! Hash-style scalar noise
//!
//! `frac(sin(seed) * 10000)` is cheap and good enough to scatter icebergs and
//! roughen their outlines. Seeds must come from stable world data (chunk
//! coordinates, iceberg index, grid cell) and never from time or the camera,
//! otherwise generated content would change from frame to frame.

/// Fractional part, always in [0, 1) for finite input
#[inline]
fn frac(x: f64) -> f64 {
    let f = x - x.floor();
    // x - floor(x) can round up to exactly 1.0 for tiny negative x
    if f >= 1.0 { 0.0 } else { f }
}

/// Sample the field: deterministic value in [0, 1)
#[inline]
pub fn sample(seed: f64) -> f64 {
    frac(seed.sin() * 10000.0)
}

/// Cosine twin of [`sample`], used for a second independent coordinate
#[inline]
pub fn sample_cos(seed: f64) -> f64 {
    frac(seed.cos() * 10000.0)
}

/// Sample mapped linearly into [lo, hi)
#[inline]
pub fn lerp_sample(seed: f64, lo: f32, hi: f32) -> f32 {
    lerp_unit(sample(seed), lo, hi)
}

/// Map `t` in [0, 1) into [lo, hi). Computed in f64; a result that rounds up
/// to `hi` on the way back to f32 is pulled one ulp below it.
#[inline]
fn lerp_unit(t: f64, lo: f32, hi: f32) -> f32 {
    let v = (lo as f64 + t * (hi as f64 - lo as f64)) as f32;
    if v < hi || hi <= lo { v } else { hi.next_down() }
}

/// Wave-break mask for the ocean surface.
///
/// The world is cut into `cell`-sized squares; a square shows a breaking wave
/// when its sample falls under `threshold`. Keyed on integer cell coordinates
/// so the pattern is pinned to the world while the camera moves.
pub fn wave_break(x: f32, y: f32, cell: f32, threshold: f64) -> bool {
    let cx = (x / cell).floor() as f64;
    let cy = (y / cell).floor() as f64;
    sample(cx * 12.9898 + cy * 78.233) < threshold
}
