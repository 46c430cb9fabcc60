//! Chunked, on-demand iceberg generation
//!
//! World space is cut into square chunks. Whenever the viewport touches a
//! chunk for the first time its icebergs are derived from the chunk key alone
//! (through [`noise`]), so a chunk always yields the same icebergs no matter
//! when or in which order it is visited.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::{Rect, Viewport};
use super::noise;
use crate::config::WorldConfig;

/// Integer coordinates of a generation chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    pub x: i32,
    pub y: i32,
}

impl ChunkKey {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing a world position
    pub fn containing(pos: Vec2, chunk_size: f32) -> Self {
        Self {
            x: (pos.x / chunk_size).floor() as i32,
            y: (pos.y / chunk_size).floor() as i32,
        }
    }

    /// Both coordinates packed into one 64-bit key
    #[inline]
    pub fn pack(&self) -> u64 {
        ((self.x as u32 as u64) << 32) | self.y as u32 as u64
    }

    /// World position of the chunk's min corner
    #[inline]
    pub fn origin(&self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.y as f32 * chunk_size)
    }

    /// Base noise seed for the chunk's icebergs
    #[inline]
    pub fn seed(&self) -> f64 {
        self.x as f64 * 1000.0 + self.y as f64
    }
}

/// A single iceberg. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iceberg {
    pub pos: Vec2,
    /// Radius-like extent, used as the collision radius
    pub size: f32,
    /// Vertex count of the rendered outline
    pub points: u32,
    /// Noise seed for outline irregularity
    pub seed: f64,
}

/// Every chunk overlapping `bounds`, inclusive on both ends
pub fn chunk_range(bounds: &Rect, chunk_size: f32) -> impl Iterator<Item = ChunkKey> + use<> {
    let lo = ChunkKey::containing(bounds.min, chunk_size);
    let hi = ChunkKey::containing(bounds.max, chunk_size);
    (lo.x..=hi.x).flat_map(move |x| (lo.y..=hi.y).map(move |y| ChunkKey::new(x, y)))
}

/// Derive one chunk's icebergs.
///
/// Pure: the output depends only on the key, the viewport area, the safe
/// center and the config. The expected count scales with the current
/// viewport area, so a resized canvas changes the density of chunks that
/// have not been generated yet.
pub fn generate_chunk(
    key: ChunkKey,
    viewport: Viewport,
    safe_center: Vec2,
    cfg: &WorldConfig,
) -> Vec<Iceberg> {
    let chunk = cfg.chunk_size;
    let chunk_area = chunk * chunk;
    let expected = ((chunk_area / viewport.area()) * cfg.density).floor().max(0.0) as u32;

    let seed = key.seed();
    let origin = key.origin(chunk);
    let point_span = cfg.max_iceberg_points.saturating_sub(cfg.min_iceberg_points) as f64;

    let mut icebergs = Vec::with_capacity(expected as usize);
    for i in 0..expected {
        let s = seed + i as f64;
        let pos = origin
            + Vec2::new(
                noise::sample(s * 0.1) as f32 * chunk,
                noise::sample_cos(s * 0.1) as f32 * chunk,
            );

        if pos.distance(safe_center) < cfg.start_safe_radius {
            continue;
        }

        let size = noise::lerp_sample(s * 0.15, cfg.min_iceberg_size, cfg.max_iceberg_size);
        let points =
            (cfg.min_iceberg_points as f64 + noise::sample(s * 0.2) * point_span).floor() as u32;

        icebergs.push(Iceberg {
            pos,
            size,
            points,
            seed: s,
        });
    }
    icebergs
}

/// All generated icebergs plus the bookkeeping that keeps generation idempotent
#[derive(Debug, Clone)]
pub struct World {
    chunk_size: f32,
    icebergs: Vec<Iceberg>,
    generated: HashSet<ChunkKey>,
    /// Iceberg indices bucketed by the chunk holding their center
    buckets: HashMap<ChunkKey, Vec<usize>>,
}

impl World {
    pub fn new(chunk_size: f32) -> Self {
        Self {
            chunk_size,
            icebergs: Vec::new(),
            generated: HashSet::new(),
            buckets: HashMap::new(),
        }
    }

    #[inline]
    pub fn icebergs(&self) -> &[Iceberg] {
        &self.icebergs
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    pub fn is_generated(&self, key: ChunkKey) -> bool {
        self.generated.contains(&key)
    }

    pub fn generated_chunks(&self) -> usize {
        self.generated.len()
    }

    /// Generate every not-yet-seen chunk overlapping `bounds`.
    /// Returns how many chunks were generated by this call.
    pub fn ensure_generated(
        &mut self,
        bounds: &Rect,
        viewport: Viewport,
        safe_center: Vec2,
        cfg: &WorldConfig,
    ) -> usize {
        let mut fresh = 0;
        for key in chunk_range(bounds, self.chunk_size) {
            if !self.generated.insert(key) {
                continue;
            }
            let icebergs = generate_chunk(key, viewport, safe_center, cfg);
            log::debug!(
                "Generated chunk ({}, {}): {} icebergs",
                key.x,
                key.y,
                icebergs.len()
            );
            for iceberg in icebergs {
                self.insert_iceberg(iceberg);
            }
            fresh += 1;
        }
        fresh
    }

    /// Append an iceberg outside of chunk generation (scripted scenarios).
    /// Does not mark its chunk as generated.
    pub fn insert_iceberg(&mut self, iceberg: Iceberg) -> usize {
        let idx = self.icebergs.len();
        let key = ChunkKey::containing(iceberg.pos, self.chunk_size);
        self.buckets.entry(key).or_default().push(idx);
        self.icebergs.push(iceberg);
        idx
    }

    /// Icebergs whose center lies in a chunk touched by the square of
    /// half-side `radius` around `pos`. Callers do the exact distance test.
    pub fn icebergs_near(&self, pos: Vec2, radius: f32) -> impl Iterator<Item = (usize, &Iceberg)> {
        let query = Rect::from_center_size(pos, Vec2::splat(radius * 2.0));
        chunk_range(&query, self.chunk_size)
            .filter_map(move |key| self.buckets.get(&key))
            .flatten()
            .map(move |&i| (i, &self.icebergs[i]))
    }

    /// Icebergs whose center falls inside `bounds` (expanded by `margin`)
    pub fn icebergs_in<'a>(
        &'a self,
        bounds: &Rect,
        margin: f32,
    ) -> impl Iterator<Item = &'a Iceberg> + use<'a> {
        let area = bounds.expand(margin);
        chunk_range(&area, self.chunk_size)
            .filter_map(move |key| self.buckets.get(&key))
            .flatten()
            .map(move |&i| &self.icebergs[i])
            .filter(move |berg| area.contains(berg.pos))
    }

    /// Drop everything; the next `ensure_generated` starts from scratch
    pub fn clear(&mut self) {
        self.icebergs.clear();
        self.generated.clear();
        self.buckets.clear();
    }
}
