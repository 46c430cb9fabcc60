//! Axis-aligned world rectangles and the viewport size

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_VIEWPORT_EXTENT;

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of `size` centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow on every side by `margin`
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// Canvas size in world units.
///
/// Browsers can report a zero-sized canvas before layout, so both extents
/// are clamped to [`MIN_VIEWPORT_EXTENT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let clamp = |v: f32| {
            if v.is_finite() {
                v.max(MIN_VIEWPORT_EXTENT)
            } else {
                MIN_VIEWPORT_EXTENT
            }
        };
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// World rectangle seen by a camera at `center`
    pub fn bounds_at(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, self.size())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
