//! World/screen transform
//!
//! The camera is centered on the ship. Screen space has its origin at the
//! top-left corner of the canvas, with +y down like the world.

use glam::Vec2;

use crate::sim::{Rect, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point drawn at the canvas center
    pub center: Vec2,
    pub viewport: Viewport,
}

impl Camera {
    pub fn new(center: Vec2, viewport: Viewport) -> Self {
        Self { center, viewport }
    }

    #[inline]
    fn half_extent(&self) -> Vec2 {
        self.viewport.size() * 0.5
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.center + self.half_extent()
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.center - self.half_extent()
    }

    /// World rectangle covered by the canvas
    pub fn bounds(&self) -> Rect {
        self.viewport.bounds_at(self.center)
    }

    /// Whether a circle would show up at all
    pub fn is_visible(&self, pos: Vec2, radius: f32) -> bool {
        self.bounds().expand(radius).contains(pos)
    }
}
