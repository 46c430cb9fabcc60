//! Shape generation for 2D primitives
//!
//! Everything here returns world-space polygons and points. The canvas
//! painter maps them through the [`Camera`](super::Camera) afterwards.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::camera::Camera;
use crate::config::ShipConfig;
use crate::heading_vector;
use crate::sim::noise;
use crate::sim::{Iceberg, Rect, Ship, Viewport, World};

/// Fewest vertices an outline may have and still enclose an area
const MIN_OUTLINE_POINTS: u32 = 3;

/// Innermost radius of an outline vertex, as a fraction of the iceberg size
const OUTLINE_MIN_RADIUS: f32 = 0.7;

/// Irregular iceberg polygon.
///
/// Vertex radii are jittered by noise keyed on the iceberg seed, so an
/// iceberg looks the same every frame and after regeneration. No vertex lies
/// outside the collision circle.
pub fn iceberg_outline(berg: &Iceberg) -> Vec<Vec2> {
    let n = berg.points.max(MIN_OUTLINE_POINTS);
    (0..n)
        .map(|i| {
            let theta = i as f32 / n as f32 * TAU;
            let jitter = noise::lerp_sample(berg.seed + i as f64 * 0.5, OUTLINE_MIN_RADIUS, 1.0);
            berg.pos + Vec2::new(theta.cos(), theta.sin()) * berg.size * jitter
        })
        .collect()
}

/// Ship hull: pointed bow, square stern, rotated to the heading.
///
/// Order is bow, starboard shoulder, starboard quarter, port quarter, port
/// shoulder.
pub fn hull_outline(ship: &Ship, cfg: &ShipConfig) -> [Vec2; 5] {
    let fwd = ship.forward();
    // Rotated a quarter turn toward increasing heading
    let starboard = fwd.perp();
    let half_len = cfg.length * 0.5;
    let half_beam = cfg.width * 0.5;
    let at = |along: f32, across: f32| ship.pos + fwd * along + starboard * across;

    [
        at(half_len, 0.0),
        at(half_len * 0.4, half_beam),
        at(-half_len, half_beam),
        at(-half_len, -half_beam),
        at(half_len * 0.4, -half_beam),
    ]
}

/// Short segment off the stern showing the rudder deflection
pub fn rudder_line(ship: &Ship, cfg: &ShipConfig) -> (Vec2, Vec2) {
    let stern = ship.pos - ship.forward() * cfg.length * 0.5;
    let blade = heading_vector(ship.heading + PI - ship.rudder);
    (stern, stern + blade * cfg.length * 0.2)
}

/// Icebergs that can overlap the screen. `margin` should be at least the
/// largest iceberg size so ones centered just off screen still show.
pub fn visible_icebergs<'a>(
    world: &'a World,
    camera: &Camera,
    margin: f32,
) -> impl Iterator<Item = &'a Iceberg> + use<'a> {
    world.icebergs_in(&camera.bounds(), margin)
}

/// Centers of the grid cells on screen that show a breaking wave
pub fn wave_marks(camera: &Camera, cell: f32, threshold: f64) -> Vec<Vec2> {
    if cell <= 0.0 {
        return Vec::new();
    }
    let bounds = camera.bounds();
    let x0 = (bounds.min.x / cell).floor() as i64;
    let x1 = (bounds.max.x / cell).floor() as i64;
    let y0 = (bounds.min.y / cell).floor() as i64;
    let y1 = (bounds.max.y / cell).floor() as i64;

    let mut marks = Vec::new();
    for cx in x0..=x1 {
        for cy in y0..=y1 {
            let center = Vec2::new((cx as f32 + 0.5) * cell, (cy as f32 + 0.5) * cell);
            if noise::wave_break(center.x, center.y, cell, threshold) {
                marks.push(center);
            }
        }
    }
    marks
}

/// Overview of the bounded world in a corner of the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimap {
    /// Screen rectangle the map is drawn into
    pub screen: Rect,
    /// World rectangle it shows
    pub world: Rect,
}

impl Minimap {
    /// Fraction of the shorter canvas side the map occupies
    const SCALE: f32 = 0.22;
    const PADDING: f32 = 12.0;

    /// Bottom-right corner placement, keeping the world's aspect ratio
    pub fn new(world: Rect, viewport: Viewport) -> Self {
        let side = viewport.width().min(viewport.height()) * Self::SCALE;
        let aspect = if world.height() > 0.0 {
            world.width() / world.height()
        } else {
            1.0
        };
        let size = if aspect >= 1.0 {
            Vec2::new(side, side / aspect)
        } else {
            Vec2::new(side * aspect, side)
        };
        let max = viewport.size() - Vec2::splat(Self::PADDING);
        Self {
            screen: Rect::new(max - size, max),
            world,
        }
    }

    /// Screen position of a world point; points outside the world are
    /// pinned to the map border
    pub fn project(&self, pos: Vec2) -> Vec2 {
        let world_size = Vec2::new(self.world.width(), self.world.height()).max(Vec2::splat(1.0));
        let t = ((pos - self.world.min) / world_size).clamp(Vec2::ZERO, Vec2::ONE);
        self.screen.min + t * Vec2::new(self.screen.width(), self.screen.height())
    }

    /// Screen length of a world distance along x
    pub fn scale(&self, distance: f32) -> f32 {
        distance * self.screen.width() / self.world.width().max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berg(points: u32, seed: f64) -> Iceberg {
        Iceberg {
            pos: Vec2::new(100.0, -40.0),
            size: 30.0,
            points,
            seed,
        }
    }

    #[test]
    fn test_iceberg_outline_inside_collision_circle() {
        let b = berg(9, 17.3);
        let outline = iceberg_outline(&b);
        assert_eq!(outline.len(), 9);
        for p in &outline {
            let r = p.distance(b.pos);
            assert!(r <= b.size + 1e-3);
            assert!(r >= b.size * OUTLINE_MIN_RADIUS - 1e-3);
        }
        assert_eq!(outline, iceberg_outline(&b));
    }

    #[test]
    fn test_iceberg_outline_min_points() {
        assert_eq!(iceberg_outline(&berg(0, 1.0)).len(), 3);
    }

    #[test]
    fn test_iceberg_outline_varies_with_seed() {
        assert_ne!(iceberg_outline(&berg(8, 1.0)), iceberg_outline(&berg(8, 2.0)));
    }

    #[test]
    fn test_hull_points_along_heading() {
        let cfg = ShipConfig::default();
        let mut ship = Ship::new(Vec2::new(10.0, 10.0), &cfg);
        ship.heading = 0.0;
        let hull = hull_outline(&ship, &cfg);
        assert!((hull[0] - Vec2::new(10.0 + cfg.length / 2.0, 10.0)).length() < 1e-4);
        // Starboard is +y when heading east
        assert!(hull[1].y > ship.pos.y);
        assert!(hull[4].y < ship.pos.y);
        assert!(hull[2].x < ship.pos.x && hull[3].x < ship.pos.x);
    }

    #[test]
    fn test_rudder_line_starts_at_stern() {
        let cfg = ShipConfig::default();
        let mut ship = Ship::new(Vec2::ZERO, &cfg);
        ship.heading = 0.0;
        let (from, to) = rudder_line(&ship, &cfg);
        assert!((from - Vec2::new(-cfg.length / 2.0, 0.0)).length() < 1e-4);
        assert!(to.x < from.x);
        ship.rudder = 0.5;
        let (_, turned) = rudder_line(&ship, &cfg);
        // Right rudder swings the trailing edge to starboard
        assert!(turned.y > 0.0);
    }

    #[test]
    fn test_wave_marks_pinned_to_world() {
        let vp = Viewport::new(400.0, 300.0);
        let a = wave_marks(&Camera::new(Vec2::ZERO, vp), 40.0, 0.3);
        let b = wave_marks(&Camera::new(Vec2::new(80.0, 40.0), vp), 40.0, 0.3);
        assert!(!a.is_empty());
        let overlap = Camera::new(Vec2::ZERO, vp).bounds().expand(-100.0);
        for m in a.iter().filter(|m| overlap.contains(**m)) {
            assert!(b.contains(m));
        }
        assert!(wave_marks(&Camera::new(Vec2::ZERO, vp), 0.0, 0.3).is_empty());
    }

    #[test]
    fn test_minimap_projection() {
        let world = Rect::from_center_size(Vec2::ZERO, Vec2::new(6000.0, 6000.0));
        let map = Minimap::new(world, Viewport::new(1000.0, 500.0));
        assert!((map.screen.width() - 110.0).abs() < 1e-3);
        assert_eq!(map.screen.max, Vec2::new(988.0, 488.0));
        assert_eq!(map.project(world.min), map.screen.min);
        assert_eq!(map.project(world.max), map.screen.max);
        assert_eq!(
            map.project(Vec2::new(1e6, -1e6)),
            Vec2::new(map.screen.max.x, map.screen.min.y)
        );
        assert!((map.scale(6000.0) - map.screen.width()).abs() < 1e-3);
    }

    #[test]
    fn test_visible_icebergs_filters_by_camera() {
        let mut world = World::new(500.0);
        world.insert_iceberg(berg(6, 0.0));
        world.insert_iceberg(Iceberg {
            pos: Vec2::new(5000.0, 5000.0),
            ..berg(6, 1.0)
        });
        let cam = Camera::new(Vec2::ZERO, Viewport::new(400.0, 300.0));
        let seen: Vec<_> = visible_icebergs(&world, &cam, 60.0).collect();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].pos, Vec2::new(100.0, -40.0));
    }
}
