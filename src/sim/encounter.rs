//! Collision and goal detection
//!
//! Ship and icebergs are treated as circles: the ship's radius is half its
//! beam, an iceberg's radius is its size. A coarse square query over the
//! world's chunk buckets narrows the candidates before the exact distance
//! test.

use glam::Vec2;

use super::state::Port;
use super::world::World;
use crate::config::GameConfig;

/// Result of a ship/iceberg check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index into [`World::icebergs`]
    pub iceberg: usize,
    /// Center-to-center distance
    pub distance: f32,
    /// How far the circles overlap
    pub penetration: f32,
}

/// Exact circle/circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// First iceberg the ship overlaps, if any.
///
/// When several overlap, the deepest contact wins so the report is stable
/// regardless of bucket iteration order.
pub fn find_collision(ship_pos: Vec2, world: &World, cfg: &GameConfig) -> Option<Contact> {
    let ship_radius = cfg.ship.collision_radius();
    let search = cfg.collision_search_radius();

    world
        .icebergs_near(ship_pos, search)
        .filter_map(|(idx, berg)| {
            let distance = ship_pos.distance(berg.pos);
            let reach = ship_radius + berg.size;
            (distance < reach).then_some(Contact {
                iceberg: idx,
                distance,
                penetration: reach - distance,
            })
        })
        .max_by(|a, b| {
            a.penetration
                .total_cmp(&b.penetration)
                .then(b.iceberg.cmp(&a.iceberg))
        })
}

/// Whether the ship is inside the goal circle
#[inline]
pub fn reached_goal(ship_pos: Vec2, goal: &Port) -> bool {
    circles_overlap(ship_pos, 0.0, goal.pos, goal.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameMode;
    use crate::sim::state::Edge;
    use crate::sim::world::Iceberg;

    fn berg(pos: Vec2, size: f32) -> Iceberg {
        Iceberg {
            pos,
            size,
            points: 8,
            seed: 0.0,
        }
    }

    #[test]
    fn test_collision_boundary() {
        let cfg = GameConfig::for_mode(GameMode::Open);
        let reach = cfg.ship.collision_radius() + 40.0;
        let mut world = World::new(cfg.world.chunk_size);

        world.insert_iceberg(berg(Vec2::new(reach, 0.0), 40.0));
        assert!(find_collision(Vec2::ZERO, &world, &cfg).is_none());

        let idx = world.insert_iceberg(berg(Vec2::new(0.0, -(reach - 1.0)), 40.0));
        let contact = find_collision(Vec2::ZERO, &world, &cfg).unwrap();
        assert_eq!(contact.iceberg, idx);
        assert!((contact.penetration - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_collision_across_chunk_border() {
        let cfg = GameConfig::for_mode(GameMode::Open);
        let mut world = World::new(cfg.world.chunk_size);
        // Ship just left of a chunk edge, iceberg just right of it
        world.insert_iceberg(berg(Vec2::new(510.0, 250.0), 30.0));
        assert!(find_collision(Vec2::new(490.0, 250.0), &world, &cfg).is_some());
    }

    #[test]
    fn test_deepest_contact_wins() {
        let cfg = GameConfig::for_mode(GameMode::Open);
        let mut world = World::new(cfg.world.chunk_size);
        world.insert_iceberg(berg(Vec2::new(40.0, 0.0), 30.0));
        let deep = world.insert_iceberg(berg(Vec2::new(-10.0, 0.0), 30.0));
        assert_eq!(find_collision(Vec2::ZERO, &world, &cfg).unwrap().iceberg, deep);
    }

    #[test]
    fn test_reached_goal() {
        let goal = Port {
            pos: Vec2::new(100.0, 100.0),
            radius: 50.0,
            edge: Edge::North,
        };
        assert!(reached_goal(Vec2::new(100.0, 149.0), &goal));
        assert!(!reached_goal(Vec2::new(100.0, 150.0), &goal));
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 1.0));
        assert!(!circles_overlap(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0));
    }
}
