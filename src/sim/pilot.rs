//! Autopilot for idle/demo play
//!
//! Produces the same [`TickInput`] a player would, so the simulation cannot
//! tell the difference. Heads for the goal (or straight on in Open mode) and
//! swerves away from the nearest iceberg in its path.

use glam::Vec2;

use super::ship::Ship;
use super::state::GameState;
use super::tick::TickInput;
use crate::normalize_angle;

/// Heading error tolerated before touching the rudder (radians)
const DEADBAND: f32 = 0.05;
/// How far ahead to look for icebergs
const LOOKAHEAD: f32 = 260.0;
/// Extra lateral clearance wanted around an iceberg
const CLEARANCE: f32 = 25.0;

/// Full ahead, rudder toward the bearing of `target`
pub fn steer_toward(ship: &Ship, target: Vec2) -> TickInput {
    let to_target = target - ship.pos;
    if to_target.length_squared() < 1.0 {
        return TickInput::default();
    }
    let bearing = to_target.y.atan2(to_target.x);
    let error = normalize_angle(bearing - ship.heading);
    TickInput {
        up: true,
        down: false,
        left: error < -DEADBAND,
        right: error > DEADBAND,
    }
}

/// Pick the input for this tick
pub fn autopilot(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let target = state
        .goal
        .map(|g| g.pos)
        .unwrap_or(ship.pos + ship.forward() * 1000.0);
    let mut input = steer_toward(ship, target);

    let forward = ship.forward();
    let ship_radius = state.config.ship.collision_radius();

    // Closest iceberg inside the corridor ahead
    let threat = state
        .world
        .icebergs_near(ship.pos, LOOKAHEAD)
        .filter_map(|(_, berg)| {
            let rel = berg.pos - ship.pos;
            let ahead = rel.dot(forward);
            let lateral = forward.perp_dot(rel);
            let corridor = berg.size + ship_radius + CLEARANCE;
            (ahead > 0.0 && ahead < LOOKAHEAD && lateral.abs() < corridor)
                .then_some((ahead, lateral))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((ahead, lateral)) = threat {
        // Positive lateral is the starboard side: turn to port, and vice versa
        input.left = lateral >= 0.0;
        input.right = lateral < 0.0;
        // Too close to swing clear at full speed
        if ahead < LOOKAHEAD / 3.0 {
            input.up = false;
        }
    }

    input
}
