//! Ship handling model
//!
//! The ship is always drawn at the center of the screen, so its world
//! position doubles as the camera. One [`Ship::step`] advances throttle,
//! speed, rudder, heading and position, in that order. Changing the order
//! changes how the ship feels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::config::ShipConfig;
use crate::consts::MAX_DT_SCALE;
use crate::{heading_vector, normalize_angle};

/// Move `value` toward `target` by at most `step`, never overshooting
#[inline]
fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// World position of the hull center (the camera point)
    pub pos: Vec2,
    /// Radians; 0 points along +x, -π/2 up the screen
    pub heading: f32,
    /// Signed, forward positive
    pub speed: f32,
    pub acceleration: f32,
    /// Radians, negative turns left
    pub rudder: f32,
}

impl Ship {
    pub fn new(pos: Vec2, cfg: &ShipConfig) -> Self {
        Self {
            pos,
            heading: cfg.initial_heading,
            speed: 0.0,
            acceleration: 0.0,
            rudder: 0.0,
        }
    }

    /// Unit vector toward the bow
    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading_vector(self.heading)
    }

    /// Distance from the hull center to the pivot, positive toward the bow
    #[inline]
    fn pivot_offset(cfg: &ShipConfig) -> f32 {
        (0.5 - cfg.pivot_point) * cfg.length
    }

    /// World position of the point the hull rotates about
    pub fn pivot(&self, cfg: &ShipConfig) -> Vec2 {
        self.pos + self.forward() * Self::pivot_offset(cfg)
    }

    /// Advance one tick.
    ///
    /// `fuel` is `None` when the session has no coal model, otherwise whether
    /// any coal is left. `dt` scales every per-tick rate and is clamped to
    /// [0, 2].
    pub fn step(&mut self, input: &TickInput, dt: f32, fuel: Option<bool>, cfg: &ShipConfig) {
        let dt = dt.clamp(0.0, MAX_DT_SCALE);
        let has_fuel = fuel.unwrap_or(true);
        let throttle_up = input.up && !input.down;
        let throttle_down = input.down && !input.up;

        // 1. Acceleration
        self.acceleration = if has_fuel {
            if throttle_up {
                cfg.accel_power
            } else if throttle_down {
                -cfg.accel_power
            } else {
                approach(self.acceleration, 0.0, cfg.accel_decay * dt)
            }
        } else if throttle_down && self.speed > 0.0 {
            // Out of coal: braking toward a standstill is all that's left
            -cfg.accel_power
        } else if throttle_up && self.speed < 0.0 {
            cfg.accel_power
        } else {
            0.0
        };

        // 2. Speed
        if self.acceleration != 0.0 {
            self.speed = if has_fuel {
                self.speed + self.acceleration * dt
            } else {
                approach(self.speed, 0.0, self.acceleration.abs() * dt)
            };
            self.speed = self.speed.clamp(-cfg.max_reverse_speed, cfg.max_speed);
        }
        let saturated = self.speed >= cfg.max_speed || self.speed <= -cfg.max_reverse_speed;
        if self.acceleration == 0.0 || saturated || !has_fuel {
            self.speed = approach(self.speed, 0.0, cfg.friction * dt);
        }

        // 3. Rudder
        let rudder_target = if input.left && !input.right {
            -cfg.max_rudder_angle
        } else if input.right && !input.left {
            cfg.max_rudder_angle
        } else {
            0.0
        };
        self.rudder = approach(self.rudder, rudder_target, cfg.rudder_speed * dt);

        // 4. Turning: no steerage at rest, full authority at max speed
        let effectiveness = (self.speed.abs() / cfg.max_speed).min(1.0);
        let old_forward = self.forward();
        self.heading =
            normalize_angle(self.heading + self.rudder * cfg.turn_rate * effectiveness * dt);

        // 5. Pivot correction: keep the pivot still while the hull swings
        self.pos += (old_forward - self.forward()) * Self::pivot_offset(cfg);

        // 6. Translation
        self.pos += self.forward() * self.speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cfg() -> ShipConfig {
        ShipConfig::default()
    }

    fn input(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_full_ahead_reaches_but_never_exceeds_max() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        let ahead = input(true, false, false, false);
        for _ in 0..2000 {
            ship.step(&ahead, 1.0, None, &c);
            assert!(ship.speed <= c.max_speed);
        }
        assert!(ship.speed > c.max_speed - 2.0 * c.friction);
        // Heading -π/2: the ship moved up the screen
        assert!(ship.pos.y < -1000.0);
        assert!(ship.pos.x.abs() < 1e-2);
    }

    #[test]
    fn test_reverse_is_bounded() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        let astern = input(false, true, false, false);
        for _ in 0..2000 {
            ship.step(&astern, 1.0, Some(true), &c);
            assert!(ship.speed >= -c.max_reverse_speed);
        }
        assert!(ship.speed < 0.0);
    }

    #[test]
    fn test_acceleration_decays_without_throttle() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        ship.step(&input(true, false, false, false), 1.0, None, &c);
        assert_eq!(ship.acceleration, c.accel_power);

        let idle = TickInput::default();
        ship.step(&idle, 1.0, None, &c);
        assert!((ship.acceleration - (c.accel_power - c.accel_decay)).abs() < 1e-6);
        for _ in 0..100 {
            ship.step(&idle, 1.0, None, &c);
            assert!(ship.acceleration >= 0.0);
        }
        assert_eq!(ship.acceleration, 0.0);
    }

    #[test]
    fn test_friction_brings_ship_to_rest() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        ship.speed = 3.0;
        let idle = TickInput::default();
        for _ in 0..1000 {
            let before = ship.speed;
            ship.step(&idle, 1.0, None, &c);
            assert!(ship.speed <= before);
            assert!(ship.speed >= 0.0);
        }
        assert_eq!(ship.speed, 0.0);
    }

    #[test]
    fn test_rudder_bounds_and_self_centering() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        let port = input(false, false, true, false);
        for _ in 0..200 {
            ship.step(&port, 1.0, None, &c);
            assert!(ship.rudder >= -c.max_rudder_angle);
        }
        assert_eq!(ship.rudder, -c.max_rudder_angle);

        let idle = TickInput::default();
        for _ in 0..200 {
            ship.step(&idle, 1.0, None, &c);
            assert!(ship.rudder <= 0.0);
        }
        assert_eq!(ship.rudder, 0.0);
    }

    #[test]
    fn test_no_turning_at_rest() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::new(10.0, 20.0), &c);
        let starboard = input(false, false, false, true);
        for _ in 0..100 {
            ship.step(&starboard, 1.0, Some(false), &c);
        }
        assert_eq!(ship.heading, c.initial_heading);
        assert_eq!(ship.pos, Vec2::new(10.0, 20.0));
        assert_eq!(ship.rudder, c.max_rudder_angle);
    }

    #[test]
    fn test_turn_rate_scales_with_speed() {
        let c = cfg();
        let mut slow = Ship::new(Vec2::ZERO, &c);
        slow.speed = c.max_speed / 2.0;
        slow.acceleration = c.accel_power;
        slow.rudder = c.max_rudder_angle;
        let mut fast = slow;
        fast.speed = c.max_speed;

        let hold = input(true, false, false, true);
        slow.step(&hold, 1.0, None, &c);
        fast.step(&hold, 1.0, None, &c);
        let slow_turn = slow.heading - c.initial_heading;
        let fast_turn = fast.heading - c.initial_heading;
        assert!(slow_turn > 0.0);
        assert!(fast_turn > slow_turn);
    }

    #[test]
    fn test_pivot_stays_fixed_while_turning() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        ship.speed = 4.0;
        ship.acceleration = c.accel_power;
        ship.rudder = c.max_rudder_angle;

        let hold = input(true, false, false, true);
        let pivot_before = ship.pivot(&c);
        ship.step(&hold, 1.0, None, &c);
        assert_ne!(ship.heading, c.initial_heading);

        // The only pivot motion left is the forward translation
        let expected = pivot_before + ship.forward() * ship.speed;
        assert!(ship.pivot(&c).distance(expected) < 1e-3);
    }

    #[test]
    fn test_pivot_at_center_means_no_correction() {
        let c = ShipConfig {
            pivot_point: 0.5,
            ..cfg()
        };
        let mut ship = Ship::new(Vec2::ZERO, &c);
        ship.speed = 5.0;
        ship.acceleration = c.accel_power;
        ship.rudder = c.max_rudder_angle;
        ship.step(&input(true, false, false, true), 1.0, None, &c);
        let expected = ship.forward() * ship.speed;
        assert!(ship.pos.distance(expected) < 1e-4);
    }

    #[test]
    fn test_empty_bunker_cannot_accelerate() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        ship.speed = 2.0;
        let ahead = input(true, false, false, false);
        let mut last = ship.speed;
        for _ in 0..200 {
            ship.step(&ahead, 1.0, Some(false), &c);
            assert!(ship.speed < last || ship.speed == 0.0);
            last = ship.speed;
        }
        assert_eq!(ship.speed, 0.0);
        assert_eq!(ship.acceleration, 0.0);
    }

    #[test]
    fn test_empty_bunker_can_brake_but_not_reverse() {
        let c = cfg();
        let mut ship = Ship::new(Vec2::ZERO, &c);
        ship.speed = 1.0;
        let astern = input(false, true, false, false);
        ship.step(&astern, 1.0, Some(false), &c);
        assert!((ship.speed - (1.0 - c.accel_power - c.friction)).abs() < 1e-6);
        for _ in 0..100 {
            ship.step(&astern, 1.0, Some(false), &c);
            assert!(ship.speed >= 0.0);
        }
        assert_eq!(ship.speed, 0.0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let c = cfg();
        let mut a = Ship::new(Vec2::ZERO, &c);
        let mut b = a;
        let ahead = input(true, false, false, false);
        a.step(&ahead, 2.0, None, &c);
        b.step(&ahead, 50.0, None, &c);
        assert_eq!(a, b);
    }

    fn any_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(up, down, left, right)| TickInput { up, down, left, right })
    }

    proptest! {
        #[test]
        fn speed_and_rudder_stay_bounded(
            inputs in prop::collection::vec((any_input(), 0.0_f32..3.0, any::<bool>()), 1..400),
        ) {
            let c = cfg();
            let mut ship = Ship::new(Vec2::ZERO, &c);
            for (input, dt, fuel) in inputs {
                ship.step(&input, dt, Some(fuel), &c);
                prop_assert!(ship.speed <= c.max_speed);
                prop_assert!(ship.speed >= -c.max_reverse_speed);
                prop_assert!(ship.rudder.abs() <= c.max_rudder_angle + 1e-6);
                prop_assert!(ship.pos.is_finite());
            }
        }

        #[test]
        fn depleted_speed_only_falls(
            start in -2.0_f32..5.0,
            inputs in prop::collection::vec(any_input(), 1..200),
        ) {
            let c = cfg();
            let mut ship = Ship::new(Vec2::ZERO, &c);
            ship.speed = start;
            for input in inputs {
                let before = ship.speed;
                ship.step(&input, 1.0, Some(false), &c);
                prop_assert!(ship.speed.abs() <= before.abs());
                if before != 0.0 {
                    prop_assert!(ship.speed.abs() < before.abs());
                }
                prop_assert!(ship.speed == 0.0 || ship.speed.signum() == before.signum());
            }
        }
    }
}
