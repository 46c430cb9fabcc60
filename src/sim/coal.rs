//! Coal supply
//!
//! Burned in proportion to how fast the ship is moving, never refilled
//! within a session. An empty bunker does not end the run by itself: the
//! ship just loses thrust and coasts to a stop.

use serde::{Deserialize, Serialize};

use crate::config::CoalConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coal {
    level: f32,
    max: f32,
}

impl Coal {
    /// Full bunker
    pub fn new(cfg: &CoalConfig) -> Self {
        Self {
            level: cfg.max_coal,
            max: cfg.max_coal,
        }
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Remaining coal as a fraction in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            (self.level / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn has_fuel(&self) -> bool {
        self.level > 0.0
    }

    /// Burn coal for one tick at `speed`.
    ///
    /// Returns `true` only on the tick the bunker runs dry.
    pub fn deplete(&mut self, speed: f32, max_speed: f32, dt: f32, cfg: &CoalConfig) -> bool {
        if speed == 0.0 || !self.has_fuel() || max_speed <= 0.0 {
            return false;
        }
        let burn = cfg.depletion_rate * (speed.abs() / max_speed) * dt;
        self.level = (self.level - burn).max(0.0);
        !self.has_fuel()
    }
}
