//! Game tuning configuration
//!
//! Every constant the simulation reads lives in [`GameConfig`]. The struct is
//! built once and handed to [`GameState::new`](crate::sim::GameState::new); the
//! simulation never mutates it. Any subset of fields can be overridden from
//! JSON, missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Which rule set a session plays under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
pub enum GameMode {
    /// Unbounded ocean, no coal, no goal. Ends only on collision.
    #[cfg_attr(not(target_arch = "wasm32"), value(alias = "endless"))]
    Open,
    /// Bounded ocean with a start port, a goal port and a coal supply
    #[default]
    Voyage,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Open => "Open",
            GameMode::Voyage => "Voyage",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" | "endless" => Some(GameMode::Open),
            "voyage" => Some(GameMode::Voyage),
            _ => None,
        }
    }

    /// Whether the session tracks coal
    pub fn has_coal(&self) -> bool {
        matches!(self, GameMode::Voyage)
    }

    /// Whether the session places a start port and a goal
    pub fn has_ports(&self) -> bool {
        matches!(self, GameMode::Voyage)
    }
}

/// Procedural iceberg field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of a generation chunk (world units)
    pub chunk_size: f32,
    /// Expected icebergs per viewport-sized area
    pub density: f32,
    /// No iceberg spawns closer than this to the start position
    pub start_safe_radius: f32,
    pub min_iceberg_size: f32,
    pub max_iceberg_size: f32,
    pub min_iceberg_points: u32,
    pub max_iceberg_points: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500.0,
            density: 20.0,
            start_safe_radius: 300.0,
            min_iceberg_size: 20.0,
            max_iceberg_size: 60.0,
            min_iceberg_points: 6,
            max_iceberg_points: 12,
        }
    }
}

/// Ship handling. Rates are per nominal 60 Hz tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Bow-to-stern length
    pub length: f32,
    /// Beam; half of it is the collision radius
    pub width: f32,
    pub max_speed: f32,
    pub max_reverse_speed: f32,
    pub accel_power: f32,
    pub accel_decay: f32,
    pub friction: f32,
    /// Rudder limit (radians)
    pub max_rudder_angle: f32,
    pub rudder_speed: f32,
    pub turn_rate: f32,
    /// Rotation point along the hull: 0 = bow, 1 = stern
    pub pivot_point: f32,
    /// Heading at session start (radians, -π/2 points up the screen)
    pub initial_heading: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            length: 80.0,
            width: 30.0,
            max_speed: 5.0,
            max_reverse_speed: 2.0,
            accel_power: 0.05,
            accel_decay: 0.01,
            friction: 0.02,
            max_rudder_angle: 0.6,
            rudder_speed: 0.02,
            turn_rate: 0.05,
            pivot_point: 0.3,
            initial_heading: -std::f32::consts::FRAC_PI_2,
        }
    }
}

impl ShipConfig {
    /// Circle radius used for collision tests
    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.width / 2.0
    }
}

/// Coal supply (Voyage only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoalConfig {
    pub max_coal: f32,
    /// Coal burned per tick at full speed
    pub depletion_rate: f32,
}

impl Default for CoalConfig {
    fn default() -> Self {
        Self {
            max_coal: 100.0,
            depletion_rate: 0.05,
        }
    }
}

/// Bounded world and port placement (Voyage only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoyageConfig {
    /// World rectangle, centered on the origin
    pub world_width: f32,
    pub world_height: f32,
    pub goal_radius: f32,
    pub port_radius: f32,
    /// Ports sit this far inside their edge
    pub edge_inset: f32,
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self {
            world_width: 6000.0,
            world_height: 6000.0,
            goal_radius: 120.0,
            port_radius: 120.0,
            edge_inset: 200.0,
        }
    }
}

/// Complete, immutable game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub world: WorldConfig,
    pub ship: ShipConfig,
    pub coal: CoalConfig,
    pub voyage: VoyageConfig,
    /// Extra slack on the coarse collision radius
    pub collision_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            world: WorldConfig::default(),
            ship: ShipConfig::default(),
            coal: CoalConfig::default(),
            voyage: VoyageConfig::default(),
            collision_margin: 10.0,
        }
    }
}

impl GameConfig {
    /// Default configuration for a mode
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Coarse search radius around the ship for iceberg collision tests
    pub fn collision_search_radius(&self) -> f32 {
        self.ship.length + self.world.max_iceberg_size + self.collision_margin
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Same tuning under another mode, re-validated since Voyage checks more
    /// fields than Open
    pub fn with_mode(mut self, mode: GameMode) -> ConfigResult<Self> {
        self.mode = mode;
        self.validate()?;
        Ok(self)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("world.chunk_size", self.world.chunk_size)?;
        positive("world.max_iceberg_size", self.world.max_iceberg_size)?;
        positive("ship.length", self.ship.length)?;
        positive("ship.width", self.ship.width)?;
        positive("ship.max_speed", self.ship.max_speed)?;
        positive("coal.max_coal", self.coal.max_coal)?;

        if self.world.density < 0.0 {
            return Err(ConfigError::Invalid {
                field: "world.density",
                reason: "must not be negative",
            });
        }
        if self.world.min_iceberg_size > self.world.max_iceberg_size {
            return Err(ConfigError::Invalid {
                field: "world.min_iceberg_size",
                reason: "must not exceed max_iceberg_size",
            });
        }
        if self.world.min_iceberg_points < 3
            || self.world.min_iceberg_points > self.world.max_iceberg_points
        {
            return Err(ConfigError::Invalid {
                field: "world.min_iceberg_points",
                reason: "must be at least 3 and not exceed max_iceberg_points",
            });
        }
        if self.ship.max_reverse_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "ship.max_reverse_speed",
                reason: "must not be negative",
            });
        }
        if !(0.0..=1.0).contains(&self.ship.pivot_point) {
            return Err(ConfigError::Invalid {
                field: "ship.pivot_point",
                reason: "must lie in [0, 1]",
            });
        }
        if self.mode.has_ports() {
            positive("voyage.world_width", self.voyage.world_width)?;
            positive("voyage.world_height", self.voyage.world_height)?;
            positive("voyage.goal_radius", self.voyage.goal_radius)?;
            let min_extent = self.voyage.world_width.min(self.voyage.world_height);
            if self.voyage.edge_inset < 0.0 || self.voyage.edge_inset * 2.0 >= min_extent {
                return Err(ConfigError::Invalid {
                    field: "voyage.edge_inset",
                    reason: "must fit inside the world rectangle",
                });
            }
        }
        Ok(())
    }

    /// Load a config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "icebound_config";

    /// Load config overrides from LocalStorage (WASM only). The stored
    /// tuning is kept but `mode` always comes from the caller.
    #[cfg(target_arch = "wasm32")]
    pub fn load(mode: GameMode) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json).and_then(|c| c.with_mode(mode)) {
                    Ok(config) => {
                        log::info!("Loaded game config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default {} config", mode.as_str());
        Self::for_mode(mode)
    }
}
