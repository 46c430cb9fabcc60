//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-time scale passed in, never read from a clock
//! - Seeded RNG and seeded noise only
//! - Stable iteration order (icebergs by insertion index)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod coal;
pub mod encounter;
pub mod noise;
pub mod pilot;
pub mod ship;
pub mod state;
pub mod tick;
pub mod world;

pub use bounds::{Rect, Viewport};
pub use coal::Coal;
pub use encounter::{Contact, find_collision, reached_goal};
pub use pilot::{autopilot, steer_toward};
pub use ship::Ship;
pub use state::{Edge, GameState, Port, SessionPhase};
pub use tick::{GameEvent, TickInput, tick};
pub use world::{ChunkKey, Iceberg, World};
