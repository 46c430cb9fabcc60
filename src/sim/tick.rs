//! Per-frame simulation step
//!
//! One call to [`tick`] runs physics, world generation, collision, goal and
//! coal burn, strictly in that order. A session in a terminal phase is left
//! untouched.

use serde::{Deserialize, Serialize};

use super::encounter::{find_collision, reached_goal};
use super::state::{GameState, SessionPhase};
use crate::consts::{MAX_DT_SCALE, NOMINAL_FRAME_SECS};

/// Held keys, sampled once at the top of the tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Ahead (throttle up)
    pub up: bool,
    /// Astern (throttle down)
    pub down: bool,
    /// Rudder to port
    pub left: bool,
    /// Rudder to starboard
    pub right: bool,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// New chunks came into view and were populated
    ChunksGenerated { count: usize },
    /// Ran into an iceberg; the session is over
    Collision { iceberg: usize },
    /// Entered the goal circle
    GoalReached { elapsed_secs: f32 },
    /// The last of the coal was burned
    CoalDepleted,
}

/// Advance the session by one frame.
///
/// `dt` is the frame-time scaling factor (1.0 = one 60 Hz frame), clamped to
/// [0, 2]. Returns the events raised this tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase.is_terminal() {
        return events;
    }
    let dt = dt.clamp(0.0, MAX_DT_SCALE);

    state.time_ticks += 1;
    state.elapsed_secs += dt * NOMINAL_FRAME_SECS;

    // Physics
    let fuel = state.coal.map(|c| c.has_fuel());
    state.ship.step(input, dt, fuel, &state.config.ship);

    // Cover the newly visible region
    let bounds = state.visible_bounds();
    let safe_center = state.safe_center();
    let count = state
        .world
        .ensure_generated(&bounds, state.viewport, safe_center, &state.config.world);
    if count > 0 {
        events.push(GameEvent::ChunksGenerated { count });
    }

    // Icebergs first: touching both in one tick is a loss
    if let Some(contact) = find_collision(state.ship.pos, &state.world, &state.config) {
        state.phase = SessionPhase::GameOver;
        log::info!(
            "Struck iceberg {} after {:.1}s at ({:.0}, {:.0})",
            contact.iceberg,
            state.elapsed_secs,
            state.ship.pos.x,
            state.ship.pos.y
        );
        events.push(GameEvent::Collision {
            iceberg: contact.iceberg,
        });
    } else if let Some(goal) = state.goal {
        if reached_goal(state.ship.pos, &goal) {
            state.phase = SessionPhase::Won;
            log::info!("Goal reached in {:.1}s", state.elapsed_secs);
            events.push(GameEvent::GoalReached {
                elapsed_secs: state.elapsed_secs,
            });
        }
    }

    // Burn coal for the distance actually covered
    if let Some(coal) = state.coal.as_mut() {
        let ship_cfg = &state.config.ship;
        if coal.deplete(state.ship.speed, ship_cfg.max_speed, dt, &state.config.coal) {
            log::info!("Out of coal after {:.1}s", state.elapsed_secs);
            events.push(GameEvent::CoalDepleted);
        }
    }

    events
}
