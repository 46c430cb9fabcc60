//! Game state and session lifecycle
//!
//! [`GameState`] owns everything one session needs. Nothing is global, so
//! tests can run any number of independent sessions side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::{Rect, Viewport};
use super::coal::Coal;
use super::ship::Ship;
use super::world::World;
use crate::config::GameConfig;

/// Where the session stands. Both terminal phases stick until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ship under way
    Running,
    /// Hit an iceberg
    GameOver,
    /// Reached the goal
    Won,
}

impl SessionPhase {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionPhase::Running)
    }
}

/// Side of the bounded world rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    /// Point at fraction `t` along this edge of `rect`
    pub fn point_along(&self, rect: &Rect, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let x = rect.min.x + t * rect.width();
        let y = rect.min.y + t * rect.height();
        match self {
            // Screen coordinates: north is min y
            Edge::North => Vec2::new(x, rect.min.y),
            Edge::South => Vec2::new(x, rect.max.y),
            Edge::West => Vec2::new(rect.min.x, y),
            Edge::East => Vec2::new(rect.max.x, y),
        }
    }
}

/// A circular harbor: the start port or the goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub pos: Vec2,
    pub radius: f32,
    pub edge: Edge,
}

/// The bounded world of a Voyage session, centered on the origin
pub fn world_rect(cfg: &GameConfig) -> Rect {
    Rect::from_center_size(
        Vec2::ZERO,
        Vec2::new(cfg.voyage.world_width, cfg.voyage.world_height),
    )
}

/// Pick start and goal ports on two different edges.
///
/// The start edge is uniform over all four, the goal edge uniform over the
/// remaining three, and each position is uniform along its (inset) edge.
pub fn place_ports(rng: &mut Pcg32, cfg: &GameConfig) -> (Port, Port) {
    let inner = world_rect(cfg).expand(-cfg.voyage.edge_inset);

    let start_idx = rng.random_range(0..Edge::ALL.len());
    let mut goal_idx = rng.random_range(0..Edge::ALL.len() - 1);
    if goal_idx >= start_idx {
        goal_idx += 1;
    }

    let start_edge = Edge::ALL[start_idx];
    let goal_edge = Edge::ALL[goal_idx];
    let start = Port {
        pos: start_edge.point_along(&inner, rng.random::<f32>()),
        radius: cfg.voyage.port_radius,
        edge: start_edge,
    };
    let goal = Port {
        pos: goal_edge.point_along(&inner, rng.random::<f32>()),
        radius: cfg.voyage.goal_radius,
        edge: goal_edge,
    };
    (start, goal)
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) viewport: Viewport,
    /// Seed the session RNG was created from
    seed: u64,
    rng: Pcg32,
    /// Current phase
    pub phase: SessionPhase,
    /// Player ship; its position is the camera
    pub ship: Ship,
    /// `None` in Open mode
    pub coal: Option<Coal>,
    /// Generated icebergs
    pub world: World,
    pub start: Option<Port>,
    pub goal: Option<Port>,
    /// Seconds since the session started; frozen once terminal
    pub elapsed_secs: f32,
    /// Simulation ticks run this session
    pub time_ticks: u64,
    /// How many sessions this state has started (1 after `new`)
    pub session_count: u32,
}

impl GameState {
    /// Create a running session. `config` should already be validated.
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64) -> Self {
        let mut state = Self {
            world: World::new(config.world.chunk_size),
            ship: Ship::new(Vec2::ZERO, &config.ship),
            coal: None,
            config,
            viewport,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Running,
            start: None,
            goal: None,
            elapsed_secs: 0.0,
            time_ticks: 0,
            session_count: 0,
        };
        state.reset();
        state
    }

    /// Start a fresh session with the same config.
    ///
    /// Ship, coal, icebergs, ports and clock are all re-created; icebergs
    /// come back on the next tick. The RNG keeps its stream, so port
    /// placement differs from the previous session.
    pub fn reset(&mut self) {
        if self.config.mode.has_ports() {
            let (start, goal) = place_ports(&mut self.rng, &self.config);
            self.start = Some(start);
            self.goal = Some(goal);
        } else {
            self.start = None;
            self.goal = None;
        }

        self.ship = Ship::new(self.safe_center(), &self.config.ship);
        self.coal = self
            .config
            .mode
            .has_coal()
            .then(|| Coal::new(&self.config.coal));
        self.world.clear();
        self.phase = SessionPhase::Running;
        self.elapsed_secs = 0.0;
        self.time_ticks = 0;
        self.session_count += 1;

        log::info!(
            "Session {} started ({} mode, seed {})",
            self.session_count,
            self.config.mode.as_str(),
            self.seed
        );
        if let (Some(start), Some(goal)) = (&self.start, &self.goal) {
            log::info!(
                "Start port {:?} at ({:.0}, {:.0}), goal {:?} at ({:.0}, {:.0})",
                start.edge,
                start.pos.x,
                start.pos.y,
                goal.edge,
                goal.pos.x,
                goal.pos.y
            );
        }
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Canvas resized. Affects which chunks are visible and how densely
    /// new chunks are populated.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Point the iceberg-free zone is centered on
    pub fn safe_center(&self) -> Vec2 {
        self.start.map(|p| p.pos).unwrap_or(Vec2::ZERO)
    }

    /// World rectangle currently on screen
    pub fn visible_bounds(&self) -> Rect {
        self.viewport.bounds_at(self.ship.pos)
    }

    /// Bounded world (Voyage only)
    pub fn world_bounds(&self) -> Option<Rect> {
        self.config.mode.has_ports().then(|| world_rect(&self.config))
    }

    /// Whether the ship may still apply thrust
    pub fn has_fuel(&self) -> bool {
        self.coal.is_none_or(|c| c.has_fuel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameMode;

    #[test]
    fn test_new_open_session() {
        let state = GameState::new(GameConfig::for_mode(GameMode::Open), Viewport::default(), 1);
        assert_eq!(state.phase, SessionPhase::Running);
        assert!(state.coal.is_none());
        assert!(state.goal.is_none());
        assert!(state.world_bounds().is_none());
        assert_eq!(state.ship.pos, Vec2::ZERO);
        assert_eq!(state.session_count, 1);
        assert!(state.has_fuel());
    }

    #[test]
    fn test_new_voyage_session() {
        let cfg = GameConfig::for_mode(GameMode::Voyage);
        let state = GameState::new(cfg.clone(), Viewport::default(), 7);
        let start = state.start.unwrap();
        let goal = state.goal.unwrap();
        assert_eq!(state.ship.pos, start.pos);
        assert_eq!(state.ship.heading, cfg.ship.initial_heading);
        assert_eq!(state.coal.unwrap().level(), cfg.coal.max_coal);
        assert_ne!(start.edge, goal.edge);
        assert!(state.world_bounds().unwrap().contains(goal.pos));
    }

    #[test]
    fn test_ports_always_on_distinct_edges() {
        let cfg = GameConfig::for_mode(GameMode::Voyage);
        let inner = world_rect(&cfg).expand(-cfg.voyage.edge_inset);
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen_start = [false; 4];
        for _ in 0..400 {
            let (start, goal) = place_ports(&mut rng, &cfg);
            assert_ne!(start.edge, goal.edge);
            assert!(inner.expand(0.01).contains(start.pos));
            assert!(inner.expand(0.01).contains(goal.pos));
            let idx = Edge::ALL.iter().position(|e| *e == start.edge).unwrap();
            seen_start[idx] = true;
        }
        assert!(seen_start.iter().all(|s| *s));
    }

    #[test]
    fn test_edge_points() {
        let r = Rect::new(Vec2::new(-10.0, -20.0), Vec2::new(10.0, 20.0));
        assert_eq!(Edge::North.point_along(&r, 0.5), Vec2::new(0.0, -20.0));
        assert_eq!(Edge::South.point_along(&r, 0.0), Vec2::new(-10.0, 20.0));
        assert_eq!(Edge::West.point_along(&r, 1.0), Vec2::new(-10.0, 20.0));
        assert_eq!(Edge::East.point_along(&r, 0.25), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_same_seed_same_ports() {
        let cfg = GameConfig::for_mode(GameMode::Voyage);
        let a = GameState::new(cfg.clone(), Viewport::default(), 42);
        let b = GameState::new(cfg, Viewport::default(), 42);
        assert_eq!(a.start, b.start);
        assert_eq!(a.goal, b.goal);
    }

    #[test]
    fn test_resize_clamped_viewport() {
        let mut state =
            GameState::new(GameConfig::for_mode(GameMode::Open), Viewport::default(), 3);
        state.resize(Viewport::new(0.0, 0.0));
        assert!(state.viewport().area() > 0.0);
        assert!(state.visible_bounds().contains(state.ship.pos));
    }

    #[test]
    fn test_phase_terminal() {
        assert!(!SessionPhase::Running.is_terminal());
        assert!(SessionPhase::GameOver.is_terminal());
        assert!(SessionPhase::Won.is_terminal());
    }
}
