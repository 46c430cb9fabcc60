//! HUD text and the restart button
//!
//! Pure layout and formatting; the canvas painter draws whatever these
//! return.

use glam::Vec2;

use crate::sim::{Coal, GameState, Port, SessionPhase, Viewport};

/// Screen-space rectangle of a clickable button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ButtonRect {
    /// Inclusive of the border
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 56.0;
/// Gap between the canvas middle (where the banner sits) and the button
const BUTTON_DROP: f32 = 48.0;

/// Restart button, centered horizontally just below the banner
pub fn restart_button(viewport: Viewport) -> ButtonRect {
    let width = BUTTON_WIDTH.min(viewport.width());
    let height = BUTTON_HEIGHT.min(viewport.height());
    ButtonRect {
        x: (viewport.width() - width) / 2.0,
        y: (viewport.height() / 2.0 + BUTTON_DROP).min(viewport.height() - height),
        width,
        height,
    }
}

pub const RESTART_LABEL: &str = "Restart";

/// Remaining coal as a whole percentage
pub fn coal_label(coal: &Coal) -> String {
    format!("Coal: {:.0}%", coal.fraction() * 100.0)
}

/// Session clock as m:ss.t
pub fn clock_label(elapsed_secs: f32) -> String {
    let tenths = (elapsed_secs.max(0.0) * 10.0).round() as u64;
    let minutes = tenths / 600;
    let rem = tenths % 600;
    format!("Time: {minutes}:{:02}.{}", rem / 10, rem % 10)
}

/// Straight-line distance to the goal, in world units
pub fn goal_label(ship_pos: Vec2, goal: &Port) -> String {
    format!("Goal: {:.0}", ship_pos.distance(goal.pos))
}

/// Headline for the end screen; `None` while running
pub fn banner(phase: SessionPhase) -> Option<&'static str> {
    match phase {
        SessionPhase::Running => None,
        SessionPhase::GameOver => Some("Struck an iceberg!"),
        SessionPhase::Won => Some("Safe harbor reached!"),
    }
}

/// Every top-left HUD line for the current state, top to bottom
pub fn status_lines(state: &GameState) -> Vec<String> {
    let mut lines = vec![clock_label(state.elapsed_secs)];
    if let Some(coal) = &state.coal {
        lines.push(coal_label(coal));
    }
    if let Some(goal) = &state.goal {
        lines.push(goal_label(state.ship.pos, goal));
    }
    lines
}
