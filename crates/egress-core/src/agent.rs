//! Agent state: grid positions, the escaped sentinel, and health.

use crate::action::Action;
use std::fmt;

/// A cell coordinate inside a room.
///
/// `x` grows rightward and `y` grows upward; `(0, 0)` is the
/// bottom-left cell. Coordinates are signed so that offset arithmetic
/// can go out of bounds before being clamped or rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Column, `0..width` when in bounds.
    pub x: i32,
    /// Row, `0..height` when in bounds.
    pub y: i32,
}

impl Pos {
    /// Construct from components.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The raw (unclamped) cell this position shifts to under `action`.
    pub fn offset_by(self, action: Action) -> Pos {
        let (dx, dy) = action.offset();
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The cell this position shifts to under `action`, clamped to a
    /// `width x height` room. An action that would leave the room
    /// resolves to the boundary cell, so moving into a wall of the
    /// world behaves like choosing to stay.
    pub fn step_clamped(self, action: Action, width: i32, height: i32) -> Pos {
        let (dx, dy) = action.offset();
        Pos {
            x: (self.x + dx).clamp(0, width - 1),
            y: (self.y + dy).clamp(0, height - 1),
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where an agent is, or the fact that it has left the room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentPos {
    /// Standing on a grid cell.
    At(Pos),
    /// Escaped through an exit. Distinct from every grid coordinate;
    /// an escaped agent takes no further part in the simulation and
    /// no longer occupies a cell.
    Escaped,
}

impl AgentPos {
    /// The grid position, if still inside the room.
    pub fn pos(self) -> Option<Pos> {
        match self {
            AgentPos::At(p) => Some(p),
            AgentPos::Escaped => None,
        }
    }

    /// Whether the agent has left the room.
    pub fn is_escaped(self) -> bool {
        matches!(self, AgentPos::Escaped)
    }
}

/// One learning agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    /// Current location, or escaped.
    pub pos: AgentPos,
    /// Remaining health, `0..=MAX_HEALTH`. A dead agent (health 0)
    /// stays on its cell for the rest of the epoch, visible to the
    /// perception of others but no longer acting.
    pub health: u8,
}

impl Agent {
    /// Health an agent spawns with, and a bandage restores to.
    pub const MAX_HEALTH: u8 = 2;

    /// A full-health agent standing on `pos`.
    pub fn spawn(pos: Pos) -> Self {
        Self {
            pos: AgentPos::At(pos),
            health: Self::MAX_HEALTH,
        }
    }

    /// Whether this agent still acts: inside the room with health
    /// above zero.
    pub fn is_active(&self) -> bool {
        self.health > 0 && !self.pos.is_escaped()
    }

    /// The cell this agent shows up on in perception scans. Dead
    /// agents remain visible; escaped agents are gone.
    pub fn occupied_cell(&self) -> Option<Pos> {
        self.pos.pos()
    }
}
