//! The eight-cell cross perception and its dense encoding.
//!
//! Agents see a plus-shaped cross of reach two:
//!
//! ```text
//!       [ ]
//!       [ ]
//! [ ][ ] @ [ ][ ]
//!       [ ]
//!       [ ]
//! ```
//!
//! Diagonals are invisible, and each visible cell collapses to one of
//! three [`Percept`] states. The whole view therefore encodes into
//! `3^8` distinct values, which is what keeps the state space small
//! enough for dense tables.

use egress_core::{Agent, Cell, Pos, MAX_ROOM_SIZE};
use egress_room::Room;

/// Number of cells an agent can see.
pub const VISION_CELLS: usize = 8;

/// Offsets of the visible cells relative to the agent, in encoding
/// order. The order is part of the table layout and never changes.
pub const VISION_OFFSETS: [(i32, i32); VISION_CELLS] = [
    (-2, 0),
    (-1, 0),
    (1, 0),
    (2, 0),
    (0, -2),
    (0, -1),
    (0, 1),
    (0, 2),
];

/// What an agent perceives in one visible cell.
///
/// The discriminants are the base-3 digits of the encoded perception.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Percept {
    /// Nothing notable: floor, walls, closed doors, intact glass, and
    /// everything out of bounds.
    Deactivated = 0,
    /// A cell whose state visibly changed: shards, an open door, or a
    /// bandage.
    Activated = 1,
    /// Another agent stands (or lies) on the cell. Overrides the cell
    /// state.
    HasAgent = 2,
}

impl Percept {
    /// Number of distinct perceptual states per cell.
    pub const STATES: usize = 3;
}

/// Per-column bitmask of agent-occupied cells.
///
/// Rebuilt from the agent list for each perception query: occupancy
/// changes within a turn and must be read fresh. Dead agents still
/// occupy their cell; escaped agents occupy nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    columns: [u16; MAX_ROOM_SIZE],
}

impl Occupancy {
    /// Scan the agent list.
    pub fn scan(agents: &[Agent]) -> Self {
        let mut columns = [0u16; MAX_ROOM_SIZE];
        for agent in agents {
            if let Some(pos) = agent.occupied_cell() {
                columns[pos.x as usize] |= 1 << pos.y;
            }
        }
        Self { columns }
    }

    /// Whether any agent occupies `pos`. Out-of-bounds cells never do.
    pub fn occupied(&self, pos: Pos) -> bool {
        let max = MAX_ROOM_SIZE as i32;
        if pos.x < 0 || pos.x >= max || pos.y < 0 || pos.y >= max {
            return false;
        }
        self.columns[pos.x as usize] & (1 << pos.y) != 0
    }
}

/// The eight perceived cell states around an agent, in
/// [`VISION_OFFSETS`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PerceptVector([Percept; VISION_CELLS]);

impl PerceptVector {
    /// Perceive the cross around `pos` against a room and the current
    /// occupancy. Occupied cells read [`Percept::HasAgent`] whatever
    /// their content; out-of-bounds cells read
    /// [`Percept::Deactivated`].
    pub fn encode(room: &Room, occupancy: &Occupancy, pos: Pos) -> Self {
        let mut states = [Percept::Deactivated; VISION_CELLS];
        for (state, (dx, dy)) in states.iter_mut().zip(VISION_OFFSETS) {
            let seen = Pos::new(pos.x + dx, pos.y + dy);
            if !room.contains(seen) {
                continue;
            }
            *state = if occupancy.occupied(seen) {
                Percept::HasAgent
            } else {
                match room.get(seen) {
                    Cell::Shards | Cell::OpenDoor | Cell::Bandage => Percept::Activated,
                    _ => Percept::Deactivated,
                }
            };
        }
        Self(states)
    }

    /// Build from explicit per-cell states.
    pub fn from_states(states: [Percept; VISION_CELLS]) -> Self {
        Self(states)
    }

    /// The perceived states in encoding order.
    pub fn states(&self) -> &[Percept; VISION_CELLS] {
        &self.0
    }

    /// Dense base-3 encoding; slot 0 is the most significant digit.
    pub fn code(&self) -> usize {
        self.0
            .iter()
            .fold(0, |acc, s| acc * Percept::STATES + *s as usize)
    }

    /// Inverse of [`PerceptVector::code`].
    ///
    /// # Panics
    ///
    /// Panics if `code` is not a valid encoding.
    pub fn from_code(code: usize) -> Self {
        assert!(
            code < Percept::STATES.pow(VISION_CELLS as u32),
            "perception code {} out of range",
            code
        );
        let mut states = [Percept::Deactivated; VISION_CELLS];
        let mut rest = code;
        for state in states.iter_mut().rev() {
            *state = match rest % Percept::STATES {
                0 => Percept::Deactivated,
                1 => Percept::Activated,
                _ => Percept::HasAgent,
            };
            rest /= Percept::STATES;
        }
        Self(states)
    }
}

impl Default for PerceptVector {
    /// The all-deactivated view: an agent alone with no activated
    /// cells in reach.
    fn default() -> Self {
        Self([Percept::Deactivated; VISION_CELLS])
    }
}
