//! Agent actions and their movement offsets.

use std::fmt;

/// One of the five moves an agent can choose on its turn.
///
/// The variant order is load-bearing: it is the column order of the
/// action-value tables, the decode order of random action draws, and
/// the tie-break order of the greedy policy (earlier variants win).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Remain on the current cell.
    Stay,
    /// One cell in the negative-x direction.
    Left,
    /// One cell in the positive-x direction.
    Right,
    /// One cell in the negative-y direction.
    Down,
    /// One cell in the positive-y direction.
    Up,
}

impl Action {
    /// Number of distinct actions.
    pub const COUNT: usize = 5;

    /// All actions in variant order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Stay,
        Action::Left,
        Action::Right,
        Action::Down,
        Action::Up,
    ];

    /// Table column occupied by this action.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Action::index`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= Action::COUNT`.
    pub fn from_index(index: usize) -> Action {
        Action::ALL[index]
    }

    /// The `(dx, dy)` displacement this action attempts.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Action::Stay => (0, 0),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Down => (0, -1),
            Action::Up => (0, 1),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Stay => "stay",
            Action::Left => "left",
            Action::Right => "right",
            Action::Down => "down",
            Action::Up => "up",
        };
        write!(f, "{}", name)
    }
}
