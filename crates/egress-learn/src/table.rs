//! Dense tabular action-value storage.
//!
//! One table holds a value for every `(position, health, perception,
//! action)` combination of the largest supported room. Two tables are
//! carried so double learning can cross-bootstrap; both are always
//! allocated, which keeps table B's contents intact while double
//! learning is toggled off.

use crate::percept::{Percept, PerceptVector, VISION_CELLS};
use egress_core::{Action, Agent, Pos, MAX_ROOM_SIZE};
use std::fmt;

/// Values of the five actions in one state, in action order.
pub type ActionValues = [f64; Action::COUNT];

/// Number of distinct perception codes.
pub const PERCEPT_SPACE: usize = Percept::STATES.pow(VISION_CELLS as u32);

/// One learning state: where an agent stands, its health, and what it
/// perceives there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Agent position; must lie inside the largest supported room.
    pub pos: Pos,
    /// Agent health, 1 or 2. Dead agents have no state.
    pub health: u8,
    /// The perceived surroundings.
    pub percept: PerceptVector,
}

impl StateKey {
    /// Assemble a key.
    pub fn new(pos: Pos, health: u8, percept: PerceptVector) -> Self {
        Self {
            pos,
            health,
            percept,
        }
    }
}

/// Which of the two tables an update writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSide {
    /// The primary table; the only one single learning touches.
    A,
    /// The secondary table used by double learning.
    B,
}

/// Action values fetched for one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableLookup {
    /// Values from table A.
    pub a: ActionValues,
    /// Values from table B, present when double learning is enabled.
    pub b: Option<ActionValues>,
}

/// The two dense action-value tables.
pub struct ValueStore {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl ValueStore {
    /// Entries per table.
    pub const ENTRIES: usize = MAX_ROOM_SIZE
        * MAX_ROOM_SIZE
        * (Agent::MAX_HEALTH as usize)
        * PERCEPT_SPACE
        * Action::COUNT;

    /// Allocate both tables with every entry set to `initial`.
    ///
    /// The initial value is the optimism constant: a value above any
    /// reachable return makes unexplored actions look attractive.
    pub fn new(initial: f64) -> Self {
        Self {
            a: vec![initial; Self::ENTRIES],
            b: vec![initial; Self::ENTRIES],
        }
    }

    /// Overwrite every entry of both tables with `value`, forgetting
    /// everything learned.
    pub fn reset(&mut self, value: f64) {
        self.a.fill(value);
        self.b.fill(value);
    }

    /// Flat offset of `(key, action)` within one table.
    ///
    /// Layout, most significant first: x, y, health − 1, perception
    /// code, action column. The same key therefore names the same
    /// five-entry block in both tables.
    ///
    /// # Panics
    ///
    /// Panics if the key's position lies outside the largest supported
    /// room or its health is not 1 or 2. Such keys are programming
    /// errors: no live agent produces them.
    pub fn entry_index(key: StateKey, action: Action) -> usize {
        let max = MAX_ROOM_SIZE as i32;
        assert!(
            key.pos.x >= 0 && key.pos.x < max && key.pos.y >= 0 && key.pos.y < max,
            "state position {} outside the {}x{} table",
            key.pos,
            MAX_ROOM_SIZE,
            MAX_ROOM_SIZE
        );
        assert!(
            key.health >= 1 && key.health <= Agent::MAX_HEALTH,
            "state health {} outside 1..={}",
            key.health,
            Agent::MAX_HEALTH
        );
        let x = key.pos.x as usize;
        let y = key.pos.y as usize;
        let hp = (key.health - 1) as usize;
        (((x * MAX_ROOM_SIZE + y) * Agent::MAX_HEALTH as usize + hp) * PERCEPT_SPACE
            + key.percept.code())
            * Action::COUNT
            + action.index()
    }

    fn block(table: &[f64], base: usize) -> ActionValues {
        let mut out = [0.0; Action::COUNT];
        out.copy_from_slice(&table[base..base + Action::COUNT]);
        out
    }

    /// Fetch the action values for `key`: table A alone, or both when
    /// `double` is set.
    pub fn lookup(&self, key: StateKey, double: bool) -> TableLookup {
        let base = Self::entry_index(key, Action::Stay);
        TableLookup {
            a: Self::block(&self.a, base),
            b: double.then(|| Self::block(&self.b, base)),
        }
    }

    /// The five-entry block for `key` from one table only.
    pub fn side_values(&self, side: TableSide, key: StateKey) -> ActionValues {
        let base = Self::entry_index(key, Action::Stay);
        match side {
            TableSide::A => Self::block(&self.a, base),
            TableSide::B => Self::block(&self.b, base),
        }
    }

    /// Read a single entry.
    pub fn value(&self, side: TableSide, key: StateKey, action: Action) -> f64 {
        let i = Self::entry_index(key, action);
        match side {
            TableSide::A => self.a[i],
            TableSide::B => self.b[i],
        }
    }

    /// Nudge one entry toward `target` by the step size `rate`:
    /// `entry += rate * (target - entry)`. Touches nothing else.
    pub fn reinforce(
        &mut self,
        side: TableSide,
        key: StateKey,
        action: Action,
        rate: f64,
        target: f64,
    ) {
        let i = Self::entry_index(key, action);
        let table = match side {
            TableSide::A => &mut self.a,
            TableSide::B => &mut self.b,
        };
        table[i] += rate * (target - table[i]);
    }
}

impl fmt::Debug for ValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStore")
            .field("entries_per_table", &Self::ENTRIES)
            .finish_non_exhaustive()
    }
}
