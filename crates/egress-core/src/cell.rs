//! Grid cell kinds, passability, and the persisted symbol table.

use std::fmt;

/// The material occupying one grid cell.
///
/// Two kinds are stateful: [`Cell::Glass`] breaks into [`Cell::Shards`]
/// and [`Cell::Door`] opens into [`Cell::OpenDoor`] when an agent
/// pushes against them, and a collected [`Cell::Bandage`] reverts to
/// [`Cell::Floor`]. Those transitions belong to the simulator; this
/// type only fixes the vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Plain walkable ground.
    Floor,
    /// Solid wall.
    Wall,
    /// Intact glass pane; blocks movement until broken.
    Glass,
    /// Broken glass; walkable, but entering costs one health.
    Shards,
    /// Closed door; blocks movement until opened.
    Door,
    /// Opened door; walkable.
    OpenDoor,
    /// Bandage pickup; walking on it restores full health.
    Bandage,
    /// Exit; entering it escapes the room.
    Exit,
}

impl Cell {
    /// Whether an agent may stand on this cell.
    ///
    /// Movement resolution and layout validation both use this
    /// classification; there is no other notion of passability.
    pub fn is_passable(self) -> bool {
        match self {
            Cell::Floor | Cell::Shards | Cell::OpenDoor | Cell::Bandage | Cell::Exit => true,
            Cell::Wall | Cell::Glass | Cell::Door => false,
        }
    }

    /// The character this cell is written as in the room text format.
    pub fn symbol(self) -> char {
        match self {
            Cell::Floor => '.',
            Cell::Wall => '=',
            Cell::Glass => '~',
            Cell::Shards => '^',
            Cell::Door => 'H',
            Cell::OpenDoor => ']',
            Cell::Bandage => '+',
            Cell::Exit => 'X',
        }
    }

    /// Parse a room-text character. Returns `None` for anything that is
    /// not a cell symbol, including the agent start marker `@`.
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '.' => Some(Cell::Floor),
            '=' => Some(Cell::Wall),
            '~' => Some(Cell::Glass),
            '^' => Some(Cell::Shards),
            'H' => Some(Cell::Door),
            ']' => Some(Cell::OpenDoor),
            '+' => Some(Cell::Bandage),
            'X' => Some(Cell::Exit),
            _ => None,
        }
    }

    /// All cell kinds, for exhaustive sweeps in validation and tests.
    pub const ALL: [Cell; 8] = [
        Cell::Floor,
        Cell::Wall,
        Cell::Glass,
        Cell::Shards,
        Cell::Door,
        Cell::OpenDoor,
        Cell::Bandage,
        Cell::Exit,
    ];
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_round_trips_for_all_cells() {
        for cell in Cell::ALL {
            assert_eq!(Cell::from_symbol(cell.symbol()), Some(cell));
        }
    }

    #[test]
    fn agent_marker_is_not_a_cell() {
        assert_eq!(Cell::from_symbol('@'), None);
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        for symbol in ['?', ' ', '#', 'x', 'h'] {
            assert_eq!(Cell::from_symbol(symbol), None, "{:?} should not parse", symbol);
        }
    }

    #[test]
    fn passability_matches_cell_kind() {
        assert!(Cell::Floor.is_passable());
        assert!(Cell::Shards.is_passable());
        assert!(Cell::OpenDoor.is_passable());
        assert!(Cell::Bandage.is_passable());
        assert!(Cell::Exit.is_passable());
        assert!(!Cell::Wall.is_passable());
        assert!(!Cell::Glass.is_passable());
        assert!(!Cell::Door.is_passable());
    }

    #[test]
    fn symbols_are_distinct() {
        for a in Cell::ALL {
            for b in Cell::ALL {
                if a != b {
                    assert_ne!(a.symbol(), b.symbol());
                }
            }
        }
    }
}
