//! Loadable room configurations and the text format.
//!
//! The text format is a character grid, one row per line with the
//! **top** row on the first line. Each character is a cell symbol
//! (see [`Cell::symbol`]) except `@`, which marks a floor cell where
//! an agent starts. Blank lines carry no cells and are skipped.

use crate::error::LayoutError;
use crate::room::Room;
use egress_core::{Cell, Pos, MAX_AGENTS, MAX_ROOM_SIZE};
use smallvec::SmallVec;

/// Marks an agent start position in room text. Not a cell symbol: the
/// cell underneath is always floor.
pub const START_SYMBOL: char = '@';

/// A room plus the positions agents start an epoch on.
///
/// This is the unit of configuration: worlds are built from a layout,
/// and the text format round-trips through it.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomLayout {
    /// The grid.
    pub room: Room,
    /// Agent start cells, in spawn order. Each is a distinct,
    /// passable, in-bounds cell.
    pub starts: Vec<Pos>,
}

impl RoomLayout {
    /// Parse the text format.
    ///
    /// The first line is the top row of the room. Rows must share one
    /// width; dimensions and agent count are capped by
    /// [`MAX_ROOM_SIZE`] and [`MAX_AGENTS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use egress_room::RoomLayout;
    /// use egress_core::{Cell, Pos};
    ///
    /// let layout = RoomLayout::parse("=X=\n=.=\n=@=\n").unwrap();
    /// assert_eq!(layout.room.width(), 3);
    /// assert_eq!(layout.room.height(), 3);
    /// // The exit on the first line is the topmost row.
    /// assert_eq!(layout.room.get(Pos::new(1, 2)), Cell::Exit);
    /// // The start marker leaves a floor cell behind.
    /// assert_eq!(layout.starts, vec![Pos::new(1, 0)]);
    /// assert_eq!(layout.room.get(Pos::new(1, 0)), Cell::Floor);
    /// ```
    pub fn parse(text: &str) -> Result<RoomLayout, LayoutError> {
        let mut width = 0usize;
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        // Starts are recorded as (row, column) and mapped to grid
        // coordinates once the height is known.
        let mut marks: SmallVec<[(usize, usize); 8]> = SmallVec::new();

        for (line_idx, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(width.max(1));
            for (col, symbol) in line.chars().enumerate() {
                if width > 0 && col >= width {
                    return Err(LayoutError::InconsistentWidth {
                        line: line_idx + 1,
                        found: line.chars().count(),
                        expected: width,
                    });
                }
                if col >= MAX_ROOM_SIZE {
                    return Err(LayoutError::TooWide {
                        width: line.chars().count(),
                        max: MAX_ROOM_SIZE,
                    });
                }
                if symbol == START_SYMBOL {
                    if marks.len() == MAX_AGENTS {
                        return Err(LayoutError::TooManyAgents {
                            count: marks.len() + 1,
                            max: MAX_AGENTS,
                        });
                    }
                    marks.push((rows.len(), col));
                    row.push(Cell::Floor);
                } else {
                    match Cell::from_symbol(symbol) {
                        Some(cell) => row.push(cell),
                        None => {
                            return Err(LayoutError::UnknownSymbol {
                                line: line_idx + 1,
                                column: col + 1,
                                symbol,
                            })
                        }
                    }
                }
            }
            if width == 0 {
                width = row.len();
            } else if row.len() != width {
                return Err(LayoutError::InconsistentWidth {
                    line: line_idx + 1,
                    found: row.len(),
                    expected: width,
                });
            }
            if rows.len() >= MAX_ROOM_SIZE {
                return Err(LayoutError::TooTall {
                    height: rows.len() + 1,
                    max: MAX_ROOM_SIZE,
                });
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        // The file is read top row first; storage grows bottom-up.
        let height = rows.len();
        let mut cells = vec![Cell::Floor; width * height];
        for (r, row) in rows.iter().enumerate() {
            let y = height - 1 - r;
            for (x, cell) in row.iter().enumerate() {
                cells[y * width + x] = *cell;
            }
        }
        let starts = marks
            .into_iter()
            .map(|(r, x)| Pos::new(x as i32, (height - 1 - r) as i32))
            .collect();

        Ok(RoomLayout {
            room: Room::from_cells(width, height, cells),
            starts,
        })
    }

    /// Build a layout from raw parts, validating everything the text
    /// parser guarantees by construction.
    pub fn from_parts(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        starts: Vec<Pos>,
    ) -> Result<RoomLayout, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::Empty);
        }
        if width > MAX_ROOM_SIZE {
            return Err(LayoutError::TooWide {
                width,
                max: MAX_ROOM_SIZE,
            });
        }
        if height > MAX_ROOM_SIZE {
            return Err(LayoutError::TooTall {
                height,
                max: MAX_ROOM_SIZE,
            });
        }
        if cells.len() != width * height {
            return Err(LayoutError::DimensionMismatch {
                width,
                height,
                cells: cells.len(),
            });
        }
        let layout = RoomLayout {
            room: Room::from_cells(width, height, cells),
            starts,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check the start-position invariants: at most [`MAX_AGENTS`]
    /// starts, each on a distinct, passable, in-bounds cell.
    ///
    /// Layouts from [`RoomLayout::parse`] and
    /// [`RoomLayout::from_parts`] already satisfy this; world
    /// construction re-checks because the fields are public.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.starts.len() > MAX_AGENTS {
            return Err(LayoutError::TooManyAgents {
                count: self.starts.len(),
                max: MAX_AGENTS,
            });
        }
        for (index, start) in self.starts.iter().enumerate() {
            if !self.room.contains(*start) {
                return Err(LayoutError::StartOutOfBounds { index });
            }
            if !self.room.is_passable(*start) {
                return Err(LayoutError::StartNotPassable { index });
            }
            if self.starts[..index].contains(start) {
                return Err(LayoutError::StartOccupied { index });
            }
        }
        Ok(())
    }

    /// Serialize to the text format: top row first, `@` overlaid on
    /// start cells, every row newline-terminated.
    ///
    /// Parsing the result reproduces this layout whenever every start
    /// sits on a floor cell (always true for parsed layouts; the
    /// overlay hides whatever cell a start sits on).
    pub fn to_text(&self) -> String {
        let width = self.room.width();
        let height = self.room.height();
        let mut out = String::with_capacity(((width + 1) * height) as usize);
        for y in (0..height).rev() {
            for x in 0..width {
                let pos = Pos::new(x, y);
                if self.starts.contains(&pos) {
                    out.push(START_SYMBOL);
                } else {
                    out.push(self.room.get(pos).symbol());
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Default for RoomLayout {
    /// The fallback configuration: the default all-floor room with no
    /// agents.
    fn default() -> Self {
        Self {
            room: Room::default(),
            starts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Parsing ─────────────────────────────────────────────────

    #[test]
    fn parse_flips_rows_vertically() {
        let layout = RoomLayout::parse("X.\n..\n=.\n").unwrap();
        assert_eq!(layout.room.width(), 2);
        assert_eq!(layout.room.height(), 3);
        assert_eq!(layout.room.get(Pos::new(0, 2)), Cell::Exit, "first line is the top row");
        assert_eq!(layout.room.get(Pos::new(0, 0)), Cell::Wall, "last line is the bottom row");
    }

    #[test]
    fn parse_reads_every_symbol() {
        let layout = RoomLayout::parse(".=~^\nH]+X\n").unwrap();
        assert_eq!(layout.room.get(Pos::new(0, 1)), Cell::Floor);
        assert_eq!(layout.room.get(Pos::new(1, 1)), Cell::Wall);
        assert_eq!(layout.room.get(Pos::new(2, 1)), Cell::Glass);
        assert_eq!(layout.room.get(Pos::new(3, 1)), Cell::Shards);
        assert_eq!(layout.room.get(Pos::new(0, 0)), Cell::Door);
        assert_eq!(layout.room.get(Pos::new(1, 0)), Cell::OpenDoor);
        assert_eq!(layout.room.get(Pos::new(2, 0)), Cell::Bandage);
        assert_eq!(layout.room.get(Pos::new(3, 0)), Cell::Exit);
    }

    #[test]
    fn start_markers_become_floor_cells() {
        let layout = RoomLayout::parse("@X\n").unwrap();
        assert_eq!(layout.room.get(Pos::new(0, 0)), Cell::Floor);
        assert_eq!(layout.starts, vec![Pos::new(0, 0)]);
    }

    #[test]
    fn starts_keep_scan_order_top_row_first() {
        let layout = RoomLayout::parse("@@\n.@\n").unwrap();
        assert_eq!(
            layout.starts,
            vec![Pos::new(0, 1), Pos::new(1, 1), Pos::new(1, 0)],
            "spawn order is top row first, left to right"
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let layout = RoomLayout::parse(".X\n\n.@\n\n").unwrap();
        assert_eq!(layout.room.height(), 2);
    }

    #[test]
    fn missing_trailing_newline_is_fine() {
        let layout = RoomLayout::parse("..").unwrap();
        assert_eq!(layout.room.width(), 2);
        assert_eq!(layout.room.height(), 1);
    }

    // ── Parse errors ────────────────────────────────────────────

    #[test]
    fn empty_text_is_an_error() {
        assert_eq!(RoomLayout::parse(""), Err(LayoutError::Empty));
        assert_eq!(RoomLayout::parse("\n\n"), Err(LayoutError::Empty));
    }

    #[test]
    fn short_row_is_inconsistent() {
        assert_eq!(
            RoomLayout::parse("...\n..\n"),
            Err(LayoutError::InconsistentWidth {
                line: 2,
                found: 2,
                expected: 3,
            })
        );
    }

    #[test]
    fn long_row_is_inconsistent_not_too_wide() {
        // A row longer than the first is flagged as inconsistent even
        // when it also exceeds the width cap.
        let text = "..\n...........\n";
        assert!(matches!(
            RoomLayout::parse(text),
            Err(LayoutError::InconsistentWidth { line: 2, .. })
        ));
    }

    #[test]
    fn first_row_wider_than_cap_is_too_wide() {
        let text = "..........\n";
        assert!(matches!(
            RoomLayout::parse(text),
            Err(LayoutError::TooWide { max: 9, .. })
        ));
    }

    #[test]
    fn ten_rows_is_too_tall() {
        let text = ".\n".repeat(10);
        assert_eq!(
            RoomLayout::parse(&text),
            Err(LayoutError::TooTall { height: 10, max: 9 })
        );
    }

    #[test]
    fn unknown_symbol_is_located() {
        assert_eq!(
            RoomLayout::parse("..\n.?\n"),
            Err(LayoutError::UnknownSymbol {
                line: 2,
                column: 2,
                symbol: '?',
            })
        );
    }

    // ── Structural construction ─────────────────────────────────

    #[test]
    fn from_parts_builds_a_valid_layout() {
        let layout = RoomLayout::from_parts(
            2,
            1,
            vec![Cell::Floor, Cell::Exit],
            vec![Pos::new(0, 0)],
        )
        .unwrap();
        assert_eq!(layout.room.get(Pos::new(1, 0)), Cell::Exit);
        assert_eq!(layout.starts.len(), 1);
    }

    #[test]
    fn from_parts_rejects_mismatched_buffers() {
        assert_eq!(
            RoomLayout::from_parts(3, 2, vec![Cell::Floor; 5], vec![]),
            Err(LayoutError::DimensionMismatch {
                width: 3,
                height: 2,
                cells: 5,
            })
        );
    }

    #[test]
    fn from_parts_rejects_zero_dimensions() {
        assert_eq!(
            RoomLayout::from_parts(0, 3, vec![], vec![]),
            Err(LayoutError::Empty)
        );
    }

    #[test]
    fn from_parts_rejects_bad_starts() {
        let cells = vec![Cell::Floor, Cell::Wall];
        assert_eq!(
            RoomLayout::from_parts(2, 1, cells.clone(), vec![Pos::new(5, 0)]),
            Err(LayoutError::StartOutOfBounds { index: 0 })
        );
        assert_eq!(
            RoomLayout::from_parts(2, 1, cells.clone(), vec![Pos::new(1, 0)]),
            Err(LayoutError::StartNotPassable { index: 0 })
        );
        assert_eq!(
            RoomLayout::from_parts(2, 1, cells, vec![Pos::new(0, 0), Pos::new(0, 0)]),
            Err(LayoutError::StartOccupied { index: 1 })
        );
    }

    // ── Serialization ───────────────────────────────────────────

    #[test]
    fn to_text_writes_top_row_first_with_start_overlay() {
        let layout = RoomLayout::parse("=X=\n.@.\n").unwrap();
        assert_eq!(layout.to_text(), "=X=\n.@.\n");
    }

    #[test]
    fn default_layout_is_the_empty_fallback_room() {
        let layout = RoomLayout::default();
        assert_eq!(layout.room.width() as usize, MAX_ROOM_SIZE);
        assert_eq!(layout.room.height() as usize, MAX_ROOM_SIZE);
        assert!(layout.starts.is_empty());
        assert!(layout.validate().is_ok());
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_cell() -> impl Strategy<Value = Cell> {
        prop_oneof![
            Just(Cell::Floor),
            Just(Cell::Wall),
            Just(Cell::Glass),
            Just(Cell::Shards),
            Just(Cell::Door),
            Just(Cell::OpenDoor),
            Just(Cell::Bandage),
            Just(Cell::Exit),
        ]
    }

    proptest! {
        #[test]
        fn text_round_trips_for_generated_layouts(
            width in 1usize..=9,
            height in 1usize..=9,
            cell_seed in proptest::collection::vec(arb_cell(), 81),
            start_mask in proptest::collection::vec(any::<bool>(), 81),
        ) {
            let mut cells = Vec::with_capacity(width * height);
            let mut starts = Vec::new();
            for y in 0..height {
                for x in 0..width {
                    let i = y * 9 + x;
                    if start_mask[i] {
                        // Start cells are floor, as the parser produces.
                        cells.push(Cell::Floor);
                        starts.push(Pos::new(x as i32, y as i32));
                    } else {
                        cells.push(cell_seed[i]);
                    }
                }
            }
            let layout = RoomLayout::from_parts(width, height, cells, starts).unwrap();
            let reparsed = RoomLayout::parse(&layout.to_text()).unwrap();
            prop_assert_eq!(&reparsed.room, &layout.room);
            // Serialization reorders starts into scan order; the set
            // of start cells is what must survive.
            let mut a = reparsed.starts.clone();
            let mut b = layout.starts.clone();
            a.sort_by_key(|p| (p.x, p.y));
            b.sort_by_key(|p| (p.x, p.y));
            prop_assert_eq!(a, b);
        }
    }
}
