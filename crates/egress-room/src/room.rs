//! Dense room grid with bottom-left origin.

use egress_core::{Cell, Pos, MAX_ROOM_SIZE};

/// A bounded rectangular grid of cells.
///
/// Storage is row-major with `(0, 0)` at the bottom left, so cell
/// `(x, y)` lives at index `y * width + x`. Dimensions are fixed at
/// construction and never exceed [`MAX_ROOM_SIZE`] on either side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Room {
    /// An all-floor room of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds [`MAX_ROOM_SIZE`].
    pub fn empty(width: usize, height: usize) -> Self {
        assert!(
            (1..=MAX_ROOM_SIZE).contains(&width),
            "room width {} outside 1..={}",
            width,
            MAX_ROOM_SIZE
        );
        assert!(
            (1..=MAX_ROOM_SIZE).contains(&height),
            "room height {} outside 1..={}",
            height,
            MAX_ROOM_SIZE
        );
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![Cell::Floor; width * height],
        }
    }

    /// Build from a pre-validated cell buffer. The caller guarantees
    /// `cells.len() == width * height` and both dimensions in range.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width: width as i32,
            height: height as i32,
            cells,
        }
    }

    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `pos` names a cell of this room.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// The cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn get(&self, pos: Pos) -> Cell {
        assert!(self.contains(pos), "position {} outside {}x{} room", pos, self.width, self.height);
        self.cells[self.index(pos)]
    }

    /// The cell at `pos`, or `None` when out of bounds.
    pub fn cell_at(&self, pos: Pos) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Overwrite the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        assert!(self.contains(pos), "position {} outside {}x{} room", pos, self.width, self.height);
        let i = self.index(pos);
        self.cells[i] = cell;
    }

    /// Whether an agent may stand at `pos`. Total over all positions:
    /// out-of-bounds counts as blocked.
    pub fn is_passable(&self, pos: Pos) -> bool {
        self.cell_at(pos).is_some_and(Cell::is_passable)
    }
}

impl Default for Room {
    /// The all-floor room of the largest supported size. Installed as
    /// the fallback when a layout source fails to load.
    fn default() -> Self {
        Self::empty(MAX_ROOM_SIZE, MAX_ROOM_SIZE)
    }
}
