//! Errors for room layout parsing and construction.

use std::error::Error;
use std::fmt;

/// Errors from parsing or assembling a [`RoomLayout`](crate::RoomLayout).
///
/// All of these are recoverable: a caller holding a broken layout
/// source can fall back to a default room and keep running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout text contained no rows.
    Empty,
    /// A row's length differs from the first row's.
    InconsistentWidth {
        /// 1-based line number of the offending row.
        line: usize,
        /// Length of the offending row.
        found: usize,
        /// Length established by the first row.
        expected: usize,
    },
    /// The rows are wider than the supported maximum.
    TooWide {
        /// Observed width.
        width: usize,
        /// Largest supported width.
        max: usize,
    },
    /// There are more rows than the supported maximum.
    TooTall {
        /// Observed height.
        height: usize,
        /// Largest supported height.
        max: usize,
    },
    /// More agent start markers than the room can hold.
    TooManyAgents {
        /// Number of start markers found.
        count: usize,
        /// Largest supported agent count.
        max: usize,
    },
    /// A character that is neither a cell symbol nor the agent marker.
    UnknownSymbol {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
        /// The offending character.
        symbol: char,
    },
    /// Cell buffer length does not match `width * height`.
    DimensionMismatch {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
        /// Number of cells supplied.
        cells: usize,
    },
    /// An agent start position lies outside the room.
    StartOutOfBounds {
        /// Index of the offending start in the supplied list.
        index: usize,
    },
    /// An agent start position names an impassable cell.
    StartNotPassable {
        /// Index of the offending start in the supplied list.
        index: usize,
    },
    /// An agent start position repeats an earlier start's cell.
    StartOccupied {
        /// Index of the offending start in the supplied list.
        index: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout has no rows"),
            Self::InconsistentWidth {
                line,
                found,
                expected,
            } => write!(
                f,
                "line {line} is {found} cells wide, expected {expected}"
            ),
            Self::TooWide { width, max } => {
                write!(f, "room is {width} cells wide, maximum is {max}")
            }
            Self::TooTall { height, max } => {
                write!(f, "room is {height} cells tall, maximum is {max}")
            }
            Self::TooManyAgents { count, max } => {
                write!(f, "{count} agent starts, maximum is {max}")
            }
            Self::UnknownSymbol {
                line,
                column,
                symbol,
            } => write!(f, "unknown symbol {symbol:?} at line {line}, column {column}"),
            Self::DimensionMismatch {
                width,
                height,
                cells,
            } => write!(
                f,
                "{cells} cells supplied for a {width}x{height} room"
            ),
            Self::StartOutOfBounds { index } => {
                write!(f, "agent start {index} is outside the room")
            }
            Self::StartNotPassable { index } => {
                write!(f, "agent start {index} is on an impassable cell")
            }
            Self::StartOccupied { index } => {
                write!(f, "agent start {index} repeats an earlier start's cell")
            }
        }
    }
}

impl Error for LayoutError {}
