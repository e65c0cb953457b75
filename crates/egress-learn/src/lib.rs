//! Perception, action-value storage, and the action policy for the
//! Egress trainer.
//!
//! Together these three pieces form the learning half of the system:
//! [`PerceptVector`] encodes what an agent sees into a dense state
//! index, [`ValueStore`] holds the two tabular action-value functions
//! over those states, and [`select_action`] turns values into moves.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod percept;
pub mod policy;
pub mod table;

pub use percept::{Occupancy, Percept, PerceptVector, VISION_CELLS, VISION_OFFSETS};
pub use policy::{greedy_action, select_action};
pub use table::{ActionValues, StateKey, TableLookup, TableSide, ValueStore};
