//! Core types for the Egress escape-room trainer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared across the workspace: agent actions, cell
//! kinds, grid positions, agent state, world limits, and the
//! deterministic random number generator behind every stochastic
//! choice in the simulator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
pub mod cell;
pub mod rng;

pub use action::Action;
pub use agent::{Agent, AgentPos, Pos};
pub use cell::Cell;
pub use rng::Pcg32;

/// Maximum room width and height, in cells.
pub const MAX_ROOM_SIZE: usize = 9;

/// Maximum number of agents a room may hold: one per cell of the
/// largest room.
pub const MAX_AGENTS: usize = MAX_ROOM_SIZE * MAX_ROOM_SIZE;
