//! Turn simulation and the learning loop for the Egress trainer.
//!
//! A [`RoomWorld`] owns everything one training run needs: the room,
//! the agents, the action-value tables, the RNG, and the learning
//! parameters. [`RoomWorld::step`] advances the world by one turn, in
//! which every live agent perceives, moves, and learns from a single
//! reward. Epochs group turns: each epoch starts from the same room
//! and agent configuration, runs until the step budget is spent or no
//! agent can act, and closes by logging its total reward to the
//! [`ResultsLog`] and restoring the start configuration.
//!
//! Given the same layout, parameters, and seed, a run is
//! reproducible draw for draw.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod record;
mod turn;
pub mod world;

pub use config::{ConfigError, LearnParams, ParamError, WorldConfig};
pub use record::{EpochRecord, ResultsLog, StepReport};
pub use world::{RoomWorld, ValueProbe, WorldView};
