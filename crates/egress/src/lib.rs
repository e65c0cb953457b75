//! Egress: a tabular Q-learning playground where agents learn to
//! escape a hazard room.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Egress sub-crates. For most users, adding `egress` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use egress::prelude::*;
//!
//! // One agent, one step left of the exit.
//! let layout = RoomLayout::parse(".X@").unwrap();
//! let mut config = WorldConfig::new(layout);
//! config.params.epsilon_greedy = false;
//!
//! let mut world = RoomWorld::new(config).unwrap();
//!
//! // The first epoch pays for one wasted turn before the tables
//! // steer the agent onto the exit.
//! let record = world.run_epoch();
//! assert_eq!(record.epoch, 0);
//! assert_eq!(record.total_reward, 999.0);
//!
//! // From then on the learned policy escapes immediately.
//! let record = world.run_epoch();
//! assert_eq!(record.total_reward, 1000.0);
//!
//! let probe = world.probe_values(Pos::new(2, 0), Agent::MAX_HEALTH);
//! assert_eq!(probe.greedy(), Action::Left);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `egress-core` | Agents, actions, cells, positions, the PCG RNG |
//! | [`room`] | `egress-room` | Room grids and the layout text format |
//! | [`learn`] | `egress-learn` | Perception encoding, value tables, the policy |
//! | [`engine`] | `egress-engine` | The turn simulator and learning loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the deterministic RNG (`egress-core`).
///
/// Contains [`types::Agent`], [`types::Action`], [`types::Cell`],
/// [`types::Pos`], and the [`types::Pcg32`] generator every
/// stochastic choice draws from.
pub use egress_core as types;

/// Room grids and the layout text format (`egress-room`).
///
/// A [`room::Room`] is the cell grid; a [`room::RoomLayout`] adds
/// agent start positions and round-trips through the character-grid
/// text format.
pub use egress_room as room;

/// Perception, value tables, and the policy (`egress-learn`).
///
/// [`learn::PerceptVector`] encodes the eight-cell cross an agent
/// sees, [`learn::ValueStore`] holds the dense action-value tables,
/// and [`learn::select_action`] is the epsilon-greedy policy.
pub use egress_learn as learn;

/// The turn simulator and learning loop (`egress-engine`).
///
/// [`engine::RoomWorld`] owns a training run; step it a turn at a
/// time or drive whole epochs and read the [`engine::ResultsLog`].
pub use egress_engine as engine;

/// Common imports for typical Egress usage.
///
/// ```rust
/// use egress::prelude::*;
/// ```
///
/// This imports the most frequently used types: the world and its
/// configuration, rooms and layouts, agents, actions, and the
/// records the results log is made of.
pub mod prelude {
    // Core types
    pub use egress_core::{Action, Agent, AgentPos, Cell, Pcg32, Pos};

    // Rooms and layouts
    pub use egress_room::{Room, RoomLayout};

    // Perception and tables
    pub use egress_learn::{Percept, PerceptVector, StateKey, TableSide, ValueStore};

    // Errors
    pub use egress_engine::{ConfigError, ParamError};
    pub use egress_room::LayoutError;

    // Engine
    pub use egress_engine::{
        EpochRecord, LearnParams, ResultsLog, RoomWorld, StepReport, ValueProbe, WorldConfig,
        WorldView,
    };
}
