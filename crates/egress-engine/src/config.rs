//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the input for constructing a
//! [`RoomWorld`](crate::RoomWorld). [`WorldConfig::validate`] checks every
//! structural invariant at startup; the runtime setters on the world
//! re-use the same per-parameter checks so an invalid update is
//! rejected with the prior value left in place.

use std::error::Error;
use std::fmt;

use egress_room::{LayoutError, RoomLayout};

// ── LearnParams ────────────────────────────────────────────────────

/// Learning and reward parameters for one world.
///
/// All fields are plain data; [`validate()`](LearnParams::validate)
/// enforces the ranges. The defaults are the trainer's classic
/// settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LearnParams {
    /// Step size for value updates, in `[0, 1]`. Default: 0.5.
    pub learning_rate: f64,
    /// Discount applied to bootstrapped future value, in `[0, 1]`.
    /// Default: 0.95.
    pub discount: f64,
    /// Exploration probability per action choice, in `[0, 1]`.
    /// Default: 0.05.
    pub epsilon: f64,
    /// Whether action choices may explore at all. With this off the
    /// policy is purely greedy and draws nothing from the RNG.
    /// Default: on.
    pub epsilon_greedy: bool,
    /// Whether updates alternate between the two tables (double
    /// learning). Default: off.
    pub double_learning: bool,
    /// Initial value of every table entry. Default: 50.
    pub optimism: f64,
    /// Reward for stepping onto an exit. Default: +1000.
    pub escape_reward: f64,
    /// Reward for dying. Default: -1000.
    pub death_punishment: f64,
    /// Reward for any turn that ends neither way. Default: -1.
    pub idle_punishment: f64,
    /// Turns before an epoch is cut off. Default: 200. Minimum: 1.
    pub max_steps: u32,
}

impl Default for LearnParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount: 0.95,
            epsilon: 0.05,
            epsilon_greedy: true,
            double_learning: false,
            optimism: 50.0,
            escape_reward: 1000.0,
            death_punishment: -1000.0,
            idle_punishment: -1.0,
            max_steps: 200,
        }
    }
}

impl LearnParams {
    /// Validate every parameter.
    pub fn validate(&self) -> Result<(), ParamError> {
        // 1. Rates and probabilities live in the unit interval. The
        //    range check also rejects NaN.
        check_unit("learning rate", self.learning_rate)?;
        check_unit("discount", self.discount)?;
        check_unit("epsilon", self.epsilon)?;
        // 2. Table fill and rewards feed arithmetic that must stay
        //    finite; a NaN here would poison every greedy comparison.
        check_finite("optimism", self.optimism)?;
        check_finite("escape reward", self.escape_reward)?;
        check_finite("death punishment", self.death_punishment)?;
        check_finite("idle punishment", self.idle_punishment)?;
        // 3. A zero step budget could never close an epoch cleanly.
        if self.max_steps == 0 {
            return Err(ParamError::ZeroMaxSteps);
        }
        Ok(())
    }
}

pub(crate) fn check_unit(name: &'static str, value: f64) -> Result<(), ParamError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamError::OutOfUnitRange { name, value })
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NotFinite { name, value })
    }
}

// ── ParamError ─────────────────────────────────────────────────────

/// A learning parameter outside its valid range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamError {
    /// A rate or probability fell outside `[0, 1]` (or was NaN).
    OutOfUnitRange {
        /// Which parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A reward or the optimism constant was NaN or infinite.
    NotFinite {
        /// Which parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// `max_steps` was zero.
    ZeroMaxSteps,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfUnitRange { name, value } => {
                write!(f, "{name} {value} outside [0, 1]")
            }
            Self::NotFinite { name, value } => {
                write!(f, "{name} {value} is not finite")
            }
            Self::ZeroMaxSteps => write!(f, "max steps must be at least 1"),
        }
    }
}

impl Error for ParamError {}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A learning parameter is out of range.
    Param(ParamError),
    /// The layout's room or start positions are inconsistent.
    Layout(LayoutError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(e) => write!(f, "parameter: {e}"),
            Self::Layout(e) => write!(f, "layout: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Param(e) => Some(e),
            Self::Layout(e) => Some(e),
        }
    }
}

impl From<ParamError> for ConfigError {
    fn from(e: ParamError) -> Self {
        Self::Param(e)
    }
}

impl From<LayoutError> for ConfigError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a world.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// The room and the agent start positions.
    pub layout: RoomLayout,
    /// Learning and reward parameters.
    pub params: LearnParams,
    /// RNG seed. Every stochastic choice the world ever makes derives
    /// from this one value.
    pub seed: u32,
}

impl WorldConfig {
    /// A config with default parameters and the classic seed 42.
    pub fn new(layout: RoomLayout) -> Self {
        Self {
            layout,
            params: LearnParams::default(),
            seed: 42,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}
