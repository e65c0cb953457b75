//! Deterministic random number generation.
//!
//! Every stochastic choice in the trainer (exploration triggers,
//! random actions, double-learning coin flips) draws from a single
//! [`Pcg32`] stream, so a fixed seed reproduces a run bit-for-bit.
//! The generator is PCG-XSH-RR 64/32: a 64-bit linear congruential
//! state advance with an xorshift-and-rotate output permutation.

use crate::action::Action;

const MUL: u64 = 6364136223846793005;
const INC: u64 = 1442695040888963407;

/// PCG-XSH-RR 64/32 generator.
///
/// `Clone` takes a fork of the stream: the copy continues from the
/// same point while the original is unaffected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
}

impl Pcg32 {
    /// Seed a new stream. Equal seeds yield equal output sequences.
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed)
                .wrapping_add(INC)
                .wrapping_mul(MUL)
                .wrapping_add(INC),
        }
    }

    /// Next 32 uniformly distributed bits.
    pub fn next_u32(&mut self) -> u32 {
        let x = self.state;
        self.state = x.wrapping_mul(MUL).wrapping_add(INC);
        let rot = (x >> 59) as u32;
        let x = x ^ (x >> 18);
        ((x >> 27) as u32).rotate_right(rot)
    }

    /// Uniform draw from `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform draw over the five actions.
    pub fn next_action(&mut self) -> Action {
        Action::from_index((self.next_f64() * Action::COUNT as f64) as usize)
    }
}
