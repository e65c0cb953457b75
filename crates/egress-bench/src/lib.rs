//! Benchmark profiles and utilities for the Egress trainer.
//!
//! Provides pre-built [`WorldConfig`] profiles for benchmarks and
//! examples:
//!
//! - [`training_profile`]: the five-agent hazard room the examples
//!   train on
//! - [`crowded_profile`]: an open floor packed with randomly placed
//!   agents, for stressing conflict resolution
//! - [`scatter_starts`]: deterministic agent placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use egress_core::{Cell, Pcg32, Pos, MAX_ROOM_SIZE};
use egress_engine::WorldConfig;
use egress_room::RoomLayout;

/// The room the benchmarks and the training example run on: five
/// agents, walls, glass, shards, a bandage, a door, and one exit in
/// the top wall.
pub const TRAINING_ROOM: &str = "\
=======X=
=..~....=
=.@...+.=
=...==..=
=.@.....=
=..^..@.=
=....@..H
=.@.....=
=========
";

/// Build the reference training profile: the five-agent hazard room
/// with default learning parameters.
pub fn training_profile(seed: u32) -> WorldConfig {
    let mut config = WorldConfig::new(RoomLayout::parse(TRAINING_ROOM).unwrap());
    config.seed = seed;
    config
}

/// Build a conflict-stress profile: an open floor room packed with
/// `agents` agents exploring at full epsilon, so claim resolution
/// runs hot every turn.
pub fn crowded_profile(agents: usize, seed: u32) -> WorldConfig {
    let side = MAX_ROOM_SIZE as i32;
    let cells = vec![Cell::Floor; MAX_ROOM_SIZE * MAX_ROOM_SIZE];
    let starts = scatter_starts(side, side, agents, seed);
    let layout = RoomLayout::from_parts(MAX_ROOM_SIZE, MAX_ROOM_SIZE, cells, starts).unwrap();

    let mut config = WorldConfig::new(layout);
    config.params.epsilon = 1.0;
    config.seed = seed;
    config
}

/// Generate deterministic scattered start cells for `agents` agents
/// on a `width` x `height` grid, with linear probing past collisions.
///
/// # Panics
///
/// Panics if `agents` exceeds the cell count.
pub fn scatter_starts(width: i32, height: i32, agents: usize, seed: u32) -> Vec<Pos> {
    let cells = (width * height) as usize;
    assert!(agents <= cells, "more agents than cells");

    let mut rng = Pcg32::new(seed);
    let mut taken = vec![false; cells];
    let mut starts = Vec::with_capacity(agents);
    for _ in 0..agents {
        let mut slot = rng.next_u32() as usize % cells;
        while taken[slot] {
            slot = (slot + 1) % cells;
        }
        taken[slot] = true;
        starts.push(Pos::new(
            (slot % width as usize) as i32,
            (slot / width as usize) as i32,
        ));
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_engine::RoomWorld;

    #[test]
    fn training_profile_validates() {
        let config = training_profile(42);
        assert_eq!(config.layout.starts.len(), 5);
        config.validate().unwrap();
    }

    #[test]
    fn crowded_profile_builds_and_steps() {
        let mut world = RoomWorld::new(crowded_profile(40, 42)).unwrap();
        world.step();
        assert_eq!(world.agents().len(), 40);
    }

    #[test]
    fn scatter_starts_are_unique_and_in_bounds() {
        let starts = scatter_starts(9, 9, 40, 42);
        assert_eq!(starts.len(), 40);
        for (i, pos) in starts.iter().enumerate() {
            assert!((0..9).contains(&pos.x) && (0..9).contains(&pos.y));
            assert!(!starts[..i].contains(pos), "duplicate start {pos:?}");
        }
    }

    #[test]
    fn scatter_starts_are_deterministic() {
        assert_eq!(scatter_starts(9, 9, 10, 7), scatter_starts(9, 9, 10, 7));
    }
}
