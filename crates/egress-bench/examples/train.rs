//! End-to-end training session example.
//!
//! Demonstrates: build a world from room text → run epochs → watch
//! the results log improve → reset the tables for a double-learning
//! run → export the log as CSV.

use egress_bench::training_profile;
use egress_core::Pos;
use egress_engine::RoomWorld;

fn main() {
    println!("=== Egress Training Example ===\n");

    let mut world = RoomWorld::new(training_profile(42)).unwrap();
    println!("Room ({} agents):", world.agents().len());
    print!("{}", world.layout().to_text());

    // --- Run 1: classic Q-learning ---
    println!("\nRun 1: 200 epochs, single table");
    for batch in 0..8u32 {
        let records = world.run_epochs(25);
        let mean: f64 = records.iter().map(|r| r.total_reward).sum::<f64>() / 25.0;
        let best = records
            .iter()
            .map(|r| r.total_reward)
            .fold(f64::NEG_INFINITY, f64::max);
        println!(
            "  epochs {:>3}-{:>3}: mean={:>9.2}, best={:>8.1}",
            batch * 25,
            batch * 25 + 24,
            mean,
            best
        );
    }

    // What did the policy settle on near the start cells?
    for &pos in &[Pos::new(2, 6), Pos::new(2, 4), Pos::new(6, 3)] {
        let probe = world.probe_values(pos, 2);
        println!(
            "  values at ({}, {}): {:?} -> {:?}",
            pos.x,
            pos.y,
            probe.combined().map(|v| (v * 10.0).round() / 10.0),
            probe.greedy()
        );
    }

    // --- Run 2: double learning from fresh tables ---
    println!("\nResetting tables...");
    world.reset_values(50.0).unwrap();
    world.clear_results();
    world.set_double_learning(true);

    println!("Run 2: 200 epochs, double learning");
    for batch in 0..8u32 {
        let records = world.run_epochs(25);
        let mean: f64 = records.iter().map(|r| r.total_reward).sum::<f64>() / 25.0;
        println!("  epochs {:>3}-{:>3}: mean={:>9.2}", batch * 25, batch * 25 + 24, mean);
    }

    let csv = world.results().to_csv();
    let tail: Vec<&str> = csv.lines().rev().take(3).collect();
    println!("\nLast results (CSV): ");
    for line in tail.iter().rev() {
        println!("  {line}");
    }
}
