//! Criterion micro-benchmarks for perception and table access.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use egress_bench::TRAINING_ROOM;
use egress_core::{Action, Agent, Pos};
use egress_learn::{greedy_action, Occupancy, PerceptVector, StateKey, TableSide, ValueStore};
use egress_room::RoomLayout;

/// Benchmark: perceive every cell of the hazard room with the full
/// agent roster present.
fn bench_encode_full_room(c: &mut Criterion) {
    let layout = RoomLayout::parse(TRAINING_ROOM).unwrap();
    let agents: Vec<Agent> = layout.starts.iter().copied().map(Agent::spawn).collect();
    let room = layout.room;

    c.bench_function("encode_full_room", |b| {
        b.iter(|| {
            let occupancy = Occupancy::scan(&agents);
            for x in 0..room.width() {
                for y in 0..room.height() {
                    let view = PerceptVector::encode(&room, &occupancy, Pos::new(x, y));
                    black_box(view.code());
                }
            }
        });
    });
}

/// Benchmark: a lookup-then-reinforce sweep across one position's
/// whole perception space, the access pattern of a long training run.
fn bench_lookup_reinforce_sweep(c: &mut Criterion) {
    let mut store = ValueStore::new(50.0);

    c.bench_function("lookup_reinforce_sweep", |b| {
        b.iter(|| {
            for code in 0..6561usize {
                let key = StateKey::new(Pos::new(4, 4), 2, PerceptVector::from_code(code));
                let values = store.lookup(key, false);
                let action = greedy_action(&values.a, None);
                store.reinforce(TableSide::A, key, action, 0.5, 1.0);
            }
        });
    });
}

/// Benchmark: greedy voting with both tables in play.
fn bench_greedy_vote(c: &mut Criterion) {
    let a = [50.0, 48.25, 525.0, 49.0, 12.0];
    let b = [51.0, 47.0, 12.0, 600.0, 50.0];

    c.bench_function("greedy_vote", |bch| {
        bch.iter(|| {
            let action: Action = greedy_action(black_box(&a), Some(black_box(&b)));
            black_box(action);
        });
    });
}

criterion_group!(
    benches,
    bench_encode_full_room,
    bench_lookup_reinforce_sweep,
    bench_greedy_vote
);
criterion_main!(benches);
