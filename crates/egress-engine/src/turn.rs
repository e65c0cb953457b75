//! One simulated turn: decide, move, learn.
//!
//! The update pipeline runs three fixed passes over the agent list.
//! Pass one is pure decision making against the pre-turn state, pass
//! two applies movement and bump effects, pass three hands out
//! rewards and writes the value updates. Splitting the passes keeps
//! every agent's decision blind to the moves of agents later in the
//! list, while rewards see the world as it actually ends up.

use crate::record::{EpochRecord, StepReport};
use crate::world::RoomWorld;
use egress_core::{Action, Agent, AgentPos, Cell, Pos, MAX_ROOM_SIZE};
use egress_learn::{greedy_action, select_action, Occupancy, PerceptVector, StateKey, TableSide};
use egress_room::Room;
use smallvec::SmallVec;

// ── Epoch backup ───────────────────────────────────────────────────

/// Copy of the room and agents at the start of an epoch, restored
/// wholesale when the epoch closes.
#[derive(Clone, Debug)]
pub(crate) struct EpochBackup {
    pub(crate) room: Room,
    pub(crate) agents: Vec<Agent>,
}

// ── Pass-one bookkeeping ───────────────────────────────────────────

/// What pass one decided for one agent.
#[derive(Clone, Copy, Debug)]
struct Decision {
    /// Whether the agent took part in this turn at all.
    acting: bool,
    /// Cell the agent stood on when the turn began.
    start: Pos,
    /// Cell the agent holds after conflict resolution.
    dest: Pos,
    /// The chosen action.
    action: Action,
    /// The state the value update targets.
    key: StateKey,
}

impl Decision {
    /// Placeholder for agents that sit the turn out; every other
    /// field is ignored while `acting` is false.
    fn skipped() -> Self {
        Self {
            acting: false,
            start: Pos::new(0, 0),
            dest: Pos::new(0, 0),
            action: Action::Stay,
            key: StateKey::new(Pos::new(0, 0), 1, PerceptVector::default()),
        }
    }
}

/// Destination claims for one turn, one slot per cell of the largest
/// room. A slot holds the index of the agent currently holding that
/// cell; slots at contested cells keep their first holder for the
/// rest of the turn, so later claimants of the same cell bounce too.
struct ClaimMap {
    slots: [Option<usize>; MAX_ROOM_SIZE * MAX_ROOM_SIZE],
}

impl ClaimMap {
    fn new() -> Self {
        Self {
            slots: [None; MAX_ROOM_SIZE * MAX_ROOM_SIZE],
        }
    }

    fn slot(pos: Pos) -> usize {
        pos.x as usize * MAX_ROOM_SIZE + pos.y as usize
    }

    fn get(&self, pos: Pos) -> Option<usize> {
        self.slots[Self::slot(pos)]
    }

    fn set(&mut self, pos: Pos, agent: usize) {
        self.slots[Self::slot(pos)] = Some(agent);
    }
}

/// Revert every agent in the claim chain starting at `first`.
///
/// Each reverted agent falls back to its start cell and re-claims
/// it; whoever held that start cell before is next in the chain.
/// The walk ends at a free slot or at an agent that already holds
/// its own start (one that chose to stay).
fn revert_chain(decisions: &mut [Decision], claims: &mut ClaimMap, first: usize) {
    let mut current = first;
    loop {
        let d = &mut decisions[current];
        d.dest = d.start;
        let prev = claims.get(d.start);
        claims.set(d.start, current);
        match prev {
            Some(next) if next != current => current = next,
            _ => break,
        }
    }
}

// ── The turn pipeline ──────────────────────────────────────────────

impl RoomWorld {
    /// Simulate one turn for every agent and learn from it.
    ///
    /// The three passes, each over the agent list in spawn order:
    ///
    /// 1. **Decide.** Every live in-room agent perceives its
    ///    surroundings, picks an action, and claims a destination
    ///    cell (its own cell if the target is impassable). Claiming
    ///    a held cell reverts the holder's transitive chain of claims
    ///    back to their start cells, then the claimant too; two
    ///    agents trying to move through each other revert the same
    ///    way.
    /// 2. **Move.** Claims are applied. An agent that chose a move
    ///    but holds its start cell bumps the cell it aimed at:
    ///    glass shatters, a closed door opens.
    /// 3. **Learn.** Every pass-one participant is rewarded for the
    ///    cell it now stands on (exit, shards, bandage, or plain
    ///    idleness), and the value entry captured in pass one is
    ///    nudged toward the reward plus the discounted value of the
    ///    reached state. Room and agent changes land immediately, so
    ///    later agents in the list perceive them.
    ///
    /// RNG draws per acting agent are fixed: the exploration draws
    /// in pass one (when epsilon-greedy is on) and one coin in pass
    /// three (when double learning is on). Replays of a seed depend
    /// on exactly this sequence.
    ///
    /// Afterwards the turn counter advances; the epoch closes once
    /// the step budget is spent or no agent took part. Closing logs
    /// the epoch total and restores the room and agents from the
    /// epoch-start backup.
    pub fn step(&mut self) -> StepReport {
        if self.turn == 0 {
            self.backup = Some(EpochBackup {
                room: self.room.clone(),
                agents: self.agents.clone(),
            });
        }

        let p = self.params;
        let width = self.room.width();
        let height = self.room.height();

        // Pass 1: decide and claim.
        let mut decisions: SmallVec<[Decision; 8]> = SmallVec::with_capacity(self.agents.len());
        let mut claims = ClaimMap::new();
        let mut any_acted = false;

        for i in 0..self.agents.len() {
            let agent = self.agents[i];
            let Some(start) = agent.occupied_cell() else {
                decisions.push(Decision::skipped());
                continue;
            };
            if agent.health == 0 {
                decisions.push(Decision::skipped());
                continue;
            }
            any_acted = true;

            let occupancy = Occupancy::scan(&self.agents);
            let percept = PerceptVector::encode(&self.room, &occupancy, start);
            let key = StateKey::new(start, agent.health, percept);
            let values = self.store.lookup(key, p.double_learning);
            let action = select_action(
                &mut self.rng,
                p.epsilon_greedy,
                p.epsilon,
                &values.a,
                values.b.as_ref(),
            );

            let stepped = start.step_clamped(action, width, height);
            let dest = if self.room.is_passable(stepped) {
                stepped
            } else {
                start
            };
            let mut me = Decision {
                acting: true,
                start,
                dest,
                action,
                key,
            };

            // The holder of the claimed cell, or the agent moving
            // into our start cell whose own start is our destination
            // (a head-on swap, resolved like any other conflict).
            let incumbent = claims.get(dest).or_else(|| {
                claims
                    .get(start)
                    .filter(|&other| decisions[other].start == dest)
            });
            if let Some(holder) = incumbent {
                revert_chain(&mut decisions, &mut claims, holder);
                me.dest = me.start;
                if let Some(displaced) = claims.get(me.start) {
                    revert_chain(&mut decisions, &mut claims, displaced);
                }
            }
            claims.set(me.dest, i);
            decisions.push(me);
        }

        // Pass 2: apply movement; a blocked mover bumps its target.
        for (i, d) in decisions.iter().enumerate() {
            if !d.acting {
                continue;
            }
            if d.action != Action::Stay && d.dest == d.start {
                let bumped = d.start.step_clamped(d.action, width, height);
                match self.room.get(bumped) {
                    Cell::Glass => self.room.set(bumped, Cell::Shards),
                    Cell::Door => self.room.set(bumped, Cell::OpenDoor),
                    _ => {}
                }
            } else {
                debug_assert!(self.room.is_passable(d.dest));
                self.agents[i].pos = AgentPos::At(d.dest);
            }
        }

        // Pass 3: rewards, terminal transitions, and value updates.
        for (i, d) in decisions.iter().enumerate() {
            if !d.acting {
                continue;
            }
            let Some(pos) = self.agents[i].occupied_cell() else {
                continue;
            };

            let mut reward = p.idle_punishment;
            let mut terminal = false;
            match self.room.get(pos) {
                Cell::Exit => {
                    self.agents[i].pos = AgentPos::Escaped;
                    terminal = true;
                    reward = p.escape_reward;
                }
                Cell::Shards => {
                    self.agents[i].health -= 1;
                    if self.agents[i].health == 0 {
                        terminal = true;
                        reward = p.death_punishment;
                    }
                }
                Cell::Bandage => {
                    self.room.set(pos, Cell::Floor);
                    self.agents[i].health = Agent::MAX_HEALTH;
                }
                _ => {}
            }
            self.epoch_reward += reward;

            if p.double_learning {
                let (cross_a, cross_b) = if terminal {
                    (0.0, 0.0)
                } else {
                    let next = self.reached_state(i, pos);
                    let next_a = self.store.side_values(TableSide::A, next);
                    let next_b = self.store.side_values(TableSide::B, next);
                    // Each table is evaluated at the other's argmax.
                    let cross_a = next_a[greedy_action(&next_b, None).index()];
                    let cross_b = next_b[greedy_action(&next_a, None).index()];
                    (cross_a, cross_b)
                };
                // The coin is drawn even for terminal updates, so the
                // stream position never depends on the outcome.
                if self.rng.next_f64() < 0.5 {
                    let target = reward + p.discount * cross_b;
                    self.store
                        .reinforce(TableSide::A, d.key, d.action, p.learning_rate, target);
                } else {
                    let target = reward + p.discount * cross_a;
                    self.store
                        .reinforce(TableSide::B, d.key, d.action, p.learning_rate, target);
                }
            } else {
                let best_next = if terminal {
                    0.0
                } else {
                    let next = self.reached_state(i, pos);
                    let next_a = self.store.side_values(TableSide::A, next);
                    next_a[greedy_action(&next_a, None).index()]
                };
                let target = reward + p.discount * best_next;
                self.store
                    .reinforce(TableSide::A, d.key, d.action, p.learning_rate, target);
            }
        }

        // Close the epoch when the budget is spent or nobody acted.
        self.turn += 1;
        let epoch_ended = self.turn >= p.max_steps || !any_acted;
        let report = StepReport {
            epoch_ended,
            epoch_reward: self.epoch_reward,
        };
        if epoch_ended {
            self.log.push(EpochRecord {
                epoch: self.epoch,
                total_reward: self.epoch_reward,
            });
            self.epoch += 1;
            self.turn = 0;
            self.epoch_reward = 0.0;
            if let Some(backup) = &self.backup {
                self.room = backup.room.clone();
                self.agents = backup.agents.clone();
            }
        }
        report
    }

    /// The state agent `i` ended the turn in, perceived against the
    /// live room and occupancy.
    fn reached_state(&self, i: usize, pos: Pos) -> StateKey {
        let occupancy = Occupancy::scan(&self.agents);
        let percept = PerceptVector::encode(&self.room, &occupancy, pos);
        StateKey::new(pos, self.agents[i].health, percept)
    }
}
