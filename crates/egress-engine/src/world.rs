//! The live training world: one room, its agents, the value tables,
//! and the RNG stream that drives every stochastic choice.

use crate::config::{check_finite, check_unit, ConfigError, LearnParams, ParamError, WorldConfig};
use crate::record::{EpochRecord, ResultsLog};
use crate::turn::EpochBackup;
use egress_core::{Action, Agent, Cell, Pcg32, Pos};
use egress_learn::{greedy_action, ActionValues, Occupancy, PerceptVector, StateKey, ValueStore};
use egress_room::{LayoutError, Room, RoomLayout};

// ── RoomWorld ──────────────────────────────────────────────────────

/// A running training world.
///
/// The world is a plain value with no interior mutability: `step` and
/// the other mutators take `&mut self` and complete before returning.
/// It is `Send`, so a driver may own it on a worker thread; share it
/// only behind a lock of your own.
#[derive(Debug)]
pub struct RoomWorld {
    pub(crate) room: Room,
    pub(crate) agents: Vec<Agent>,
    pub(crate) store: ValueStore,
    pub(crate) rng: Pcg32,
    pub(crate) params: LearnParams,
    pub(crate) epoch: u32,
    pub(crate) turn: u32,
    pub(crate) epoch_reward: f64,
    pub(crate) backup: Option<EpochBackup>,
    pub(crate) log: ResultsLog,
}

impl RoomWorld {
    /// Build a world from a validated configuration.
    pub fn new(config: WorldConfig) -> Result<RoomWorld, ConfigError> {
        config.validate()?;
        let WorldConfig {
            layout,
            params,
            seed,
        } = config;
        let agents = layout.starts.iter().copied().map(Agent::spawn).collect();
        Ok(RoomWorld {
            room: layout.room,
            agents,
            store: ValueStore::new(params.optimism),
            rng: Pcg32::new(seed),
            params,
            epoch: 0,
            turn: 0,
            epoch_reward: 0.0,
            backup: None,
            log: ResultsLog::new(),
        })
    }

    // ── Layout installation ────────────────────────────────────

    /// Replace the room and agents with a new layout and start a
    /// fresh epoch timeline: the turn counter and accumulated reward
    /// are zeroed and any pending epoch backup is discarded. The
    /// epoch index keeps counting, so the results log never repeats
    /// an epoch number.
    ///
    /// The layout is taken as built by [`RoomLayout::parse`] or
    /// [`RoomLayout::from_parts`]; a hand-assembled layout that
    /// breaks their guarantees will panic inside a later step.
    pub fn load_layout(&mut self, layout: RoomLayout) {
        self.room = layout.room;
        self.agents = layout.starts.iter().copied().map(Agent::spawn).collect();
        self.turn = 0;
        self.epoch_reward = 0.0;
        self.backup = None;
    }

    /// Parse room text and install it.
    ///
    /// On a parse error the default empty room is installed instead,
    /// so the world stays steppable, and the diagnostic is still
    /// returned.
    pub fn load_room_text(&mut self, text: &str) -> Result<(), LayoutError> {
        match RoomLayout::parse(text) {
            Ok(layout) => {
                self.load_layout(layout);
                Ok(())
            }
            Err(e) => {
                self.load_layout(RoomLayout::default());
                Err(e)
            }
        }
    }

    /// Assemble a layout from raw parts and install it.
    ///
    /// The same fallback as [`load_room_text`](Self::load_room_text):
    /// if the parts do not form a valid layout, the default empty room
    /// is installed and the diagnostic returned.
    pub fn load_room_parts(
        &mut self,
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        starts: Vec<Pos>,
    ) -> Result<(), LayoutError> {
        match RoomLayout::from_parts(width, height, cells, starts) {
            Ok(layout) => {
                self.load_layout(layout);
                Ok(())
            }
            Err(e) => {
                self.load_layout(RoomLayout::default());
                Err(e)
            }
        }
    }

    /// The configuration the current epoch started from: the pristine
    /// room and the agent start cells, however far the epoch has run.
    /// Feed it to [`RoomLayout::to_text`] to save the room.
    pub fn layout(&self) -> RoomLayout {
        let (room, agents): (&Room, &[Agent]) = match &self.backup {
            Some(b) => (&b.room, &b.agents),
            None => (&self.room, &self.agents),
        };
        RoomLayout {
            room: room.clone(),
            starts: agents.iter().filter_map(Agent::occupied_cell).collect(),
        }
    }

    // ── Runtime parameter updates ──────────────────────────────
    //
    // Each setter validates like the config does; a rejected value
    // leaves the previous setting in place.

    /// Update the learning rate. Must lie in `[0, 1]`.
    pub fn set_learning_rate(&mut self, rate: f64) -> Result<(), ParamError> {
        check_unit("learning rate", rate)?;
        self.params.learning_rate = rate;
        Ok(())
    }

    /// Update the discount. Must lie in `[0, 1]`.
    pub fn set_discount(&mut self, discount: f64) -> Result<(), ParamError> {
        check_unit("discount", discount)?;
        self.params.discount = discount;
        Ok(())
    }

    /// Update the exploration probability. Must lie in `[0, 1]`.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<(), ParamError> {
        check_unit("epsilon", epsilon)?;
        self.params.epsilon = epsilon;
        Ok(())
    }

    /// Turn exploration on or off without touching the probability.
    pub fn set_epsilon_greedy(&mut self, on: bool) {
        self.params.epsilon_greedy = on;
    }

    /// Switch between single and double learning. Both tables are
    /// kept allocated either way, so toggling never loses table B.
    pub fn set_double_learning(&mut self, on: bool) {
        self.params.double_learning = on;
    }

    /// Update the per-epoch step budget. Must be at least 1.
    pub fn set_max_steps(&mut self, max_steps: u32) -> Result<(), ParamError> {
        if max_steps == 0 {
            return Err(ParamError::ZeroMaxSteps);
        }
        self.params.max_steps = max_steps;
        Ok(())
    }

    /// Restart the RNG stream from a fresh seed.
    pub fn reseed(&mut self, seed: u32) {
        self.rng = Pcg32::new(seed);
    }

    /// Overwrite every entry of both value tables with `optimism`,
    /// forgetting everything learned, and restart the epoch count at
    /// zero. The turn counter, the accumulated reward, and the results
    /// log are untouched.
    pub fn reset_values(&mut self, optimism: f64) -> Result<(), ParamError> {
        check_finite("optimism", optimism)?;
        self.store.reset(optimism);
        self.params.optimism = optimism;
        self.epoch = 0;
        Ok(())
    }

    // ── Probes and views ───────────────────────────────────────

    /// The action values an agent with `health` would see standing on
    /// `pos`, perceiving the live room and the real agents.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the largest supported room or
    /// `health` is not 1 or 2.
    pub fn probe_values(&self, pos: Pos, health: u8) -> ValueProbe {
        let occupancy = Occupancy::scan(&self.agents);
        let percept = PerceptVector::encode(&self.room, &occupancy, pos);
        self.probe_values_with(pos, health, percept)
    }

    /// Like [`probe_values`](Self::probe_values) with an explicit
    /// perception instead of the live one.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the largest supported room or
    /// `health` is not 1 or 2.
    pub fn probe_values_with(&self, pos: Pos, health: u8, percept: PerceptVector) -> ValueProbe {
        let key = StateKey::new(pos, health, percept);
        let lookup = self.store.lookup(key, self.params.double_learning);
        ValueProbe {
            a: lookup.a,
            b: lookup.b,
        }
    }

    /// A coherent borrow of the visible state.
    pub fn snapshot(&self) -> WorldView<'_> {
        WorldView {
            room: &self.room,
            agents: &self.agents,
        }
    }

    /// The live grid.
    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Every agent, in spawn order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Current parameter settings.
    pub fn params(&self) -> LearnParams {
        self.params
    }

    /// Both value tables.
    pub fn values(&self) -> &ValueStore {
        &self.store
    }

    /// Zero-based index of the epoch currently running.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Turns taken in the current epoch so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Reward accumulated by the current epoch so far.
    pub fn epoch_reward(&self) -> f64 {
        self.epoch_reward
    }

    /// The log of finished epochs.
    pub fn results(&self) -> &ResultsLog {
        &self.log
    }

    /// Records of finished epochs, oldest first.
    pub fn records(&self) -> &[EpochRecord] {
        self.log.records()
    }

    /// Forget all recorded epochs, as when starting a fresh results
    /// file. The epoch index keeps counting.
    pub fn clear_results(&mut self) {
        self.log.clear();
    }

    // ── Drivers ────────────────────────────────────────────────

    /// Step until the current epoch closes and return its record.
    ///
    /// The step budget bounds this: an epoch closes after at most
    /// `max_steps` turns.
    pub fn run_epoch(&mut self) -> EpochRecord {
        let epoch = self.epoch;
        loop {
            let report = self.step();
            if report.epoch_ended {
                return EpochRecord {
                    epoch,
                    total_reward: report.epoch_reward,
                };
            }
        }
    }

    /// Run `count` epochs to completion and return their records.
    pub fn run_epochs(&mut self, count: u32) -> &[EpochRecord] {
        let first = self.log.len();
        for _ in 0..count {
            self.run_epoch();
        }
        &self.log.records()[first..]
    }
}

// ── WorldView ──────────────────────────────────────────────────────

/// A borrow of the room and agents, taken together so a renderer
/// draws one consistent turn.
#[derive(Clone, Copy, Debug)]
pub struct WorldView<'a> {
    /// The live grid.
    pub room: &'a Room,
    /// Every agent, in spawn order.
    pub agents: &'a [Agent],
}

// ── ValueProbe ─────────────────────────────────────────────────────

/// Action values probed at one cell, the way a value overlay displays
/// them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueProbe {
    /// Values from table A.
    pub a: ActionValues,
    /// Values from table B, present when double learning is on.
    pub b: Option<ActionValues>,
}

impl ValueProbe {
    /// Per-action display values: table A alone, or the per-action
    /// mean of both tables when doubled.
    pub fn combined(&self) -> ActionValues {
        match self.b {
            Some(b) => {
                let mut out = self.a;
                for (value, other) in out.iter_mut().zip(b) {
                    *value = (*value + other) / 2.0;
                }
                out
            }
            None => self.a,
        }
    }

    /// The action the policy would take here if it never explored.
    pub fn greedy(&self) -> Action {
        greedy_action(&self.a, self.b.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_core::Cell;

    fn world(text: &str) -> RoomWorld {
        let config = WorldConfig::new(RoomLayout::parse(text).unwrap());
        RoomWorld::new(config).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn agents_spawn_on_the_marked_cells_in_scan_order() {
        let w = world("@.\n.@\n");
        // Scan order is top row first, so the upper-left agent is
        // index 0 at grid (0, 1).
        assert_eq!(w.agents().len(), 2);
        assert_eq!(w.agents()[0], Agent::spawn(Pos::new(0, 1)));
        assert_eq!(w.agents()[1], Agent::spawn(Pos::new(1, 0)));
        assert_eq!(w.epoch(), 0);
        assert_eq!(w.turn(), 0);
        assert!(w.results().is_empty());
    }

    #[test]
    fn invalid_parameters_fail_construction() {
        let mut config = WorldConfig::new(RoomLayout::parse("@X").unwrap());
        config.params.learning_rate = -1.0;
        match RoomWorld::new(config) {
            Err(ConfigError::Param(ParamError::OutOfUnitRange { name, .. })) => {
                assert_eq!(name, "learning rate");
            }
            other => panic!("expected a parameter error, got {other:?}"),
        }
    }

    // ── Layout installation ─────────────────────────────────────

    #[test]
    fn bad_room_text_installs_the_default_room_and_reports() {
        let mut w = world("@.X");
        match w.load_room_text(".Z.") {
            Err(LayoutError::UnknownSymbol { symbol: 'Z', .. }) => {}
            other => panic!("expected UnknownSymbol, got {other:?}"),
        }
        assert_eq!(w.room().width(), 9);
        assert_eq!(w.room().height(), 9);
        assert_eq!(w.room().get(Pos::new(4, 4)), Cell::Floor);
        assert!(w.agents().is_empty());
    }

    #[test]
    fn room_parts_install_like_room_text() {
        let mut w = world("@");
        w.load_room_parts(
            2,
            1,
            vec![Cell::Floor, Cell::Exit],
            vec![Pos::new(0, 0)],
        )
        .unwrap();
        assert_eq!(w.room().get(Pos::new(1, 0)), Cell::Exit);
        assert_eq!(w.agents().len(), 1);

        // Invalid parts fall back to the empty default room.
        let err = w
            .load_room_parts(3, 2, vec![Cell::Floor; 5], vec![])
            .unwrap_err();
        assert!(matches!(err, LayoutError::DimensionMismatch { .. }));
        assert_eq!(w.room(), &Room::default());
        assert!(w.agents().is_empty());
    }

    #[test]
    fn loading_restarts_the_timeline_but_not_the_epoch_index() {
        let mut w = world(".");
        // An empty room closes an epoch on every step.
        w.step();
        w.step();
        assert_eq!(w.epoch(), 2);

        w.load_room_text("@.X").unwrap();
        assert_eq!(w.turn(), 0);
        assert_eq!(w.epoch_reward(), 0.0);
        assert!(w.backup.is_none());
        assert_eq!(w.epoch(), 2, "the log key must stay monotone");
        assert_eq!(w.agents().len(), 1);
    }

    // ── Setters ─────────────────────────────────────────────────

    #[test]
    fn rejected_updates_keep_the_previous_value() {
        let mut w = world("@");
        assert!(w.set_learning_rate(1.5).is_err());
        assert_eq!(w.params().learning_rate, 0.5);
        assert!(w.set_epsilon(f64::NAN).is_err());
        assert_eq!(w.params().epsilon, 0.05);
        assert!(w.set_max_steps(0).is_err());
        assert_eq!(w.params().max_steps, 200);

        assert!(w.set_discount(0.9).is_ok());
        assert_eq!(w.params().discount, 0.9);
        w.set_epsilon_greedy(false);
        assert!(!w.params().epsilon_greedy);
        w.set_double_learning(true);
        assert!(w.params().double_learning);
    }

    #[test]
    fn reseeding_restarts_the_stream() {
        let mut w = world("@");
        w.rng.next_u32();
        w.reseed(9);
        assert_eq!(w.rng, Pcg32::new(9));
    }

    #[test]
    fn reset_values_refills_both_tables_and_restarts_the_epoch_count() {
        let mut w = world(".");
        w.step();
        assert_eq!(w.epoch(), 1);
        w.set_double_learning(true);

        w.reset_values(7.0).unwrap();
        assert_eq!(w.epoch(), 0);
        assert_eq!(w.params().optimism, 7.0);
        let probe = w.probe_values(Pos::new(0, 0), 1);
        assert_eq!(probe.a, [7.0; 5]);
        assert_eq!(probe.b, Some([7.0; 5]));

        // A rejected reset leaves everything alone.
        assert!(w.reset_values(f64::INFINITY).is_err());
        assert_eq!(w.probe_values(Pos::new(0, 0), 1).a, [7.0; 5]);
    }

    // ── Probes ──────────────────────────────────────────────────

    #[test]
    fn probes_read_the_fresh_table() {
        let w = world("@.X");
        let probe = w.probe_values(Pos::new(0, 0), 2);
        assert_eq!(probe.a, [50.0; 5]);
        assert!(probe.b.is_none(), "single mode probes table A only");
        assert_eq!(probe.greedy(), Action::Stay);
    }

    #[test]
    fn explicit_percepts_bypass_the_live_scan() {
        let w = world("@.X");
        let live = w.probe_values(Pos::new(1, 0), 1);
        let explicit = w.probe_values_with(Pos::new(1, 0), 1, PerceptVector::default());
        // Fresh world, empty surroundings: the live percept at (1, 0)
        // sees only deactivated cells apart from the agent one to the
        // left, so the two probes differ in key but not (yet) in value.
        assert_eq!(live.a, explicit.a);
    }

    #[test]
    fn combined_values_average_the_two_tables() {
        let probe = ValueProbe {
            a: [1.0, 2.0, 3.0, 4.0, 5.0],
            b: Some([3.0, 2.0, 1.0, 0.0, 5.0]),
        };
        assert_eq!(probe.combined(), [2.0, 2.0, 2.0, 2.0, 5.0]);
        let single = ValueProbe {
            a: [1.0, 2.0, 3.0, 4.0, 5.0],
            b: None,
        };
        assert_eq!(single.combined(), single.a);
    }

    #[test]
    #[should_panic(expected = "state position")]
    fn probing_outside_the_table_panics() {
        let w = world("@");
        let _ = w.probe_values(Pos::new(11, 0), 1);
    }

    // ── Views and layout recovery ───────────────────────────────

    #[test]
    fn snapshots_borrow_the_live_state() {
        let w = world("@.X");
        let view = w.snapshot();
        assert_eq!(view.room.width(), 3);
        assert_eq!(view.agents.len(), 1);
        assert_eq!(view.agents[0].pos.pos(), Some(Pos::new(0, 0)));
    }

    #[test]
    fn layout_reports_the_epoch_start_configuration() {
        let original = RoomLayout::parse(".X@").unwrap();
        let mut w = RoomWorld::new(WorldConfig::new(original.clone())).unwrap();
        assert_eq!(w.layout(), original);

        // Drive the agent onto the exit so the live state diverges
        // from the epoch start.
        let key = StateKey::new(Pos::new(2, 0), 2, PerceptVector::default());
        w.store.reinforce(
            egress_learn::TableSide::A,
            key,
            Action::Left,
            1.0,
            600.0,
        );
        w.set_epsilon_greedy(false);
        w.step();
        assert!(w.agents()[0].pos.is_escaped());
        assert_eq!(w.layout(), original, "mid-epoch saves see the start state");
        assert_eq!(w.layout().to_text(), ".X@\n");
    }

    #[test]
    fn worlds_move_between_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<RoomWorld>();
    }
}
