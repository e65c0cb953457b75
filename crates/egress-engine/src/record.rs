//! Epoch outcomes and the append-only results log.
//!
//! The world records one [`EpochRecord`] per finished epoch. The log
//! never drops or reorders entries, so the epoch index doubles as the
//! position in the log. [`ResultsLog::to_csv`] renders the whole run
//! in the trainer's two-column results format.

use std::fmt;

/// Outcome of one finished epoch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochRecord {
    /// Zero-based epoch index.
    pub epoch: u32,
    /// Rewards of all agents over the whole epoch, summed.
    pub total_reward: f64,
}

impl fmt::Display for EpochRecord {
    /// The results-file line format: `epoch, total reward`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.epoch, self.total_reward)
    }
}

/// What one simulated turn reported back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Whether this turn closed the epoch (step budget exhausted or no
    /// agent left to act).
    pub epoch_ended: bool,
    /// Reward accumulated by the epoch so far; the final total when
    /// `epoch_ended` is set.
    pub epoch_reward: f64,
}

/// Append-only log of finished epochs.
#[derive(Clone, Debug, Default)]
pub struct ResultsLog {
    records: Vec<EpochRecord>,
}

impl ResultsLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: EpochRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[EpochRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<EpochRecord> {
        self.records.last().copied()
    }

    /// Number of finished epochs on record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no epoch has finished yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records, as when pointing the trainer at a fresh
    /// results file.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Render the log as CSV text with the classic header.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("epoch, total reward\n");
        for record in &self.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }
}
