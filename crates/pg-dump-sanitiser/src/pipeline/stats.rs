//! Run statistics.

use std::time::Duration;

use crate::core::Schema;
use crate::mapper::{defaults, functions};

/// Counters collected over one sanitising run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Raw lines read from the source.
    pub lines_read: usize,

    /// Lines dropped by the redundancy filter.
    pub lines_dropped: usize,

    /// Logical statements after squashing.
    pub statements: usize,

    /// Tables mapped, excluded tables included.
    pub tables: usize,

    /// Sequences attached to a table.
    pub owned_sequences: usize,

    /// Sequences printed on their own.
    pub standalone_sequences: usize,

    /// Column defaults folded into columns.
    pub defaults: usize,

    /// Constraints stored on tables.
    pub constraints: usize,

    /// Indices stored on tables.
    pub indices: usize,

    /// Functions extracted.
    pub functions: usize,

    /// Triggers extracted.
    pub triggers: usize,

    /// Statements consumed by each statement-level stage, in run order.
    pub stages: Vec<(&'static str, usize)>,

    /// Total elapsed wall-clock time.
    pub total_time: Duration,
}

impl PipelineStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how many statements a stage consumed.
    pub fn record_stage(&mut self, stage: &'static str, consumed: usize) {
        self.stages.push((stage, consumed));
    }

    /// Statements consumed by `stage`, zero if it never ran.
    pub fn consumed_by(&self, stage: &str) -> usize {
        self.stages
            .iter()
            .filter(|(name, _)| *name == stage)
            .map(|(_, consumed)| consumed)
            .sum()
    }

    /// Fill in the object counts from the finished schema.
    pub fn collect(&mut self, schema: &Schema) {
        self.tables = schema.tables.len();
        self.standalone_sequences = schema.sequences.len();
        self.functions = schema
            .functions
            .iter()
            .filter(|line| functions::starts_function(line))
            .count();
        self.triggers = schema.triggers.len();
        self.defaults = self.consumed_by(defaults::STAGE);

        self.owned_sequences = 0;
        self.constraints = 0;
        self.indices = 0;
        for (_, table) in schema.tables.iter() {
            self.owned_sequences += table.sequences.len();
            self.constraints += table.constraints.len();
            self.indices += table.indices.len();
        }
    }

    /// Finalize stats with the elapsed time.
    pub fn finalize(&mut self, total_time: Duration) {
        self.total_time = total_time;
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "{} lines ({} redundant), {} statements: {} tables, {} owned + {} standalone sequences, \
             {} defaults, {} constraints, {} indices, {} functions, {} triggers in {:.2?}",
            self.lines_read,
            self.lines_dropped,
            self.statements,
            self.tables,
            self.owned_sequences,
            self.standalone_sequences,
            self.defaults,
            self.constraints,
            self.indices,
            self.functions,
            self.triggers,
            self.total_time
        )
    }
}
