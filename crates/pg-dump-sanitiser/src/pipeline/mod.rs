//! The sanitising pipeline.
//!
//! [`Sanitiser`] drives a run from raw lines to a sorted [`Schema`]:
//!
//! 1. read and filter lines from a [`LineSource`]
//! 2. extract functions, then map `CREATE TABLE` blocks (raw lines)
//! 3. squash and classify the remaining statements
//! 4. run each [`StatementMapper`](crate::mapper::StatementMapper) in turn
//! 5. fail if any statement was left unconsumed
//! 6. sort tables by foreign-key dependency
//!
//! Every stage writes into a registry owned by the run; nothing is shared
//! between runs.

mod stats;

pub use stats::PipelineStats;

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::Config;
use crate::core::Schema;
use crate::error::{Result, SanitiseError};
use crate::graph::sort_tables;
use crate::mapper::{extract_functions, map_tables, statement_mappers};
use crate::parse::{classify_all, is_redundant, squash_statements, DumpReader, LineSource, Statement};
use crate::render::render;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Sanitised {
    /// Everything mapped from the dump.
    pub schema: Schema,

    /// Printable tables in dependency order.
    pub order: Vec<String>,

    /// Counters for the run.
    pub stats: PipelineStats,
}

impl Sanitised {
    /// Render the canonical schema text.
    pub fn render(&self) -> String {
        render(&self.schema, &self.order)
    }
}

/// Runs dumps through the pipeline with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Sanitiser {
    config: Config,
}

impl Sanitiser {
    /// Create a sanitiser.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the pipeline over every line `source` supplies.
    pub fn run<S: LineSource + ?Sized>(&self, source: &mut S) -> Result<Sanitised> {
        let start = Instant::now();
        let mut stats = PipelineStats::new();

        let mut lines = Vec::new();
        while let Some(line) = source.next_line()? {
            stats.lines_read += 1;
            if is_redundant(&line) {
                stats.lines_dropped += 1;
                continue;
            }
            lines.push(line);
        }
        debug!(
            "Read {} lines, {} kept after filtering",
            stats.lines_read,
            lines.len()
        );

        let mut schema = Schema::default();
        // Function bodies may hold DDL of their own, so they are taken out
        // before table blocks are looked for.
        let lines = extract_functions(lines, &mut schema.functions)?;
        let lines = map_tables(lines, &mut schema.tables)?;

        let squashed = squash_statements(lines);
        stats.statements = squashed.len();
        let mut statements = classify_all(squashed);

        for mapper in statement_mappers(&self.config) {
            let before = statements.len();
            statements = mapper.map(statements, &mut schema)?;
            let consumed = before - statements.len();
            debug!("Stage '{}' consumed {} statement(s)", mapper.stage(), consumed);
            stats.record_stage(mapper.stage(), consumed);
        }
        ensure_consumed(&statements)?;

        let order = sort_tables(&schema.tables, &self.config)?;

        stats.collect(&schema);
        stats.finalize(start.elapsed());
        info!("Sanitised dump: {}", stats.summary());

        Ok(Sanitised { schema, order, stats })
    }

    /// Sanitise a dump file and return the canonical text.
    pub fn sanitise_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let mut reader = DumpReader::open(path)?;
        Ok(self.run(&mut reader)?.render())
    }

    /// Sanitise dump text held in memory.
    pub fn sanitise_str(&self, dump: &str) -> Result<String> {
        let mut reader = DumpReader::new(dump.as_bytes());
        Ok(self.run(&mut reader)?.render())
    }
}

/// Fail when statements are left after the last stage.
fn ensure_consumed(statements: &[Statement]) -> Result<()> {
    let Some(first) = statements.first() else {
        return Ok(());
    };
    for statement in statements {
        debug!("Unprocessed {} statement: {}", statement.kind, statement.text);
    }
    Err(SanitiseError::Incomplete {
        count: statements.len(),
        first: first.text.clone(),
    })
}
