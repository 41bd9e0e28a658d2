//! Sequence mapping: owned sequences attach to their table, the rest are
//! kept as standalone sequences.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::StatementMapper;
use crate::config::UnownedSequencePolicy;
use crate::core::identifier::{owned_by_table, split_qualifier, strip_qualifier};
use crate::core::{Schema, Sequence};
use crate::error::Result;
use crate::parse::{tokens, Statement, StatementKind};

/// Stage label for errors raised while mapping sequences.
pub const STAGE: &str = "mapping sequences";

// PostgreSQL's defaults; whole tokens only so `CACHE 10` survives.
static DEFAULT_CLAUSES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:START WITH 1|INCREMENT BY 1|NO MINVALUE|NO MAXVALUE|CACHE 1)\b")
        .expect("valid sequence default regex")
});
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"));
static SPACE_BEFORE_SEMICOLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+;").expect("valid semicolon regex"));

/// Strip default-valued clauses from a `CREATE SEQUENCE` statement.
///
/// Sequences created with PostgreSQL's defaults compare equal whether or not
/// the dump spelled the defaults out. Other statements are returned as is.
///
/// ```
/// use pg_dump_sanitiser::mapper::sequences::simplify_create_sequence;
///
/// assert_eq!(
///     simplify_create_sequence(
///         "CREATE SEQUENCE s START WITH 1 INCREMENT BY 1 NO MINVALUE NO MAXVALUE CACHE 1;"
///     ),
///     "CREATE SEQUENCE s;"
/// );
/// ```
pub fn simplify_create_sequence(statement: &str) -> String {
    if statement.is_empty() || !statement.contains("CREATE SEQUENCE") {
        return statement.to_string();
    }

    let stripped = DEFAULT_CLAUSES.replace_all(statement, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    SPACE_BEFORE_SEMICOLON.replace_all(&collapsed, ";").into_owned()
}

/// Split a sequence statement's name into `(name, schema)`.
fn sequence_ident(statement: &str) -> Option<(String, Option<String>)> {
    let (name, schema) = split_qualifier(tokens::sequence_name(statement)?);
    Some((name.to_string(), schema.map(str::to_string)))
}

/// Pairs `CREATE SEQUENCE` with its `ALTER SEQUENCE ... OWNED BY` and
/// attaches the pair to the owning table.
///
/// In a dump the ownership statement directly follows the creation. Output
/// of this tool lists the creations before the table and the ownership after
/// it, so the first later ownership statement for the same name is accepted
/// too. Ownership statements that pair with nothing are dropped.
#[derive(Debug, Default)]
pub struct SequenceMapper;

impl StatementMapper for SequenceMapper {
    fn stage(&self) -> &'static str {
        STAGE
    }

    fn map(&self, statements: Vec<Statement>, schema: &mut Schema) -> Result<Vec<Statement>> {
        // Ownership statements by sequence name, in stream order
        let mut owners: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, statement) in statements.iter().enumerate() {
            if !statement.is(StatementKind::AlterSequenceOwnedBy) {
                continue;
            }
            let owned = tokens::owned_by_target(&statement.text).is_some_and(|t| t != "NONE");
            if let (true, Some((name, _))) = (owned, sequence_ident(&statement.text)) {
                owners.entry(name).or_default().push(index);
            }
        }

        let mut consumed = vec![false; statements.len()];
        for (index, statement) in statements.iter().enumerate() {
            if !statement.is(StatementKind::CreateSequence) {
                continue;
            }
            let Some((name, qualifier)) = sequence_ident(&statement.text) else {
                continue;
            };
            let partner = owners
                .get(&name)
                .and_then(|candidates| candidates.iter().copied().find(|&j| j > index && !consumed[j]));
            let Some(partner) = partner else {
                continue;
            };

            let relation = &statements[partner].text;
            let target = tokens::owned_by_target(relation).unwrap_or_default();
            let table_name = owned_by_table(target);
            let segments: Vec<&str> = target.split('.').collect();
            let target_schema = (segments.len() > 2).then(|| segments[0]);

            let create = strip_qualifier(&simplify_create_sequence(&statement.text), qualifier.as_deref());
            let relation = strip_qualifier(
                &strip_qualifier(relation, qualifier.as_deref()),
                target_schema,
            );

            let table = schema.tables.require_mut(STAGE, table_name)?;
            debug!("Mapped sequence {} to table {}", name, table_name);
            table.sequences.push(Sequence { create, relation });
            consumed[index] = true;
            consumed[partner] = true;
        }

        let mut remaining = Vec::with_capacity(statements.len());
        for (statement, used) in statements.into_iter().zip(consumed) {
            if used {
                continue;
            }
            if statement.is(StatementKind::AlterSequenceOwnedBy) {
                warn!(
                    "Dropping sequence ownership without a matching CREATE SEQUENCE: {}",
                    statement.text
                );
                continue;
            }
            remaining.push(statement);
        }

        Ok(remaining)
    }
}

/// Keeps sequences no table owns as standalone sequences.
#[derive(Debug)]
pub struct StandaloneSequences {
    policy: UnownedSequencePolicy,
}

impl StandaloneSequences {
    /// Create the stage for the configured policy.
    pub fn new(policy: UnownedSequencePolicy) -> Self {
        Self { policy }
    }
}

impl StatementMapper for StandaloneSequences {
    fn stage(&self) -> &'static str {
        "storing sequences"
    }

    fn map(&self, statements: Vec<Statement>, schema: &mut Schema) -> Result<Vec<Statement>> {
        if self.policy == UnownedSequencePolicy::Error {
            return Ok(statements);
        }

        let mut remaining = Vec::with_capacity(statements.len());
        for statement in statements {
            if !statement.is(StatementKind::CreateSequence) {
                remaining.push(statement);
                continue;
            }
            let qualifier = sequence_ident(&statement.text).and_then(|(_, schema)| schema);
            let create = strip_qualifier(&simplify_create_sequence(&statement.text), qualifier.as_deref());
            debug!("Stored standalone sequence: {}", create);
            schema.sequences.push(create);
        }

        Ok(remaining)
    }
}
