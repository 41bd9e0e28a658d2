//! Statement classification.
//!
//! Every squashed statement is tagged once with a [`StatementKind`]; mapping
//! stages then dispatch on the tag instead of re-testing substrings. A
//! statement still tagged after the last stage is reported as unprocessed.

use std::fmt;

/// Kind of a logical dump statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `CREATE TABLE` that the block-based table mapper did not take.
    CreateTable,
    /// `CREATE SEQUENCE ...;`
    CreateSequence,
    /// `ALTER SEQUENCE <name> OWNED BY <target>;`
    AlterSequenceOwnedBy,
    /// `ALTER TABLE ... ALTER COLUMN ... SET DEFAULT ...;`
    AlterColumnDefault,
    /// `ALTER TABLE ... ADD CONSTRAINT ...;`
    AddConstraint,
    /// `CREATE [UNIQUE] INDEX ...;`
    CreateIndex,
    /// `CREATE FUNCTION` that the block-based extractor did not take.
    CreateFunction,
    /// `CREATE [CONSTRAINT] TRIGGER ...;`
    CreateTrigger,
    /// Anything else.
    Unrecognized,
}

impl StatementKind {
    /// Classify a squashed statement.
    ///
    /// Order matters: trigger declarations may contain `CONSTRAINT`, and
    /// sequence ownership statements must not be mistaken for creations.
    pub fn of(statement: &str) -> Self {
        if statement.contains("CREATE TRIGGER") || statement.contains("CREATE CONSTRAINT TRIGGER") {
            StatementKind::CreateTrigger
        } else if statement.contains("ALTER SEQUENCE") && statement.contains("OWNED BY") {
            StatementKind::AlterSequenceOwnedBy
        } else if statement.contains("CREATE SEQUENCE") {
            StatementKind::CreateSequence
        } else if statement.starts_with("ALTER TABLE")
            && statement.contains(" ALTER COLUMN ")
            && statement.contains(" SET DEFAULT ")
        {
            StatementKind::AlterColumnDefault
        } else if statement.contains("CONSTRAINT") {
            StatementKind::AddConstraint
        } else if statement.starts_with("CREATE") && statement.contains(" INDEX ") {
            StatementKind::CreateIndex
        } else if statement.contains("CREATE TABLE") {
            StatementKind::CreateTable
        } else if statement.contains("CREATE FUNCTION")
            || statement.contains("CREATE OR REPLACE FUNCTION")
        {
            StatementKind::CreateFunction
        } else {
            StatementKind::Unrecognized
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatementKind::CreateTable => "create table",
            StatementKind::CreateSequence => "create sequence",
            StatementKind::AlterSequenceOwnedBy => "sequence ownership",
            StatementKind::AlterColumnDefault => "column default",
            StatementKind::AddConstraint => "constraint",
            StatementKind::CreateIndex => "index",
            StatementKind::CreateFunction => "function",
            StatementKind::CreateTrigger => "trigger",
            StatementKind::Unrecognized => "unrecognized",
        };
        f.write_str(label)
    }
}

/// A squashed statement and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Kind assigned at classification time.
    pub kind: StatementKind,

    /// Full statement text, normally ending with `;`.
    pub text: String,
}

impl Statement {
    /// Classify and wrap a squashed statement.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: StatementKind::of(&text),
            text,
        }
    }

    /// Whether this statement has the given kind.
    pub fn is(&self, kind: StatementKind) -> bool {
        self.kind == kind
    }
}

/// Classify every squashed statement.
pub fn classify_all(statements: Vec<String>) -> Vec<Statement> {
    statements.into_iter().map(Statement::new).collect()
}
