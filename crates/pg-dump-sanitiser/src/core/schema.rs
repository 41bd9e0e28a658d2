//! Entity model for a reassembled schema: tables, columns, owned sequences.
//!
//! Every mapping stage writes into the same [`TableRegistry`]. The registry is
//! created fresh for each run and passed explicitly, never shared globally.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::identifier::unqualified;
use crate::error::{Result, SanitiseError};

/// Column definition as it will be printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    /// Type and modifiers after the column name, plus any folded default.
    pub statement: String,

    /// Column is part of a primary key constraint.
    pub is_primary_key: bool,

    /// Column is part of a foreign key constraint.
    pub is_foreign_key: bool,
}

impl Column {
    /// Create a plain column with no key flags.
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            ..Self::default()
        }
    }
}

/// Sequence owned by a table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Normalized `CREATE SEQUENCE` statement.
    pub create: String,

    /// The `ALTER SEQUENCE ... OWNED BY` statement.
    pub relation: String,
}

/// Table structure accumulated from every statement that touches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Columns keyed by name.
    pub columns: BTreeMap<String, Column>,

    /// Constraint bodies (`CONSTRAINT name ...`) keyed by constraint name.
    pub constraints: BTreeMap<String, String>,

    /// Owned sequences in discovery order.
    pub sequences: Vec<Sequence>,

    /// Index statements in discovery order.
    pub indices: Vec<String>,

    /// Clauses after the closing parenthesis, e.g. `PARTITION BY RANGE (d)`.
    pub options: Option<String>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, replacing any previous definition of the same name.
    pub fn add_column(&mut self, name: impl Into<String>, statement: impl Into<String>) {
        self.columns.insert(name.into(), Column::new(statement));
    }

    /// Store a constraint body and flag the key columns it names.
    ///
    /// `PRIMARY KEY (a, b)` flags `a` and `b` as primary key columns,
    /// `FOREIGN KEY (a)` flags `a` as a foreign key column. When a named
    /// column does not exist the constraint map is restored to what it held
    /// before the call and a referential error tagged with `stage` is returned.
    pub fn add_constraint(&mut self, stage: &'static str, name: &str, body: &str) -> Result<()> {
        let previous = self.constraints.insert(name.to_string(), body.to_string());

        let (keyword, primary) = if body.contains("PRIMARY KEY") {
            ("PRIMARY KEY", true)
        } else if body.contains("FOREIGN KEY") {
            ("FOREIGN KEY", false)
        } else {
            return Ok(());
        };

        let key_columns = key_column_list(body, keyword);
        if let Some(missing) = key_columns
            .iter()
            .find(|column| !self.columns.contains_key(**column))
        {
            let missing = missing.to_string();
            match previous {
                Some(previous) => self.constraints.insert(name.to_string(), previous),
                None => self.constraints.remove(name),
            };
            return Err(SanitiseError::referential(
                stage,
                format!("column does not exist: {} (constraint {})", missing, name),
            ));
        }
        for column in key_columns {
            if let Some(column) = self.columns.get_mut(column) {
                if primary {
                    column.is_primary_key = true;
                } else {
                    column.is_foreign_key = true;
                }
            }
        }

        Ok(())
    }

    /// Names of the tables this table's foreign keys point at.
    pub fn referenced_tables(&self) -> BTreeSet<String> {
        self.constraints
            .values()
            .filter(|body| body.contains("FOREIGN KEY"))
            .filter_map(|body| {
                let (_, target) = body.split_once("REFERENCES ")?;
                let target = target.split('(').next()?.trim();
                Some(unqualified(target).to_string())
            })
            .collect()
    }

    /// Columns in print order: primary keys, then foreign keys, then the
    /// rest, each group sorted by name.
    pub fn columns_in_print_order(&self) -> Vec<(&str, &Column)> {
        let mut primary = Vec::new();
        let mut foreign = Vec::new();
        let mut plain = Vec::new();
        for (name, column) in &self.columns {
            if column.is_primary_key {
                primary.push((name.as_str(), column));
            } else if column.is_foreign_key {
                foreign.push((name.as_str(), column));
            } else {
                plain.push((name.as_str(), column));
            }
        }
        primary.extend(foreign);
        primary.extend(plain);
        primary
    }
}

/// Column names inside the parentheses following `keyword`.
fn key_column_list<'a>(body: &'a str, keyword: &str) -> Vec<&'a str> {
    let after = match body.find(keyword) {
        Some(index) => &body[index + keyword.len()..],
        None => return Vec::new(),
    };
    let inner = match (after.find('('), after.find(')')) {
        (Some(open), Some(close)) if open < close => &after[open + 1..close],
        _ => return Vec::new(),
    };
    inner
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Every table mapped during one run, keyed by unqualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRegistry {
    tables: BTreeMap<String, Table>,
}

impl TableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table. A later definition with the same name wins.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// Look up a table.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Look up a table that a statement refers to; absence is a referential
    /// error raised on behalf of `stage`.
    pub fn require_mut(&mut self, stage: &'static str, name: &str) -> Result<&mut Table> {
        self.tables.get_mut(name).ok_or_else(|| {
            SanitiseError::referential(stage, format!("table does not exist: {}", name))
        })
    }

    /// Registered table names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterate over `(name, table)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table has been registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Result of sanitising one dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Tables with their columns, keys, sequences and indices.
    pub tables: TableRegistry,

    /// Normalized `CREATE SEQUENCE` statements without an owner.
    pub sequences: Vec<String>,

    /// Function definition lines, bodies verbatim.
    pub functions: Vec<String>,

    /// Trigger statements.
    pub triggers: Vec<String>,
}
