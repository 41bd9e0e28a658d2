//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Housekeeping table written by the gorp migration tool.
pub const GORP_MIGRATIONS_TABLE: &str = "gorp_migrations";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tables kept out of the dependency graph and the printed schema.
    /// They are still mapped, so statements referring to them resolve.
    #[serde(default = "default_excluded_tables")]
    pub excluded_tables: Vec<String>,

    /// What to do with a `CREATE SEQUENCE` that no `OWNED BY` claims.
    #[serde(default)]
    pub unowned_sequences: UnownedSequencePolicy,

    /// Which `ALTER COLUMN ... SET DEFAULT` statements fold into columns.
    #[serde(default)]
    pub default_values: DefaultValueScope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excluded_tables: default_excluded_tables(),
            unowned_sequences: UnownedSequencePolicy::default(),
            default_values: DefaultValueScope::default(),
        }
    }
}

impl Config {
    /// Whether `table` is kept out of the graph and the output.
    pub fn is_excluded(&self, table: &str) -> bool {
        self.excluded_tables.iter().any(|t| t == table)
    }
}

/// Policy for sequences without an owning column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnownedSequencePolicy {
    /// Print them ahead of the tables, in discovery order.
    #[default]
    Standalone,

    /// Leave them unprocessed so the run fails.
    Error,
}

/// Scope of default values folded into column definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValueScope {
    /// Every `SET DEFAULT` statement.
    #[default]
    All,

    /// Only `SET DEFAULT nextval(...)`, i.e. sequence-backed columns.
    Nextval,
}

impl DefaultValueScope {
    /// Whether a default statement falls within this scope.
    pub fn accepts(&self, statement: &str) -> bool {
        match self {
            DefaultValueScope::All => true,
            DefaultValueScope::Nextval => statement.contains("DEFAULT nextval"),
        }
    }
}

// Default value functions for serde
fn default_excluded_tables() -> Vec<String> {
    vec![GORP_MIGRATIONS_TABLE.to_string()]
}
