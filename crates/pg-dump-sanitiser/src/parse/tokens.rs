//! Positional token extraction for each statement kind.
//!
//! `pg_dump` emits DDL in a small number of fixed shapes, so object names are
//! found by position relative to a keyword rather than by a SQL grammar. All
//! of that positional knowledge lives here. Each function documents the shape
//! it expects; tokens are whitespace-delimited and a trailing `;` is dropped
//! from the returned token.
//!
//! | statement shape                                           | extracted       |
//! |-----------------------------------------------------------|-----------------|
//! | `CREATE TABLE <name> (`                                   | 3rd token       |
//! | `CREATE SEQUENCE <name> ...;`                             | 3rd token       |
//! | `ALTER SEQUENCE <name> OWNED BY <target>;`                | 3rd, 6th token  |
//! | `ALTER TABLE [ONLY] <table> ALTER COLUMN <column> ...;`   | after ONLY/TABLE, after ALTER COLUMN |
//! | `ALTER TABLE [ONLY] <table> ADD CONSTRAINT <name> ...;`   | 4th, 7th token (with ONLY) |
//! | `CREATE [UNIQUE] INDEX <name> ON [ONLY] <table> ...;`     | after ON        |
//! | `CREATE [CONSTRAINT] TRIGGER <name> ... ON <table> ...;`  | after ON        |
//! | `CREATE [OR REPLACE] FUNCTION <name>(<args>) ...`         | after FUNCTION, before `(` |

fn words(statement: &str) -> Vec<&str> {
    statement.split_whitespace().collect()
}

fn clean(token: &str) -> &str {
    token.trim_end_matches(';')
}

/// Token following the first occurrence of `keyword`.
pub fn token_after<'a>(statement: &'a str, keyword: &str) -> Option<&'a str> {
    let words = words(statement);
    let index = words.iter().position(|w| *w == keyword)?;
    words.get(index + 1).copied().map(clean)
}

/// Token following the first occurrence of the keyword pair `first second`.
pub fn token_after_pair<'a>(statement: &'a str, first: &str, second: &str) -> Option<&'a str> {
    let words = words(statement);
    let index = words
        .windows(2)
        .position(|pair| pair[0] == first && pair[1] == second)?;
    words.get(index + 2).copied().map(clean)
}

/// Table name of a `CREATE TABLE <name> (` line.
pub fn create_table_name(line: &str) -> Option<&str> {
    token_after(line, "TABLE")
}

/// Sequence name of a `CREATE SEQUENCE` or `ALTER SEQUENCE` statement.
pub fn sequence_name(statement: &str) -> Option<&str> {
    token_after(statement, "SEQUENCE")
}

/// Target of `OWNED BY <schema>.<table>.<column>`.
pub fn owned_by_target(statement: &str) -> Option<&str> {
    token_after_pair(statement, "OWNED", "BY")
}

/// Table of an `ALTER TABLE [ONLY] <table> ...` statement.
pub fn alter_table_target(statement: &str) -> Option<&str> {
    let words = words(statement);
    let index = words
        .windows(2)
        .position(|pair| pair[0] == "ALTER" && pair[1] == "TABLE")?;
    let mut target = index + 2;
    if words.get(target) == Some(&"ONLY") {
        target += 1;
    }
    words.get(target).copied().map(clean)
}

/// Column of an `... ALTER COLUMN <column> ...` statement.
pub fn altered_column(statement: &str) -> Option<&str> {
    token_after_pair(statement, "ALTER", "COLUMN")
}

/// Constraint name following `CONSTRAINT`.
pub fn constraint_name(statement: &str) -> Option<&str> {
    token_after(statement, "CONSTRAINT")
}

/// Table after `ON [ONLY]`, used by index and trigger statements.
pub fn on_target(statement: &str) -> Option<&str> {
    let words = words(statement);
    let index = words.iter().position(|w| *w == "ON")?;
    let mut target = index + 1;
    if words.get(target) == Some(&"ONLY") {
        target += 1;
    }
    words.get(target).copied().map(clean)
}

/// Function name (possibly qualified) of a `CREATE FUNCTION` line.
pub fn function_name(line: &str) -> Option<&str> {
    let name = token_after(line, "FUNCTION")?;
    name.split('(').next().filter(|n| !n.is_empty())
}

/// Text from `keyword` up to, not including, the trailing `;`.
pub fn clause_from<'a>(statement: &'a str, keyword: &str) -> Option<&'a str> {
    let index = statement.find(keyword)?;
    let clause = &statement[index..];
    Some(clause.strip_suffix(';').unwrap_or(clause).trim_end())
}
