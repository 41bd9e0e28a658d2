//! Table mapper: `CREATE TABLE` blocks become [`Table`] entries.
//!
//! Runs on raw (unsquashed) lines because each column sits on its own line:
//!
//! ```text
//! CREATE TABLE public.users (
//!     id integer NOT NULL,
//!     email character varying(255),
//!     CONSTRAINT users_pkey PRIMARY KEY (id)
//! );
//! ```
//!
//! Inline `CONSTRAINT` lines are how the printer renders constraints, so
//! accepting them keeps canonical output stable when fed back in.

use tracing::debug;

use crate::core::identifier::{split_qualifier, strip_qualifier};
use crate::core::{Table, TableRegistry};
use crate::error::{Result, SanitiseError};
use crate::parse::tokens;

/// Stage label for errors raised while mapping tables.
pub const STAGE: &str = "mapping tables";

/// Map every `CREATE TABLE` block into `tables` and return the other lines.
pub fn map_tables(lines: Vec<String>, tables: &mut TableRegistry) -> Result<Vec<String>> {
    let mut remaining = Vec::with_capacity(lines.len());
    let mut lines = lines.into_iter();

    while let Some(line) = lines.next() {
        // A single-line CREATE TABLE is not a block; it is left for the
        // completeness check to report.
        if !line.contains("CREATE TABLE") || line.trim_end().ends_with(';') {
            remaining.push(line);
            continue;
        }

        let qualified = tokens::create_table_name(&line)
            .ok_or_else(|| SanitiseError::parse(line.as_str(), "CREATE TABLE without a table name"))?;
        let (name, schema) = split_qualifier(qualified);

        let mut table = Table::new();
        let mut inline_constraints = Vec::new();
        let mut terminated = false;

        while let Some(column_line) = lines.next() {
            let trimmed = column_line.trim();

            // `)` on its own line may be followed by table clauses such as
            // `PARTITION BY RANGE (logdate);`, running up to the `;`.
            if let Some(rest) = trimmed.strip_prefix(')') {
                let mut tail = rest.trim().to_string();
                while !tail.ends_with(';') {
                    let Some(next) = lines.next() else {
                        break;
                    };
                    if !tail.is_empty() {
                        tail.push(' ');
                    }
                    tail.push_str(next.trim());
                }
                if let Some(clauses) = tail.strip_suffix(';') {
                    terminated = true;
                    let clauses = clauses.trim();
                    if !clauses.is_empty() {
                        table.options = Some(strip_qualifier(clauses, schema));
                    }
                }
                break;
            }

            if trimmed.ends_with(';') {
                terminated = true;
                break;
            }

            let entry = trimmed.strip_suffix(',').unwrap_or(trimmed);
            let entry = strip_qualifier(entry, schema);
            if entry.starts_with("CONSTRAINT ") {
                let constraint = tokens::constraint_name(&entry)
                    .ok_or_else(|| SanitiseError::parse(entry.as_str(), "constraint without a name"))?
                    .to_string();
                inline_constraints.push((constraint, entry));
                continue;
            }

            let (column, statement) = entry.split_once(' ').ok_or_else(|| {
                SanitiseError::parse(
                    column_line.as_str(),
                    format!("column definition in table {} has no type", name),
                )
            })?;
            table.add_column(column, statement.trim_start());
        }

        if !terminated {
            return Err(SanitiseError::parse(
                line.as_str(),
                "CREATE TABLE block is not terminated by ';'",
            ));
        }

        // Columns are all known now, so key flags can be resolved.
        for (constraint, body) in &inline_constraints {
            table.add_constraint(STAGE, constraint, body)?;
        }

        debug!(
            "Mapped table {} ({} columns, {} inline constraints)",
            name,
            table.columns.len(),
            inline_constraints.len()
        );
        tables.insert(name, table);
    }

    Ok(remaining)
}
