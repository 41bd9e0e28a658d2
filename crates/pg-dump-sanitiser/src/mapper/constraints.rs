//! Constraint mapper for `ALTER TABLE [ONLY] t ADD CONSTRAINT c ...;`.

use tracing::{debug, warn};

use super::StatementMapper;
use crate::core::identifier::{split_qualifier, strip_qualifier};
use crate::core::Schema;
use crate::error::Result;
use crate::parse::{tokens, Statement, StatementKind};

/// Stage label for errors raised while mapping constraints.
pub const STAGE: &str = "mapping constraints";

/// Stores each constraint body on its table and flags key columns.
#[derive(Debug, Default)]
pub struct ConstraintMapper;

impl StatementMapper for ConstraintMapper {
    fn stage(&self) -> &'static str {
        STAGE
    }

    fn map(&self, statements: Vec<Statement>, schema: &mut Schema) -> Result<Vec<Statement>> {
        let mut remaining = Vec::with_capacity(statements.len());

        for statement in statements {
            if !statement.is(StatementKind::AddConstraint) {
                remaining.push(statement);
                continue;
            }

            let text = statement.text.as_str();
            let parts = (
                tokens::alter_table_target(text),
                tokens::constraint_name(text),
                tokens::clause_from(text, "CONSTRAINT"),
            );
            let (Some(target), Some(name), Some(body)) = parts else {
                // Not an ALTER TABLE form we understand; left for the
                // completeness check.
                warn!("Constraint statement has an unexpected shape: {}", text);
                remaining.push(statement);
                continue;
            };

            let (table_name, qualifier) = split_qualifier(target);
            let body = strip_qualifier(body, qualifier);
            schema
                .tables
                .require_mut(STAGE, table_name)?
                .add_constraint(STAGE, name, &body)?;
            debug!("Mapped constraint {} on {}", name, table_name);
        }

        Ok(remaining)
    }
}
