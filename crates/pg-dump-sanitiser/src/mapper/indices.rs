//! Index mapper for `CREATE [UNIQUE] INDEX ... ON [ONLY] t ...;`.

use tracing::debug;

use super::StatementMapper;
use crate::core::identifier::{split_qualifier, strip_qualifier};
use crate::core::Schema;
use crate::error::{Result, SanitiseError};
use crate::parse::{tokens, Statement, StatementKind};

/// Stage label for errors raised while mapping indices.
pub const STAGE: &str = "mapping indices";

#[derive(Debug, Default)]
pub struct IndexMapper;

impl StatementMapper for IndexMapper {
    fn stage(&self) -> &'static str {
        STAGE
    }

    fn map(&self, statements: Vec<Statement>, schema: &mut Schema) -> Result<Vec<Statement>> {
        let mut remaining = Vec::with_capacity(statements.len());

        for statement in statements {
            if !statement.is(StatementKind::CreateIndex) {
                remaining.push(statement);
                continue;
            }

            let (table_name, qualifier) = tokens::on_target(&statement.text)
                .map(split_qualifier)
                .ok_or_else(|| SanitiseError::parse(statement.text.as_str(), "index without ON <table>"))?;
            let index = strip_qualifier(&statement.text, qualifier);

            schema.tables.require_mut(STAGE, table_name)?.indices.push(index);
            debug!("Mapped index on {}", table_name);
        }

        Ok(remaining)
    }
}
