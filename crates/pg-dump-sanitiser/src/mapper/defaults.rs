//! Column defaults: `ALTER TABLE ... ALTER COLUMN c SET DEFAULT v;` is folded
//! into the column definition as `... DEFAULT v`.

use tracing::debug;

use super::StatementMapper;
use crate::config::DefaultValueScope;
use crate::core::identifier::{split_qualifier, strip_qualifier};
use crate::core::Schema;
use crate::error::{Result, SanitiseError};
use crate::parse::{tokens, Statement, StatementKind};

/// Stage label for errors raised while mapping default values.
pub const STAGE: &str = "mapping default values";

#[derive(Debug, Default)]
pub struct DefaultValueMapper {
    scope: DefaultValueScope,
}

impl DefaultValueMapper {
    pub fn new(scope: DefaultValueScope) -> Self {
        Self { scope }
    }
}

impl StatementMapper for DefaultValueMapper {
    fn stage(&self) -> &'static str {
        STAGE
    }

    fn map(&self, statements: Vec<Statement>, schema: &mut Schema) -> Result<Vec<Statement>> {
        let mut remaining = Vec::with_capacity(statements.len());

        for statement in statements {
            if !statement.is(StatementKind::AlterColumnDefault) || !self.scope.accepts(&statement.text) {
                remaining.push(statement);
                continue;
            }

            let text = statement.text.as_str();
            let (table_name, qualifier) = tokens::alter_table_target(text)
                .map(split_qualifier)
                .ok_or_else(|| SanitiseError::parse(text, "default without a table"))?;
            let column_name = tokens::altered_column(text)
                .ok_or_else(|| SanitiseError::parse(text, "default without a column"))?;
            let clause = tokens::clause_from(text, "DEFAULT")
                .ok_or_else(|| SanitiseError::parse(text, "default without a value"))?;
            let clause = strip_qualifier(clause, qualifier);

            let table = schema.tables.require_mut(STAGE, table_name)?;
            let column = table.columns.get_mut(column_name).ok_or_else(|| {
                SanitiseError::referential(
                    STAGE,
                    format!("column does not exist: {}.{}", table_name, column_name),
                )
            })?;

            column.statement.push(' ');
            column.statement.push_str(&clause);
            debug!("Mapped default for {}.{}", table_name, column_name);
        }

        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Table;

    fn users_schema() -> Schema {
        let mut table = Table::new();
        table.add_column("id", "integer NOT NULL");
        table.add_column("status", "text");
        let mut schema = Schema::default();
        schema.tables.insert("users", table);
        schema
    }

    const NEXTVAL: &str =
        "ALTER TABLE ONLY public.users ALTER COLUMN id SET DEFAULT nextval('public.users_id_seq'::regclass);";
    const LITERAL: &str = "ALTER TABLE users ALTER COLUMN status SET DEFAULT 'new'::text;";

    #[test]
    fn test_default_appended_to_column() {
        let mut schema = users_schema();
        let remaining = DefaultValueMapper::default()
            .map(vec![Statement::new(NEXTVAL), Statement::new(LITERAL)], &mut schema)
            .unwrap();
        assert!(remaining.is_empty());

        let table = schema.tables.get("users").unwrap();
        assert_eq!(
            table.columns["id"].statement,
            "integer NOT NULL DEFAULT nextval('users_id_seq'::regclass)"
        );
        assert_eq!(table.columns["status"].statement, "text DEFAULT 'new'::text");
    }

    #[test]
    fn test_nextval_scope_leaves_other_defaults() {
        let mut schema = users_schema();
        let remaining = DefaultValueMapper::new(DefaultValueScope::Nextval)
            .map(vec![Statement::new(NEXTVAL), Statement::new(LITERAL)], &mut schema)
            .unwrap();
        assert_eq!(remaining, vec![Statement::new(LITERAL)]);
        assert_eq!(schema.tables.get("users").unwrap().columns["status"].statement, "text");
    }

    #[test]
    fn test_missing_table() {
        let mut schema = Schema::default();
        let err = DefaultValueMapper::default()
            .map(vec![Statement::new(NEXTVAL)], &mut schema)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "mapping default values - table does not exist: users"
        );
    }

    #[test]
    fn test_missing_column() {
        let mut schema = users_schema();
        let err = DefaultValueMapper::default()
            .map(
                vec![Statement::new("ALTER TABLE users ALTER COLUMN ghost SET DEFAULT 0;")],
                &mut schema,
            )
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("mapping default values - column does not exist"));
    }

    #[test]
    fn test_other_statements_pass_through() {
        let mut schema = users_schema();
        let input = vec![Statement::new("CREATE INDEX i ON users USING btree (id);")];
        let remaining = DefaultValueMapper::default().map(input.clone(), &mut schema).unwrap();
        assert_eq!(remaining, input);
    }
}
