//! Trigger extractor. Triggers are kept as whole statements and printed
//! after the functions they call.

use tracing::debug;

use super::StatementMapper;
use crate::core::identifier::{split_qualifier, strip_qualifier};
use crate::core::Schema;
use crate::error::Result;
use crate::parse::{tokens, Statement, StatementKind};

pub const STAGE: &str = "extracting triggers";

#[derive(Debug, Default)]
pub struct TriggerExtractor;

impl StatementMapper for TriggerExtractor {
    fn stage(&self) -> &'static str {
        STAGE
    }

    fn map(&self, statements: Vec<Statement>, schema: &mut Schema) -> Result<Vec<Statement>> {
        let mut remaining = Vec::with_capacity(statements.len());

        for statement in statements {
            if !statement.is(StatementKind::CreateTrigger) {
                remaining.push(statement);
                continue;
            }

            let qualifier = tokens::on_target(&statement.text).and_then(|t| split_qualifier(t).1);
            let trigger = strip_qualifier(&statement.text, qualifier);
            debug!("Extracted trigger: {}", trigger);
            schema.triggers.push(trigger);
        }

        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_collected() {
        let mut schema = Schema::default();
        let remaining = TriggerExtractor
            .map(
                vec![
                    Statement::new(
                        "CREATE TRIGGER touch BEFORE UPDATE ON public.users FOR EACH ROW EXECUTE FUNCTION public.touch();",
                    ),
                    Statement::new("CREATE CONSTRAINT TRIGGER chk AFTER INSERT ON t FOR EACH ROW EXECUTE PROCEDURE f();"),
                    Statement::new("CREATE SCHEMA app;"),
                ],
                &mut schema,
            )
            .unwrap();

        assert_eq!(remaining, vec![Statement::new("CREATE SCHEMA app;")]);
        assert_eq!(
            schema.triggers,
            vec![
                "CREATE TRIGGER touch BEFORE UPDATE ON users FOR EACH ROW EXECUTE FUNCTION touch();".to_string(),
                "CREATE CONSTRAINT TRIGGER chk AFTER INSERT ON t FOR EACH ROW EXECUTE PROCEDURE f();".to_string(),
            ]
        );
    }
}
