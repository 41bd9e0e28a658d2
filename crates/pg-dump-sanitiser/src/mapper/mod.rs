//! Mapping stages that fold dump statements into a [`Schema`].
//!
//! The block-based stages ([`tables`], [`functions`]) run on raw lines. Every
//! other stage implements [`StatementMapper`] and runs on classified
//! statements, handing on whatever it did not consume.

pub mod constraints;
pub mod defaults;
pub mod functions;
pub mod indices;
pub mod sequences;
pub mod tables;
pub mod triggers;

pub use constraints::ConstraintMapper;
pub use defaults::DefaultValueMapper;
pub use functions::extract_functions;
pub use indices::IndexMapper;
pub use sequences::{simplify_create_sequence, SequenceMapper, StandaloneSequences};
pub use tables::map_tables;
pub use triggers::TriggerExtractor;

use crate::config::Config;
use crate::core::Schema;
use crate::error::Result;
use crate::parse::Statement;

/// One statement-level mapping stage.
pub trait StatementMapper {
    /// Label used in log lines and error messages.
    fn stage(&self) -> &'static str;

    /// Fold the statements this stage understands into `schema` and return
    /// the rest in input order.
    fn map(&self, statements: Vec<Statement>, schema: &mut Schema) -> Result<Vec<Statement>>;
}

/// The statement-level stages in the order they run.
pub fn statement_mappers(config: &Config) -> Vec<Box<dyn StatementMapper>> {
    vec![
        Box::new(SequenceMapper),
        Box::new(StandaloneSequences::new(config.unowned_sequences)),
        Box::new(DefaultValueMapper::new(config.default_values)),
        Box::new(ConstraintMapper),
        Box::new(IndexMapper),
        Box::new(TriggerExtractor),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let stages: Vec<&str> = statement_mappers(&Config::default())
            .iter()
            .map(|m| m.stage())
            .collect();
        assert_eq!(
            stages,
            vec![
                sequences::STAGE,
                "storing sequences",
                defaults::STAGE,
                constraints::STAGE,
                indices::STAGE,
                triggers::STAGE,
            ]
        );
    }
}
