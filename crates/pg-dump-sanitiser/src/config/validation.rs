//! Configuration validation.

use super::Config;
use crate::error::{Result, SanitiseError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    for table in &config.excluded_tables {
        if table.is_empty() {
            return Err(SanitiseError::Config(
                "excluded_tables entries cannot be empty".into(),
            ));
        }
        if table.chars().any(char::is_whitespace) {
            return Err(SanitiseError::Config(format!(
                "excluded_tables entry '{}' contains whitespace",
                table
            )));
        }
        // Names are matched after schema qualifiers are stripped
        if table.contains('.') {
            return Err(SanitiseError::Config(format!(
                "excluded_tables entry '{}' must not be schema-qualified",
                table
            )));
        }
    }

    Ok(())
}
