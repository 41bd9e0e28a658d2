//! Error types for the sanitiser library.

use thiserror::Error;

/// Exit code for configuration errors (bad config file, invalid values).
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for statements that reference unknown tables or columns.
pub const EXIT_REFERENTIAL_ERROR: u8 = 3;
/// Exit code for dumps that still contain unprocessed statements.
pub const EXIT_INCOMPLETE_ERROR: u8 = 4;
/// Exit code for foreign-key cycles.
pub const EXIT_CYCLE_ERROR: u8 = 5;
/// Exit code for malformed statement blocks.
pub const EXIT_PARSE_ERROR: u8 = 6;
/// Exit code for I/O failures (unreadable or missing input).
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for sanitising operations.
#[derive(Error, Debug)]
pub enum SanitiseError {
    /// Configuration error (invalid YAML, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A statement block could not be parsed
    #[error("Parse error at {line:?}: {message}")]
    Parse { line: String, message: String },

    /// A statement references a table or column that was never declared
    #[error("{stage} - {message}")]
    Referential { stage: &'static str, message: String },

    /// Statements were left over after every stage ran
    #[error("{count} unprocessed statement(s) remain, first: {first:?}")]
    Incomplete { count: usize, first: String },

    /// The foreign-key graph has a cycle
    #[error("graph is not a dag - foreign key cycle between tables: {}", tables.join(", "))]
    Cycle { tables: Vec<String> },
}

impl SanitiseError {
    /// Create a Parse error for the offending line.
    pub fn parse(line: impl Into<String>, message: impl Into<String>) -> Self {
        SanitiseError::Parse {
            line: line.into(),
            message: message.into(),
        }
    }

    /// Create a Referential error raised by the named mapping stage.
    pub fn referential(stage: &'static str, message: impl Into<String>) -> Self {
        SanitiseError::Referential {
            stage,
            message: message.into(),
        }
    }

    /// Process exit code for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            SanitiseError::Config(_) | SanitiseError::Yaml(_) => EXIT_CONFIG_ERROR,
            SanitiseError::Io(_) => EXIT_IO_ERROR,
            SanitiseError::Parse { .. } => EXIT_PARSE_ERROR,
            SanitiseError::Referential { .. } => EXIT_REFERENTIAL_ERROR,
            SanitiseError::Incomplete { .. } => EXIT_INCOMPLETE_ERROR,
            SanitiseError::Cycle { .. } => EXIT_CYCLE_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for sanitising operations.
pub type Result<T> = std::result::Result<T, SanitiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referential_message_names_stage() {
        let err = SanitiseError::referential("mapping sequences", "table does not exist: users");
        assert_eq!(
            err.to_string(),
            "mapping sequences - table does not exist: users"
        );
        assert_eq!(err.exit_code(), EXIT_REFERENTIAL_ERROR);
    }

    #[test]
    fn test_exit_codes_by_category() {
        let io = SanitiseError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_code(), EXIT_IO_ERROR);
        assert_eq!(SanitiseError::Config("bad".into()).exit_code(), EXIT_CONFIG_ERROR);
        assert_eq!(
            SanitiseError::Cycle { tables: vec!["a".into(), "b".into()] }.exit_code(),
            EXIT_CYCLE_ERROR
        );
        assert_eq!(
            SanitiseError::Incomplete { count: 1, first: "x;".into() }.exit_code(),
            EXIT_INCOMPLETE_ERROR
        );
        assert_eq!(SanitiseError::parse("x", "y").exit_code(), EXIT_PARSE_ERROR);
    }

    #[test]
    fn test_cycle_lists_tables() {
        let err = SanitiseError::Cycle {
            tables: vec!["a".into(), "b".into()],
        };
        assert!(err.to_string().contains("a, b"));
    }

    #[test]
    fn test_format_detailed_includes_cause() {
        let err = SanitiseError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: IO error: disk"));
    }
}
