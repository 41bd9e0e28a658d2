//! Turning raw dump text into classified statements.
//!
//! - [`reader`]: the [`LineSource`] seam and a buffered file reader
//! - [`filter`]: drops comments, settings and ownership lines
//! - [`squash`]: joins multi-line statements
//! - [`classify`]: tags each statement with a [`StatementKind`]
//! - [`tokens`]: positional name extraction per statement shape

pub mod classify;
pub mod filter;
pub mod reader;
pub mod squash;
pub mod tokens;

pub use classify::{classify_all, Statement, StatementKind};
pub use filter::is_redundant;
pub use reader::{DumpReader, LineSource};
pub use squash::squash_statements;
