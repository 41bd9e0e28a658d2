//! # pg-dump-sanitiser
//!
//! Canonical, diff-friendly rendering of PostgreSQL schema dumps.
//!
//! The library reads the plain-text output of `pg_dump --schema-only` and
//! reassembles it into one `CREATE TABLE` per table, with columns, keys,
//! defaults, owned sequences and indices folded in and sorted:
//!
//! - **Order independent**: output does not depend on statement order
//! - **Schema independent**: `public.` style qualifiers are removed
//! - **Dependency ordered**: referenced tables print before their referencers
//! - **Strict**: any statement no stage understands fails the run
//!
//! ## Example
//!
//! ```rust,no_run
//! use pg_dump_sanitiser::{Config, Sanitiser};
//!
//! fn main() -> pg_dump_sanitiser::Result<()> {
//!     let config = Config::load("sanitiser.yaml")?;
//!     let canonical = Sanitiser::new(config).sanitise_file("schema.sql")?;
//!     print!("{}", canonical);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod mapper;
pub mod parse;
pub mod pipeline;
pub mod render;

// Re-exports for convenient access
pub use config::{Config, DefaultValueScope, UnownedSequencePolicy};
pub use crate::core::{Column, Schema, Sequence, Table, TableRegistry};
pub use error::{Result, SanitiseError};
pub use parse::{DumpReader, LineSource};
pub use pipeline::{PipelineStats, Sanitised, Sanitiser};
