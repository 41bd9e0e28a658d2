//! Core types shared by every pipeline stage.
//!
//! - [`schema`]: tables, columns, owned sequences and the table registry
//! - [`identifier`]: schema-qualifier splitting and stripping

pub mod identifier;
pub mod schema;

pub use schema::{Column, Schema, Sequence, Table, TableRegistry};
