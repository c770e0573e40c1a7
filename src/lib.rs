//! Database schema introspection.
//!
//! `schemascope` connects to a relational database and reconstructs a typed,
//! point-in-time model of one schema: its tables with their columns,
//! indices, foreign keys, referenced keys, and constraints. It exists for
//! tools that need schema metadata — code generators, documentation tools,
//! migration checkers — without hand-writing catalog SQL.
//!
//! ```no_run
//! use schemascope::{Client, DataSource, LoadOptions};
//!
//! # async fn run() -> Result<(), schemascope::MetadataError> {
//! let mut client = Client::new(DataSource {
//!     driver: "postgres".into(),
//!     host: "localhost".into(),
//!     user: "postgres".into(),
//!     database: "app".into(),
//!     ..DataSource::default()
//! })?;
//! client.connect().await?;
//! let tables = client.all_tables("public", LoadOptions::all()).await?;
//! for table in &tables {
//!     println!("{} ({} columns)", table.name, table.columns.len());
//! }
//! client.disconnect().await?;
//! # Ok(())
//! # }
//! ```

mod assemble;
mod client;
mod data_source;
mod error;
pub mod model;
pub mod provider;
mod rows;

pub use client::{read_schema, Client, LoadOptions};
pub use data_source::DataSource;
pub use error::MetadataError;
pub use model::{
    Column, ColumnRef, ColumnReference, Constraint, ConstraintKind, ForeignKey, Index, Size, Table,
};
pub use provider::{provider_for, Provider};
