//! Error types for schema introspection.

use thiserror::Error;

/// Errors that can occur while reading schema metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The data source names a driver no provider is registered for.
    #[error("unknown driver: {0}")]
    UnknownDriver(String),

    #[error("schema name is required")]
    SchemaRequired,

    #[error("table name is required")]
    TableNameRequired,

    #[error("database connection is not established")]
    NotConnected,

    #[error("table '{0}' was not found")]
    TableNotFound(String),

    /// A foreign key references a column the loaded table does not have.
    #[error("column '{column}' was not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// The catalog reported a constraint kind outside CHECK/UNIQUE/EXCLUDE.
    #[error("unexpected constraint kind: {0}")]
    UnexpectedConstraintKind(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
