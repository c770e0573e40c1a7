//! Dialect providers: a connect operation plus the parameterized catalog SQL
//! the engine runs.
//!
//! Every query method documents its bind parameters, result columns, and
//! ordering. The ordering is a hard contract: the engine's run-length row
//! grouping depends on it and does not re-validate it.

use async_trait::async_trait;
use sqlx::AnyPool;

use crate::data_source::DataSource;
use crate::error::MetadataError;

mod postgres;

pub use postgres::Postgres;

/// A database dialect the engine can introspect through.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Opens a connection pool to the data source.
    async fn connect(&self, data_source: &DataSource) -> Result<AnyPool, MetadataError>;

    /// Table names of a whole schema.
    ///
    /// Binds: schema. Columns: schema, table name, table comment.
    /// Ordered by table name.
    fn all_table_names_sql(&self) -> String;

    /// Table names of a schema, filtered by a name substring.
    ///
    /// Binds: schema, name fragment. Columns and order as
    /// [`Provider::all_table_names_sql`].
    fn table_names_sql(&self) -> String;

    /// One table with its columns, one row per column.
    ///
    /// Binds: schema, table name. Columns: schema, table name, table
    /// comment, column name, column comment, data type, length, precision,
    /// scale, nullable (`'YES'`/`'NO'`), default value, primary-key
    /// position. Ordered by column ordinal position.
    fn table_sql(&self) -> String;

    /// Every table of a schema with its columns.
    ///
    /// Binds: schema. Columns as [`Provider::table_sql`]. Ordered by table
    /// name, then column ordinal position.
    fn all_tables_sql(&self) -> String;

    /// Indices of one table, one row per indexed column.
    ///
    /// Binds: schema, table name. Columns: schema, table name, index name,
    /// unique (`'YES'`/`'NO'`), column name. Ordered by index name, then
    /// column position.
    fn indices_sql(&self) -> String;

    /// Indices of a whole schema.
    ///
    /// Binds: schema. Columns as [`Provider::indices_sql`]. Ordered by table
    /// name, index name, column position.
    fn all_indices_sql(&self) -> String;

    /// Foreign keys declared by one table, one row per column pair.
    ///
    /// Binds: schema, table name. Columns: key name, schema, table name,
    /// column name, referenced schema, referenced table name, referenced
    /// column name. Ordered by key name, then column position.
    fn foreign_keys_sql(&self) -> String;

    /// Foreign keys declared anywhere in a schema.
    ///
    /// Binds: schema. Columns as [`Provider::foreign_keys_sql`]. Ordered by
    /// declaring table name, key name, column position.
    fn all_foreign_keys_sql(&self) -> String;

    /// Foreign keys pointing at one table; same row shape as
    /// [`Provider::foreign_keys_sql`] with the filter on the referenced
    /// side.
    ///
    /// Binds: schema, referenced table name. Ordered by key name, then
    /// column position.
    fn referenced_keys_sql(&self) -> String;

    /// Foreign keys pointing at any table of a schema.
    ///
    /// Binds: schema. Ordered by referenced table name, key name, column
    /// position.
    fn all_referenced_keys_sql(&self) -> String;

    /// Check, unique, and exclusion constraints of one table.
    ///
    /// Binds: schema, table name. Columns: schema, table name, constraint
    /// name, kind (`'CHECK'`/`'UNIQUE'`/`'EXCLUDE'`), content. Ordered by
    /// table name, kind, constraint name.
    fn constraints_sql(&self) -> String;

    /// Constraints of a whole schema.
    ///
    /// Binds: schema. Columns and order as [`Provider::constraints_sql`].
    fn all_constraints_sql(&self) -> String;
}

/// Resolves the data source's driver name to a provider.
pub fn provider_for(data_source: &DataSource) -> Result<Box<dyn Provider>, MetadataError> {
    match data_source.driver.as_str() {
        "postgres" => Ok(Box::new(Postgres::new(data_source.version.clone()))),
        other => Err(MetadataError::UnknownDriver(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_driver_is_a_typed_error() {
        let ds = DataSource {
            driver: "foobar".into(),
            ..DataSource::default()
        };
        match provider_for(&ds).err() {
            Some(MetadataError::UnknownDriver(name)) => assert_eq!(name, "foobar"),
            other => panic!("expected UnknownDriver, got {other:?}"),
        }
    }

    #[test]
    fn postgres_is_registered() {
        let ds = DataSource {
            driver: "postgres".into(),
            ..DataSource::default()
        };
        assert!(provider_for(&ds).is_ok());
    }
}
