//! The metadata engine: runs catalog queries and assembles the table model.

use sqlx::any::AnyRow;
use sqlx::AnyPool;
use tracing::debug;

use crate::assemble;
use crate::data_source::DataSource;
use crate::error::MetadataError;
use crate::model::Table;
use crate::provider::{provider_for, Provider};
use crate::rows::{ConstraintRow, IndexRow, KeyRow, NameRow, TableRow};

/// Which relations to load alongside a table's columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub indices: bool,
    pub foreign_keys: bool,
    pub referenced_keys: bool,
    pub constraints: bool,
}

impl LoadOptions {
    /// Loads every relation.
    pub fn all() -> Self {
        Self {
            indices: true,
            foreign_keys: true,
            referenced_keys: true,
            constraints: true,
        }
    }

    /// Loads columns only.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Schema metadata reading client.
///
/// One client holds one connection and runs its queries sequentially; for
/// concurrent use, create one client per task. Reads are point-in-time:
/// every call re-queries the catalog and returns a freshly built model.
pub struct Client {
    data_source: DataSource,
    provider: Box<dyn Provider>,
    pool: Option<AnyPool>,
}

impl Client {
    /// Creates a client for the data source's declared driver.
    ///
    /// Fails with [`MetadataError::UnknownDriver`] when no provider is
    /// registered for `data_source.driver`.
    pub fn new(data_source: DataSource) -> Result<Self, MetadataError> {
        let provider = provider_for(&data_source)?;
        Ok(Self {
            data_source,
            provider,
            pool: None,
        })
    }

    /// Creates a client backed by a custom provider, bypassing the driver
    /// registry.
    pub fn with_provider(data_source: DataSource, provider: Box<dyn Provider>) -> Self {
        Self {
            data_source,
            provider,
            pool: None,
        }
    }

    /// Opens the connection. Does nothing when already connected.
    pub async fn connect(&mut self) -> Result<(), MetadataError> {
        if self.pool.is_none() {
            self.pool = Some(self.provider.connect(&self.data_source).await?);
        }
        Ok(())
    }

    /// Closes the connection. Safe to call when never connected, and safe to
    /// call repeatedly.
    pub async fn disconnect(&mut self) -> Result<(), MetadataError> {
        if let Some(pool) = self.pool.take() {
            debug!("closing connection pool");
            pool.close().await;
        }
        Ok(())
    }

    /// Every table of `schema` as column-less stubs, ordered by name.
    pub async fn all_table_names(&self, schema: &str) -> Result<Vec<Table>, MetadataError> {
        let pool = self.checked_pool(schema)?;
        debug!(schema, "loading table names");
        let sql = self.provider.all_table_names_sql();
        let rows = sqlx::query(&sql).bind(schema).fetch_all(pool).await?;
        Ok(assemble::table_stubs(decode(&rows, NameRow::decode)?))
    }

    /// Tables of `schema` whose name contains `pattern`, ordered by name.
    /// An empty pattern matches every table.
    pub async fn table_names(
        &self,
        schema: &str,
        pattern: &str,
    ) -> Result<Vec<Table>, MetadataError> {
        let pool = self.checked_pool(schema)?;
        debug!(schema, pattern, "loading table names");
        let sql = self.provider.table_names_sql();
        let rows = sqlx::query(&sql)
            .bind(schema)
            .bind(pattern)
            .fetch_all(pool)
            .await?;
        Ok(assemble::table_stubs(decode(&rows, NameRow::decode)?))
    }

    /// One table with its columns and the relations enabled in `options`.
    ///
    /// Fails with [`MetadataError::TableNotFound`] when the table does not
    /// exist. The optional loads run one after another; the first failure
    /// aborts the call.
    pub async fn table(
        &self,
        schema: &str,
        name: &str,
        options: LoadOptions,
    ) -> Result<Table, MetadataError> {
        let pool = self.checked_pool(schema)?;
        if name.is_empty() {
            return Err(MetadataError::TableNameRequired);
        }
        debug!(schema, table = name, "loading table");
        let sql = self.provider.table_sql();
        let rows = sqlx::query(&sql)
            .bind(schema)
            .bind(name)
            .fetch_all(pool)
            .await?;
        let mut tables = assemble::collect_tables(decode(&rows, TableRow::decode)?);
        if tables.is_empty() {
            return Err(MetadataError::TableNotFound(name.to_string()));
        }
        let mut table = tables.remove(0);

        if options.indices {
            let rows = fetch_scoped(pool, self.provider.indices_sql(), schema, name).await?;
            for index in assemble::collect_indices(decode(&rows, IndexRow::decode)?) {
                table.add_index(index);
            }
        }
        if options.foreign_keys {
            let rows =
                fetch_scoped(pool, self.provider.foreign_keys_sql(), schema, name).await?;
            let keys = assemble::collect_keys(decode(&rows, KeyRow::decode)?);
            assemble::attach_foreign_keys(&mut table, keys)?;
        }
        if options.referenced_keys {
            let rows =
                fetch_scoped(pool, self.provider.referenced_keys_sql(), schema, name).await?;
            for key in assemble::collect_keys(decode(&rows, KeyRow::decode)?) {
                table.add_referenced_key(key);
            }
        }
        if options.constraints {
            let rows =
                fetch_scoped(pool, self.provider.constraints_sql(), schema, name).await?;
            for constraint in assemble::collect_constraints(decode(&rows, ConstraintRow::decode)?) {
                table.add_constraint(constraint);
            }
        }
        Ok(table)
    }

    /// Every table of `schema` with columns and the relations enabled in
    /// `options`.
    ///
    /// Each enabled relation is fetched with a single schema-wide query and
    /// distributed across the tables by name, so a full load costs a
    /// constant number of queries regardless of how many tables the schema
    /// holds.
    pub async fn all_tables(
        &self,
        schema: &str,
        options: LoadOptions,
    ) -> Result<Vec<Table>, MetadataError> {
        let pool = self.checked_pool(schema)?;
        debug!(schema, "loading all tables");
        let sql = self.provider.all_tables_sql();
        let rows = sqlx::query(&sql).bind(schema).fetch_all(pool).await?;
        let mut tables = assemble::collect_tables(decode(&rows, TableRow::decode)?);
        let slots = assemble::slot_by_name(&tables);

        if options.indices {
            let rows = fetch_schema_wide(pool, self.provider.all_indices_sql(), schema).await?;
            let indices = assemble::collect_indices(decode(&rows, IndexRow::decode)?);
            assemble::distribute_indices(&mut tables, &slots, indices);
        }
        if options.foreign_keys {
            let rows =
                fetch_schema_wide(pool, self.provider.all_foreign_keys_sql(), schema).await?;
            let keys = assemble::collect_keys(decode(&rows, KeyRow::decode)?);
            assemble::distribute_foreign_keys(&mut tables, &slots, keys);
        }
        if options.referenced_keys {
            let rows =
                fetch_schema_wide(pool, self.provider.all_referenced_keys_sql(), schema).await?;
            let keys = assemble::collect_keys(decode(&rows, KeyRow::decode)?);
            assemble::distribute_referenced_keys(&mut tables, &slots, keys);
        }
        if options.constraints {
            let rows =
                fetch_schema_wide(pool, self.provider.all_constraints_sql(), schema).await?;
            let constraints = assemble::collect_constraints(decode(&rows, ConstraintRow::decode)?);
            assemble::distribute_constraints(&mut tables, &slots, constraints);
        }
        Ok(tables)
    }

    /// Precondition checks shared by every read: a schema name and an open
    /// connection, in that order, before any query is issued.
    fn checked_pool(&self, schema: &str) -> Result<&AnyPool, MetadataError> {
        if schema.is_empty() {
            return Err(MetadataError::SchemaRequired);
        }
        self.pool.as_ref().ok_or(MetadataError::NotConnected)
    }
}

/// Connects, reads every table of `schema` with the requested relations, and
/// disconnects. One-shot convenience over [`Client`].
pub async fn read_schema(
    data_source: DataSource,
    schema: &str,
    options: LoadOptions,
) -> Result<Vec<Table>, MetadataError> {
    let mut client = Client::new(data_source)?;
    client.connect().await?;
    let tables = client.all_tables(schema, options).await;
    client.disconnect().await?;
    tables
}

async fn fetch_scoped(
    pool: &AnyPool,
    sql: String,
    schema: &str,
    name: &str,
) -> Result<Vec<AnyRow>, MetadataError> {
    Ok(sqlx::query(&sql)
        .bind(schema)
        .bind(name)
        .fetch_all(pool)
        .await?)
}

async fn fetch_schema_wide(
    pool: &AnyPool,
    sql: String,
    schema: &str,
) -> Result<Vec<AnyRow>, MetadataError> {
    Ok(sqlx::query(&sql).bind(schema).fetch_all(pool).await?)
}

fn decode<R>(
    rows: &[AnyRow],
    decode_one: impl Fn(&AnyRow) -> Result<R, MetadataError>,
) -> Result<Vec<R>, MetadataError> {
    rows.iter().map(decode_one).collect()
}
