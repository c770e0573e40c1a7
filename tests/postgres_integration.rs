//! Live PostgreSQL integration tests.
//!
//! Ignored by default because they need a running server. The connection is
//! taken from the standard `PG*` environment variables (host, port, user,
//! password, database), defaulting to `localhost` / `postgres` / a
//! `schemascope_test` database that must already exist. Each test rebuilds
//! the fixture schemas, so run them single-threaded:
//!
//! ```bash
//! createdb schemascope_test
//! cargo test --test postgres_integration -- --ignored --test-threads=1
//! ```

use schemascope::{Client, ConstraintKind, DataSource, LoadOptions, MetadataError};

const FIXTURE: &str = include_str!("fixtures/sales_schema.sql");

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn test_data_source() -> DataSource {
    let mut ds = DataSource {
        driver: "postgres".into(),
        version: Some("16".into()),
        host: env_or("PGHOST", "localhost"),
        port: std::env::var("PGPORT").ok().and_then(|p| p.parse().ok()),
        user: env_or("PGUSER", "postgres"),
        password: env_or("PGPASSWORD", ""),
        database: env_or("PGDATABASE", "schemascope_test"),
        ..DataSource::default()
    };
    ds.options.insert("sslmode".into(), "disable".into());
    ds
}

fn fixture_url(ds: &DataSource) -> String {
    let mut url = format!("postgres://{}", ds.user);
    if !ds.password.is_empty() {
        url.push(':');
        url.push_str(&ds.password);
    }
    url.push('@');
    url.push_str(&ds.host);
    if let Some(port) = ds.port {
        url.push_str(&format!(":{port}"));
    }
    url.push('/');
    url.push_str(&ds.database);
    url.push_str("?sslmode=disable");
    url
}

/// Rebuilds the fixture schemas and returns a connected client.
async fn connected_client() -> Client {
    let ds = test_data_source();

    sqlx::any::install_default_drivers();
    let pool = sqlx::AnyPool::connect(&fixture_url(&ds))
        .await
        .expect("connect for fixture setup");
    sqlx::raw_sql(FIXTURE)
        .execute(&pool)
        .await
        .expect("apply fixture");
    pool.close().await;

    let mut client = Client::new(ds).expect("postgres driver is registered");
    client.connect().await.expect("connect");
    client
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn all_table_names_returns_sales_tables_in_order() {
    let client = connected_client().await;

    let tables = client.all_table_names("sales").await.unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].name, "country_region_currency");
    assert_eq!(tables[0].comment, "");
    assert_eq!(tables[1].name, "currency");
    assert_eq!(
        tables[1].comment,
        "Lookup table containing standard ISO currencies."
    );
    // Stubs only: no columns were loaded.
    assert!(tables[0].columns.is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn table_names_filters_by_substring() {
    let client = connected_client().await;

    let tables = client.table_names("sales", "region").await.unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "country_region_currency");

    let none = client.table_names("sales", "sample").await.unwrap();
    assert!(none.is_empty());

    let all = client.table_names("sales", "").await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn table_loads_columns_in_ordinal_order() {
    let client = connected_client().await;

    let table = client
        .table("sales", "currency", LoadOptions::none())
        .await
        .unwrap();
    assert_eq!(table.schema, "sales");
    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["currency_code", "name", "modified_date"]);

    let code = table.find_column("currency_code").unwrap();
    assert_eq!(code.primary_key_position, 1);
    assert!(!code.nullable);
    assert_eq!(code.size.length, Some(3));

    let name = table.find_column("name").unwrap();
    assert_eq!(name.comment, "Currency name.");
    assert_eq!(name.size.length, Some(50));
    assert_eq!(name.primary_key_position, 0);

    let modified = table.find_column("modified_date").unwrap();
    assert!(modified.default_value.contains("now"));

    // Nothing extra was requested.
    assert!(table.indices.is_empty());
    assert!(table.foreign_keys.is_empty());
    assert!(table.referenced_keys.is_empty());
    assert!(table.constraints.is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn table_loads_requested_relations() {
    let client = connected_client().await;

    let table = client
        .table("sales", "currency", LoadOptions::all())
        .await
        .unwrap();

    let pk = table.find_index("pk_currency").unwrap();
    assert!(pk.unique);
    assert_eq!(pk.columns, vec!["currency_code"]);

    let check = table
        .constraints
        .iter()
        .find(|c| c.name == "ck_currency_code")
        .unwrap();
    assert_eq!(check.kind, ConstraintKind::Check);
    assert!(check.content.contains("currency_code"));

    let unique = table
        .constraints
        .iter()
        .find(|c| c.name == "uq_currency_name")
        .unwrap();
    assert_eq!(unique.kind, ConstraintKind::Unique);
    assert_eq!(unique.content, "name");

    // currency declares no keys of its own but is pointed at by
    // country_region_currency.
    assert!(table.foreign_keys.is_empty());
    let referenced = table.find_referenced_key("fk_crc_currency").unwrap();
    assert_eq!(referenced.table_name, "country_region_currency");
    assert_eq!(referenced.references.len(), 1);
    assert_eq!(referenced.references[0].from.column, "currency_code");
    assert_eq!(referenced.references[0].to.table, "currency");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn composite_keys_keep_their_column_pairs_in_order() {
    let client = connected_client().await;

    let preference = client
        .table("person", "currency_preference", LoadOptions::all())
        .await
        .unwrap();
    assert_eq!(preference.foreign_keys.len(), 1);
    let key = &preference.foreign_keys[0];
    assert_eq!(key.name, "fk_preference_crc");
    assert_eq!(key.references.len(), 2);
    assert_eq!(key.references[0].from.column, "country_region_code");
    assert_eq!(key.references[0].to.column, "country_region_code");
    assert_eq!(key.references[1].from.column, "currency_code");
    assert_eq!(key.references[1].to.column, "currency_code");

    let target = client
        .table("sales", "country_region_currency", LoadOptions::all())
        .await
        .unwrap();
    let mirrored = target.find_referenced_key("fk_preference_crc").unwrap();
    assert_eq!(mirrored.references.len(), 2);
    assert_eq!(mirrored.references[0].to.table, "country_region_currency");
    assert_eq!(mirrored.references[0].from.column, "country_region_code");
    assert_eq!(mirrored.references[1].from.column, "currency_code");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn scoped_and_bulk_loads_agree() {
    let client = connected_client().await;

    for schema in ["sales", "person"] {
        let bulk = client.all_tables(schema, LoadOptions::all()).await.unwrap();
        assert!(!bulk.is_empty());
        for bulk_table in &bulk {
            let scoped = client
                .table(schema, &bulk_table.name, LoadOptions::all())
                .await
                .unwrap();
            assert_eq!(&scoped, bulk_table, "mismatch for {schema}.{}", bulk_table.name);
        }
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn missing_table_reports_its_name() {
    let client = connected_client().await;

    match client
        .table("sales", "nonexistent", LoadOptions::none())
        .await
    {
        Err(MetadataError::TableNotFound(name)) => assert_eq!(name, "nonexistent"),
        other => panic!("expected TableNotFound, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server"]
async fn empty_table_name_is_rejected() {
    let client = connected_client().await;

    assert!(matches!(
        client.table("sales", "", LoadOptions::none()).await,
        Err(MetadataError::TableNameRequired)
    ));
}
