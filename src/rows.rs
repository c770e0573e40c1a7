//! Flat catalog result rows, decoded positionally from the wire.
//!
//! Decoding follows the provider row contracts: NULL text folds to the
//! empty string, NULL integers to absent, and flag columns compare against
//! `'YES'`. The `any` driver reports catalog integers as 32-bit or 64-bit
//! depending on the backing type, so integer columns try both widths.

use sqlx::any::AnyRow;
use sqlx::Row;

use crate::error::MetadataError;
use crate::model::ConstraintKind;

/// `(schema, table name, table comment)` of the table-name queries.
pub(crate) struct NameRow {
    pub schema: String,
    pub table_name: String,
    pub table_comment: String,
}

impl NameRow {
    pub fn decode(row: &AnyRow) -> Result<Self, MetadataError> {
        Ok(Self {
            schema: text(row, 0)?,
            table_name: text(row, 1)?,
            table_comment: text(row, 2)?,
        })
    }
}

/// One column of one table; table identity repeats on every row.
pub(crate) struct TableRow {
    pub schema: String,
    pub table_name: String,
    pub table_comment: String,
    pub column_name: String,
    pub column_comment: String,
    pub data_type: String,
    pub length: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
    pub nullable: bool,
    pub default_value: String,
    pub primary_key_position: i64,
}

impl TableRow {
    pub fn decode(row: &AnyRow) -> Result<Self, MetadataError> {
        Ok(Self {
            schema: text(row, 0)?,
            table_name: text(row, 1)?,
            table_comment: text(row, 2)?,
            column_name: text(row, 3)?,
            column_comment: text(row, 4)?,
            data_type: text(row, 5)?,
            length: integer(row, 6)?,
            precision: integer(row, 7)?,
            scale: integer(row, 8)?,
            nullable: yes(row, 9)?,
            default_value: text(row, 10)?,
            primary_key_position: integer(row, 11)?.unwrap_or(0),
        })
    }
}

/// One indexed column of one index.
pub(crate) struct IndexRow {
    pub schema: String,
    pub table_name: String,
    pub index_name: String,
    pub unique: bool,
    pub column_name: String,
}

impl IndexRow {
    pub fn decode(row: &AnyRow) -> Result<Self, MetadataError> {
        Ok(Self {
            schema: text(row, 0)?,
            table_name: text(row, 1)?,
            index_name: text(row, 2)?,
            unique: yes(row, 3)?,
            column_name: text(row, 4)?,
        })
    }
}

/// One column pair of one foreign key.
pub(crate) struct KeyRow {
    pub key_name: String,
    pub schema: String,
    pub table_name: String,
    pub column_name: String,
    pub to_schema: String,
    pub to_table_name: String,
    pub to_column_name: String,
}

impl KeyRow {
    pub fn decode(row: &AnyRow) -> Result<Self, MetadataError> {
        Ok(Self {
            key_name: text(row, 0)?,
            schema: text(row, 1)?,
            table_name: text(row, 2)?,
            column_name: text(row, 3)?,
            to_schema: text(row, 4)?,
            to_table_name: text(row, 5)?,
            to_column_name: text(row, 6)?,
        })
    }
}

/// One constraint.
pub(crate) struct ConstraintRow {
    pub schema: String,
    pub table_name: String,
    pub constraint_name: String,
    pub kind: ConstraintKind,
    pub content: String,
}

impl ConstraintRow {
    pub fn decode(row: &AnyRow) -> Result<Self, MetadataError> {
        let kind = text(row, 3)?;
        Ok(Self {
            schema: text(row, 0)?,
            table_name: text(row, 1)?,
            constraint_name: text(row, 2)?,
            kind: ConstraintKind::from_catalog(&kind)
                .ok_or(MetadataError::UnexpectedConstraintKind(kind))?,
            content: text(row, 4)?,
        })
    }
}

fn text(row: &AnyRow, index: usize) -> Result<String, MetadataError> {
    Ok(row.try_get::<Option<String>, _>(index)?.unwrap_or_default())
}

fn integer(row: &AnyRow, index: usize) -> Result<Option<i64>, MetadataError> {
    match row.try_get::<Option<i64>, _>(index) {
        Ok(value) => Ok(value),
        Err(_) => Ok(row.try_get::<Option<i32>, _>(index)?.map(i64::from)),
    }
}

fn yes(row: &AnyRow, index: usize) -> Result<bool, MetadataError> {
    Ok(text(row, index)? == "YES")
}
