use serde::{Deserialize, Serialize};

use super::Size;

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Schema of the owning table; stamped by [`super::Table::add_column`].
    #[serde(default)]
    pub schema: String,
    /// Name of the owning table; stamped by [`super::Table::add_column`].
    #[serde(default)]
    pub table_name: String,
    pub name: String,
    pub comment: String,
    pub data_type: String,
    pub size: Size,
    pub nullable: bool,
    pub default_value: String,
    /// 1-based position within a composite primary key; 0 when the column is
    /// not part of the primary key.
    pub primary_key_position: i64,
}

impl Column {
    /// A column that is not yet attached to a table; ownership fields are
    /// filled in when it is added to one.
    pub fn new(
        name: impl Into<String>,
        comment: impl Into<String>,
        data_type: impl Into<String>,
        size: Size,
        nullable: bool,
        default_value: impl Into<String>,
        primary_key_position: i64,
    ) -> Self {
        Self {
            schema: String::new(),
            table_name: String::new(),
            name: name.into(),
            comment: comment.into(),
            data_type: data_type.into(),
            size,
            nullable,
            default_value: default_value.into(),
            primary_key_position,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key_position > 0
    }
}
