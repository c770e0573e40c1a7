use serde::{Deserialize, Serialize};

/// An index on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub schema: String,
    pub table_name: String,
    pub name: String,
    pub unique: bool,
    /// Column names in index ordinal order.
    pub columns: Vec<String>,
}

impl Index {
    pub fn new(
        schema: impl Into<String>,
        table_name: impl Into<String>,
        name: impl Into<String>,
        unique: bool,
    ) -> Self {
        Self {
            schema: schema.into(),
            table_name: table_name.into(),
            name: name.into(),
            unique,
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, name: impl Into<String>) {
        self.columns.push(name.into());
    }
}
