use serde::{Deserialize, Serialize};

/// A qualified pointer to a column of some table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub schema: String,
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(
        schema: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            column: column.into(),
        }
    }
}

/// One from→to column pair of a foreign key. `from` is the referencing
/// column, `to` the referenced one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    pub from: ColumnRef,
    pub to: ColumnRef,
}

impl ColumnReference {
    pub fn new(from: ColumnRef, to: ColumnRef) -> Self {
        Self { from, to }
    }
}

/// A named foreign-key constraint. A composite key spans several ordered
/// column references under the one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// Schema of the declaring table.
    pub schema: String,
    /// Name of the declaring table.
    pub table_name: String,
    pub name: String,
    pub references: Vec<ColumnReference>,
}

impl ForeignKey {
    pub fn new(
        schema: impl Into<String>,
        table_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            table_name: table_name.into(),
            name: name.into(),
            references: Vec::new(),
        }
    }

    pub fn add_reference(&mut self, reference: ColumnReference) {
        self.references.push(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_keep_insertion_order() {
        let mut key = ForeignKey::new("sales", "order_lines", "fk_order_lines_orders");
        key.add_reference(ColumnReference::new(
            ColumnRef::new("sales", "order_lines", "order_id"),
            ColumnRef::new("sales", "orders", "id"),
        ));
        key.add_reference(ColumnReference::new(
            ColumnRef::new("sales", "order_lines", "order_revision"),
            ColumnRef::new("sales", "orders", "revision"),
        ));
        assert_eq!(key.references.len(), 2);
        assert_eq!(key.references[0].from.column, "order_id");
        assert_eq!(key.references[1].to.column, "revision");
    }
}
