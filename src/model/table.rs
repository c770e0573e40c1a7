use serde::{Deserialize, Serialize};

use super::{Column, Constraint, ForeignKey, Index};

/// A table and everything the reader knows about it.
///
/// Children added through the `add_*` methods are taken by value and stamped
/// with this table's schema and name, so no caller-held alias of an attached
/// child exists. The one exception is [`Table::add_referenced_key`]: a
/// referenced key is declared by — and stays stamped with — its source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub schema: String,
    pub name: String,
    pub comment: String,
    /// Columns in catalog ordinal order.
    pub columns: Vec<Column>,
    pub indices: Vec<Index>,
    /// Foreign keys this table declares.
    pub foreign_keys: Vec<ForeignKey>,
    /// Foreign keys declared on other tables that point at this one.
    pub referenced_keys: Vec<ForeignKey>,
    pub constraints: Vec<Constraint>,
}

impl Table {
    pub fn new(
        schema: impl Into<String>,
        name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            comment: comment.into(),
            columns: Vec::new(),
            indices: Vec::new(),
            foreign_keys: Vec::new(),
            referenced_keys: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn add_column(&mut self, mut column: Column) {
        column.schema = self.schema.clone();
        column.table_name = self.name.clone();
        self.columns.push(column);
    }

    pub fn add_index(&mut self, mut index: Index) {
        index.schema = self.schema.clone();
        index.table_name = self.name.clone();
        self.indices.push(index);
    }

    pub fn add_foreign_key(&mut self, mut key: ForeignKey) {
        key.schema = self.schema.clone();
        key.table_name = self.name.clone();
        self.foreign_keys.push(key);
    }

    /// Appends without stamping: the key belongs to the table that declares
    /// it, not to this one.
    pub fn add_referenced_key(&mut self, key: ForeignKey) {
        self.referenced_keys.push(key);
    }

    pub fn add_constraint(&mut self, mut constraint: Constraint) {
        constraint.schema = self.schema.clone();
        constraint.table_name = self.name.clone();
        self.constraints.push(constraint);
    }

    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn find_index(&self, name: &str) -> Option<&Index> {
        self.indices.iter().find(|i| i.name == name)
    }

    pub fn find_foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|k| k.name == name)
    }

    pub fn find_referenced_key(&self, name: &str) -> Option<&ForeignKey> {
        self.referenced_keys.iter().find(|k| k.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Size;

    fn users_table() -> Table {
        Table::new("app", "users", "")
    }

    #[test]
    fn add_column_stamps_ownership() {
        let mut table = users_table();
        table.add_column(Column::new("id", "", "integer", Size::default(), false, "", 1));
        let column = &table.columns[0];
        assert_eq!(column.schema, "app");
        assert_eq!(column.table_name, "users");
    }

    #[test]
    fn columns_keep_insertion_order() {
        let mut table = users_table();
        for name in ["id", "email", "created_at"] {
            table.add_column(Column::new(name, "", "text", Size::default(), true, "", 0));
        }
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "email", "created_at"]);
    }

    #[test]
    fn finders_return_none_for_unknown_names() {
        let mut table = users_table();
        table.add_column(Column::new("id", "", "integer", Size::default(), false, "", 1));
        assert!(table.find_column("id").is_some());
        assert!(table.find_column("missing").is_none());
        assert!(table.find_index("missing").is_none());
        assert!(table.find_foreign_key("missing").is_none());
        assert!(table.find_referenced_key("missing").is_none());
    }

    #[test]
    fn add_index_stamps_ownership() {
        let mut table = users_table();
        table.add_index(Index::new("", "", "ix_users_email", true));
        assert_eq!(table.indices[0].schema, "app");
        assert_eq!(table.indices[0].table_name, "users");
    }

    #[test]
    fn referenced_keys_keep_their_source_identity() {
        let mut table = users_table();
        let key = ForeignKey::new("billing", "invoices", "fk_invoices_users");
        table.add_referenced_key(key);
        let kept = table.find_referenced_key("fk_invoices_users").unwrap();
        assert_eq!(kept.schema, "billing");
        assert_eq!(kept.table_name, "invoices");
    }
}
