//! Assembly of flat catalog rows into the nested table model.
//!
//! Every multi-row entity (a table's columns, an index's columns, a foreign
//! key's column pairs) arrives sorted so that the rows of one entity are
//! contiguous. Assembly is therefore a streaming run-length grouping: a new
//! entity starts whenever the boundary key changes between consecutive rows.
//! The ordering is part of the provider's query contract and is not
//! re-checked here.

use std::collections::HashMap;

use crate::error::MetadataError;
use crate::model::{
    Column, ColumnRef, ColumnReference, Constraint, ForeignKey, Index, Size, Table,
};
use crate::rows::{ConstraintRow, IndexRow, KeyRow, NameRow, TableRow};

/// Groups sorted rows into entities.
///
/// `key` extracts the sort key the provider guarantees; `start` opens a new
/// entity at each key boundary and `push` folds a row into the current one.
pub(crate) fn group_sorted<R, T>(
    rows: Vec<R>,
    key: impl Fn(&R) -> &str,
    start: impl Fn(&R) -> T,
    mut push: impl FnMut(&mut T, R),
) -> Vec<T> {
    let mut grouped = Vec::new();
    let mut current: Option<(String, T)> = None;
    for row in rows {
        let boundary = match &current {
            Some((name, _)) => name.as_str() != key(&row),
            None => true,
        };
        if boundary {
            if let Some((_, done)) = current.take() {
                grouped.push(done);
            }
            current = Some((key(&row).to_string(), start(&row)));
        }
        if let Some((_, entity)) = current.as_mut() {
            push(entity, row);
        }
    }
    if let Some((_, done)) = current {
        grouped.push(done);
    }
    grouped
}

/// Column-less table stubs from the table-name queries.
pub(crate) fn table_stubs(rows: Vec<NameRow>) -> Vec<Table> {
    rows.into_iter()
        .map(|row| Table::new(row.schema, row.table_name, row.table_comment))
        .collect()
}

pub(crate) fn collect_tables(rows: Vec<TableRow>) -> Vec<Table> {
    group_sorted(
        rows,
        |row| &row.table_name,
        |row| {
            Table::new(
                row.schema.clone(),
                row.table_name.clone(),
                row.table_comment.clone(),
            )
        },
        |table, row| {
            table.add_column(Column::new(
                row.column_name,
                row.column_comment,
                row.data_type,
                Size::new(row.length, row.precision, row.scale),
                row.nullable,
                row.default_value,
                row.primary_key_position,
            ));
        },
    )
}

pub(crate) fn collect_indices(rows: Vec<IndexRow>) -> Vec<Index> {
    group_sorted(
        rows,
        |row| &row.index_name,
        |row| {
            Index::new(
                row.schema.clone(),
                row.table_name.clone(),
                row.index_name.clone(),
                row.unique,
            )
        },
        |index, row| index.add_column(row.column_name),
    )
}

pub(crate) fn collect_keys(rows: Vec<KeyRow>) -> Vec<ForeignKey> {
    group_sorted(
        rows,
        |row| &row.key_name,
        |row| {
            ForeignKey::new(
                row.schema.clone(),
                row.table_name.clone(),
                row.key_name.clone(),
            )
        },
        |key, row| {
            key.add_reference(ColumnReference::new(
                ColumnRef::new(row.schema, row.table_name, row.column_name),
                ColumnRef::new(row.to_schema, row.to_table_name, row.to_column_name),
            ));
        },
    )
}

pub(crate) fn collect_constraints(rows: Vec<ConstraintRow>) -> Vec<Constraint> {
    rows.into_iter()
        .map(|row| {
            Constraint::new(
                row.schema,
                row.table_name,
                row.constraint_name,
                row.kind,
                row.content,
            )
        })
        .collect()
}

/// Attaches foreign keys loaded for a single table, resolving every
/// referencing column against the table's loaded columns first. A key that
/// names a column the table does not have aborts the load.
pub(crate) fn attach_foreign_keys(
    table: &mut Table,
    keys: Vec<ForeignKey>,
) -> Result<(), MetadataError> {
    for key in keys {
        for reference in &key.references {
            if table.find_column(&reference.from.column).is_none() {
                return Err(MetadataError::ColumnNotFound {
                    table: table.name.clone(),
                    column: reference.from.column.clone(),
                });
            }
        }
        table.add_foreign_key(key);
    }
    Ok(())
}

/// Table-name → slot lookup for distributing schema-wide results.
pub(crate) fn slot_by_name(tables: &[Table]) -> HashMap<String, usize> {
    tables
        .iter()
        .enumerate()
        .map(|(slot, table)| (table.name.clone(), slot))
        .collect()
}

pub(crate) fn distribute_indices(
    tables: &mut [Table],
    slots: &HashMap<String, usize>,
    indices: Vec<Index>,
) {
    for index in indices {
        if let Some(&slot) = slots.get(&index.table_name) {
            tables[slot].add_index(index);
        }
    }
}

pub(crate) fn distribute_foreign_keys(
    tables: &mut [Table],
    slots: &HashMap<String, usize>,
    keys: Vec<ForeignKey>,
) {
    for key in keys {
        if let Some(&slot) = slots.get(&key.table_name) {
            tables[slot].add_foreign_key(key);
        }
    }
}

/// Distributes referenced keys onto the tables they point at. The owning
/// table is taken from the first reference's target; a composite key is
/// assumed to never straddle two target tables. Keys naming a table outside
/// the lookup are dropped.
pub(crate) fn distribute_referenced_keys(
    tables: &mut [Table],
    slots: &HashMap<String, usize>,
    keys: Vec<ForeignKey>,
) {
    for key in keys {
        let target = match key.references.first() {
            Some(reference) => reference.to.table.clone(),
            None => continue,
        };
        if let Some(&slot) = slots.get(&target) {
            tables[slot].add_referenced_key(key);
        }
    }
}

pub(crate) fn distribute_constraints(
    tables: &mut [Table],
    slots: &HashMap<String, usize>,
    constraints: Vec<Constraint>,
) {
    for constraint in constraints {
        if let Some(&slot) = slots.get(&constraint.table_name) {
            tables[slot].add_constraint(constraint);
        }
    }
}
