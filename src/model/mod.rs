//! The table model reconstructed from catalog queries.

mod column;
mod constraint;
mod index;
mod key;
mod size;
mod table;

pub use column::Column;
pub use constraint::{Constraint, ConstraintKind};
pub use index::Index;
pub use key::{ColumnRef, ColumnReference, ForeignKey};
pub use size::Size;
pub use table::Table;
