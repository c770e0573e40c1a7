use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a table constraint, as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConstraintKind {
    Check,
    Unique,
    Exclude,
}

impl ConstraintKind {
    /// Parses the catalog's textual kind column.
    pub fn from_catalog(kind: &str) -> Option<Self> {
        match kind {
            "CHECK" => Some(Self::Check),
            "UNIQUE" => Some(Self::Unique),
            "EXCLUDE" => Some(Self::Exclude),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Check => "CHECK",
            Self::Unique => "UNIQUE",
            Self::Exclude => "EXCLUDE",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A check, unique, or exclusion constraint on a table.
///
/// `content` depends on the kind: the check expression, the comma-joined
/// column list of a unique constraint, or the `"column WITH operator"` list
/// of an exclusion constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub schema: String,
    pub table_name: String,
    pub name: String,
    pub kind: ConstraintKind,
    pub content: String,
}

impl Constraint {
    pub fn new(
        schema: impl Into<String>,
        table_name: impl Into<String>,
        name: impl Into<String>,
        kind: ConstraintKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            table_name: table_name.into(),
            name: name.into(),
            kind,
            content: content.into(),
        }
    }
}
