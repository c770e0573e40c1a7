//! Column size metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length, precision, and scale of a column's data type.
///
/// Character types carry a length, numeric types a precision and scale,
/// date/time types a precision alone. Types without any size dimension
/// (e.g. `boolean`) report a size with all three absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i64>,
}

impl Size {
    pub fn new(length: Option<i64>, precision: Option<i64>, scale: Option<i64>) -> Self {
        Self {
            length,
            precision,
            scale,
        }
    }

    /// True when at least one of length, precision, or scale is present.
    pub fn is_valid(&self) -> bool {
        self.length.is_some() || self.precision.is_some() || self.scale.is_some()
    }
}

impl fmt::Display for Size {
    /// Renders the length when present, `"precision, scale"` when a scale is
    /// present, the bare precision otherwise, and nothing for an invalid
    /// size.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(length) = self.length {
            write!(f, "{length}")
        } else if let Some(scale) = self.scale {
            write!(f, "{}, {}", self.precision.unwrap_or_default(), scale)
        } else if let Some(precision) = self.precision {
            write!(f, "{precision}")
        } else {
            Ok(())
        }
    }
}
