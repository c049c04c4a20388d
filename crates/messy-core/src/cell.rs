//! Cells and rows: the atomic units a format backend emits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::TypeTag;
use crate::types::Scalar;

/// An ordered sequence of cells. Column order is stable within a row set.
pub type Row = Vec<Cell>;

/// A single typed table value.
///
/// A cell always carries a `TypeTag`; `Cell::new` uses `TypeTag::String`,
/// callers that already know the type pass it to `Cell::typed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: Option<Scalar>,
    pub column: Option<String>,
    pub column_autogenerated: bool,
    pub type_tag: TypeTag,
}

impl Cell {
    pub fn new(value: impl Into<Option<Scalar>>) -> Self {
        Self::typed(value, TypeTag::default())
    }

    pub fn typed(value: impl Into<Option<Scalar>>, type_tag: TypeTag) -> Self {
        Self {
            value: value.into(),
            column: None,
            column_autogenerated: false,
            type_tag,
        }
    }

    /// Builder-style column assignment.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// True when there is no value, or its text is only whitespace.
    pub fn is_empty(&self) -> bool {
        match &self.value {
            None => true,
            Some(Scalar::Str(s)) => s.trim().is_empty(),
            Some(v) => v.to_string().trim().is_empty(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self
            .value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "None".to_string());
        match &self.column {
            Some(col) => write!(f, "<Cell({col}={}:{value})>", self.type_tag),
            None => write!(f, "<Cell({}:{value})>", self.type_tag),
        }
    }
}
