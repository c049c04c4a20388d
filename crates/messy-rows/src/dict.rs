//! Ordered `column -> value` view of a row.

use serde::ser::{Serialize, SerializeMap, Serializer};

use messy_core::cell::Row;
use messy_core::types::Scalar;

/// An insertion-ordered mapping from column name to cell value.
///
/// Column names are not deduplicated: inserting an existing key keeps its
/// original position and replaces the value, so the last cell wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowDict {
    entries: Vec<(Option<String>, Option<Scalar>)>,
}

impl RowDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_row(row: Row) -> Self {
        let mut dict = Self {
            entries: Vec::with_capacity(row.len()),
        };
        for cell in row {
            dict.insert(cell.column, cell.value);
        }
        dict
    }

    pub fn insert(&mut self, column: Option<String>, value: Option<Scalar>) {
        match self.entries.iter_mut().find(|(k, _)| *k == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Value under `column`; `None` when the column is missing or the cell
    /// had no value.
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_deref() == Some(column))
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_deref() == Some(column))
    }

    pub fn columns(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|(k, _)| k.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, Option<&Scalar>)> {
        self.entries.iter().map(|(k, v)| (k.as_deref(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes as a flat map in column order, values in their JSON form.
/// Unnamed columns use the empty key.
impl Serialize for RowDict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, value) in &self.entries {
            map.serialize_entry(
                column.as_deref().unwrap_or(""),
                &value.as_ref().map(Scalar::to_json),
            )?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use messy_core::cell::Cell;

    #[test]
    fn preserves_column_order() {
        let row = vec![
            Cell::new(Scalar::I64(1)).with_column("b"),
            Cell::new(Scalar::I64(2)).with_column("a"),
        ];
        let dict = RowDict::from_row(row);
        assert_eq!(dict.columns().collect::<Vec<_>>(), vec![Some("b"), Some("a")]);
        assert_eq!(dict.get("a"), Some(&Scalar::I64(2)));
        assert_eq!(serde_json::to_string(&dict).unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn last_duplicate_wins_in_first_position() {
        let row = vec![
            Cell::new(Scalar::I64(1)).with_column("x"),
            Cell::new(Scalar::I64(2)).with_column("y"),
            Cell::new(Scalar::I64(3)).with_column("x"),
        ];
        let dict = RowDict::from_row(row);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.columns().collect::<Vec<_>>(), vec![Some("x"), Some("y")]);
        assert_eq!(dict.get("x"), Some(&Scalar::I64(3)));
    }

    #[test]
    fn unnamed_and_empty_cells() {
        let dict = RowDict::from_row(vec![Cell::new(None)]);
        assert_eq!(dict.columns().collect::<Vec<_>>(), vec![None]);
        assert!(!dict.contains_column("x"));
        assert_eq!(dict.iter().next(), Some((None, None)));
    }
}
