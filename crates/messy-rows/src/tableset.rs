//! `TableSet`: the entry point format backends implement.
//!
//! A table set is built from a byte stream it owns exclusively and exposes
//! the tables found in it (sheets of a workbook, tables of a database, or a
//! single table for flat formats) as named `RowSet`s, in discovery order.

use crate::error::{Error, Result};
use crate::rowset::RowSet;

pub trait TableSet {
    /// All tables, in the order the backend discovered them.
    fn tables(&mut self) -> Result<&mut [RowSet]>;

    /// Look a table up by name.
    fn table(&mut self, name: &str) -> Result<&mut RowSet> {
        self.tables()?
            .iter_mut()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    fn table_names(&mut self) -> Result<Vec<String>> {
        Ok(self
            .tables()?
            .iter()
            .map(|t| t.name().to_string())
            .collect())
    }
}
