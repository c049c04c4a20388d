//! In-memory table set for testing.

use messy_core::cell::Row;
use messy_core::config::IngestConfig;

use crate::error::Result;
use crate::rowset::RowSet;
use crate::tableset::TableSet;

/// Table set over rows that are already in memory.
#[derive(Debug, Default)]
pub struct MemoryTableSet {
    tables: Vec<RowSet>,
    window: Option<usize>,
}

impl MemoryTableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: &IngestConfig) -> Self {
        Self {
            tables: Vec::new(),
            window: Some(cfg.sample_window),
        }
    }

    /// Append a table built from `rows`.
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        let mut set = RowSet::from_rows(name, rows);
        if let Some(window) = self.window {
            set = set.with_window(window);
        }
        self.tables.push(set);
        self
    }

    pub fn push(&mut self, table: RowSet) {
        self.tables.push(table);
    }
}

impl TableSet for MemoryTableSet {
    fn tables(&mut self) -> Result<&mut [RowSet]> {
        Ok(&mut self.tables)
    }
}
