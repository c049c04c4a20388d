#![forbid(unsafe_code)]
//! messy-rows: the consumer-facing row model.
//!
//! Design intent:
//! - A `RowSet` is read once. Its first `window` raw rows are kept so the
//!   `sample` view can be replayed as often as header/type heuristics need.
//! - Transformations are `RowProcessor`s applied in registration order; any
//!   processor may veto a row.
//! - A `TableSet` owns the byte stream and exposes named row sets. Format
//!   backends implement it; `readers` ships two reference backends.

pub mod dict;
pub mod error;
pub mod processor;
pub mod readers;
pub mod rowset;
pub mod tableset;

pub use dict::RowDict;
pub use error::{Error, Result};
pub use processor::{
    ApplyHeaders, CoerceTypes, FilterRows, MapRows, Pass, PerPass, ProcessorContext, RowProcessor,
    SkipRows,
};
pub use readers::{MemoryTableSet, TextTableSet};
pub use rowset::{RawRows, RowSet, Rows};
pub use tableset::TableSet;
