//! Reference `TableSet` backends.
//!
//! NOTE: real format backends (spreadsheets, delimited text, databases) live
//! outside this crate. These two exist to exercise the contract end to end.

pub mod memory;
pub mod text;

pub use memory::MemoryTableSet;
pub use text::TextTableSet;
