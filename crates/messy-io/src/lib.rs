#![forbid(unsafe_code)]
//! messy-io: byte-level plumbing between a raw stream and a format backend.
//!
//! - `source`: the forward-only `ByteSource` interface and its `Read` adapters.
//! - `buf`: `ReplayBuffer`, bounded rewind over a forward-only source.
//! - `lines`: universal-newline splitting of arbitrarily chunked bytes.
//!
//! Everything here is synchronous and pull-based; nothing reads ahead of
//! what the caller asked for.

pub mod buf;
pub mod error;
pub mod lines;
pub mod source;

pub use buf::{ReplayBuffer, ReplayChunks};
pub use error::{Error, Result};
pub use lines::{normalize_lines, LineSplitter, Lines, RawLines, TryRawLines};
pub use source::{ByteSource, LineReaderSource, ReaderSource};
