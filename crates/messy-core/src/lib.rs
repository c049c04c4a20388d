#![forbid(unsafe_code)]
//! messy-core: the value model shared by every layer of the ingest stack.
//!
//! - `types`: `Scalar` values and their textual rendering.
//! - `schema`: `TypeTag` classification and casting.
//! - `cell`: `Cell` and `Row`, the units format backends emit.
//! - `config`: `IngestConfig` (buffer capacity, sample window, chunk size).
//!
//! No I/O lives here; `messy-io` and `messy-rows` build on these types.

pub mod cell;
pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod types;

pub use cell::{Cell, Row};
pub use config::IngestConfig;
pub use error::{Error, Result};
pub use schema::TypeTag;
pub use types::Scalar;
