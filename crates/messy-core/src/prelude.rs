//! Convenient re-exports for downstream crates.

pub use crate::cell::{Cell, Row};
pub use crate::config::IngestConfig;
pub use crate::error::{Error, Result};
pub use crate::schema::TypeTag;
pub use crate::types::Scalar;
