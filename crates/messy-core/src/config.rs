//! Ingest configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Bytes of the stream head a replay buffer retains (the rewind budget).
    pub buffer_capacity: usize,

    /// Rows captured for the repeatable sample view of each row set.
    pub sample_window: usize,

    /// Size of the chunks pulled from a byte source when splitting lines.
    pub chunk_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 2048,
            sample_window: 1000,
            chunk_size: 8 * 1024,
        }
    }
}

impl IngestConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `MESSY_BUFFER_CAPACITY`: replay buffer capacity in bytes
    /// - `MESSY_SAMPLE_WINDOW`: sample window in rows
    /// - `MESSY_CHUNK_SIZE`: read chunk size in bytes
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("MESSY_BUFFER_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.buffer_capacity = v;
            }
        }

        if let Ok(s) = std::env::var("MESSY_SAMPLE_WINDOW") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.sample_window = v;
            }
        }

        if let Ok(s) = std::env::var("MESSY_CHUNK_SIZE") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.chunk_size = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than zero".into()));
        }
        Ok(())
    }
}
