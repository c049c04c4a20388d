use thiserror::Error;

/// Result type local to messy-rows.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream error: {0}")]
    Buffer(#[from] messy_io::Error),

    #[error(transparent)]
    Core(#[from] messy_core::Error),

    #[error("processor '{name}' failed: {message}")]
    Processor { name: &'static str, message: String },

    #[error("unknown table '{0}'")]
    UnknownTable(String),
}
