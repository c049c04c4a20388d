use thiserror::Error;

/// Result type local to messy-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The position was produced by the source but fell outside the retained
    /// cache. Deterministic: retrying the same access fails the same way.
    #[error("buffer unavailable at offset {offset}: only the first {cached} bytes are retained and the source is at {frontier}")]
    BufferUnavailable {
        offset: usize,
        cached: usize,
        frontier: usize,
    },

    #[error("cannot seek to offset {offset}: the source has only produced {frontier} bytes")]
    SeekBeyondFrontier { offset: usize, frontier: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(io) => io,
            Error::SeekBeyondFrontier { .. } => {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
            }
            Error::BufferUnavailable { .. } => std::io::Error::new(std::io::ErrorKind::Other, e),
        }
    }
}
