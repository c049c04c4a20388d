//! Bounded replay over a forward-only byte source.
//!
//! `ReplayBuffer` retains the first `capacity` bytes the source ever produced.
//! Within that window a consumer may seek back and re-read; past it, bytes
//! flow through once and are gone. Offsets fall into three ranges:
//!
//! - `[0, cached_len)`: retained, served from memory.
//! - `source_offset`: the frontier, served by reading the source.
//! - `(cached_len, source_offset)`: evicted, `Error::BufferUnavailable`.
//!
//! A read that starts in the cache and runs off its end continues from the
//! source when the cache reaches the frontier, and stops short (returning
//! only cached bytes) when an evicted gap follows. A read positioned exactly at
//! `cached_len` with a gap behind it has nothing to return and fails.

use std::io::{self, Read, Seek, SeekFrom};

use messy_core::config::IngestConfig;

use crate::error::{Error, Result};
use crate::source::ByteSource;

pub struct ReplayBuffer<S: ByteSource> {
    source: S,
    cache: Vec<u8>,
    capacity: usize,
    cursor: usize,
    source_offset: usize,
}

impl<S: ByteSource> ReplayBuffer<S> {
    pub const DEFAULT_CAPACITY: usize = 2048;

    pub fn new(source: S) -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY, source)
    }

    /// Create a buffer that retains at most `capacity` bytes of the stream head.
    pub fn with_capacity(capacity: usize, source: S) -> Self {
        Self {
            source,
            cache: Vec::with_capacity(capacity.min(64 * 1024)),
            capacity,
            cursor: 0,
            source_offset: 0,
        }
    }

    pub fn from_config(cfg: &IngestConfig, source: S) -> Self {
        Self::with_capacity(cfg.buffer_capacity, source)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes currently retained (always the stream head).
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Bytes consumed from the underlying source so far.
    pub fn source_offset(&self) -> usize {
        self.source_offset
    }

    pub fn tell(&self) -> usize {
        self.cursor
    }

    /// Give up replay and return the source, positioned at `source_offset`.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Read up to `n` bytes from the cursor.
    pub fn read(&mut self, n: usize) -> Result<Vec<u8>> {
        let cached = self.cache.len();
        if self.cursor < cached {
            let end = self.cursor.saturating_add(n).min(cached);
            let mut out = self.cache[self.cursor..end].to_vec();
            self.cursor = end;
            let short = n - out.len();
            if short > 0 && self.cursor == self.source_offset {
                out.extend(self.pull(short)?);
            }
            return Ok(out);
        }
        if self.cursor == self.source_offset {
            return self.pull(n);
        }
        Err(self.unavailable(self.cursor))
    }

    /// Read one line (through LF, inclusive) from the cursor.
    ///
    /// A line that starts in the cache but runs into evicted bytes cannot be
    /// completed: that fails with `BufferUnavailable` and the cursor stays put.
    pub fn readline(&mut self) -> Result<Vec<u8>> {
        let cached = self.cache.len();
        if self.cursor < cached {
            let end = self.cache[self.cursor..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|i| self.cursor + i + 1);
            let Some(end) = end else {
                if cached < self.source_offset {
                    return Err(self.unavailable(cached));
                }
                let mut line = self.cache[self.cursor..].to_vec();
                self.cursor = cached;
                line.extend(self.pull_line()?);
                return Ok(line);
            };
            let line = self.cache[self.cursor..end].to_vec();
            self.cursor = end;
            return Ok(line);
        }
        if self.cursor == self.source_offset {
            return self.pull_line();
        }
        Err(self.unavailable(self.cursor))
    }

    /// Everything from the cursor to the end of the stream.
    ///
    /// This never fails with `BufferUnavailable`: it returns the cached bytes
    /// after the cursor, then drains the source. Any evicted gap between the
    /// two is skipped.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let cached = self.cache.len();
        let mut out = if self.cursor < cached {
            self.cache[self.cursor..].to_vec()
        } else {
            Vec::new()
        };
        if cached < self.source_offset && self.cursor < self.source_offset {
            tracing::warn!(
                cursor = self.cursor,
                cached,
                source_offset = self.source_offset,
                "read_all skipping evicted bytes"
            );
        }
        let rest = self.source.read_remaining()?;
        self.advance(&rest);
        out.extend(rest);
        Ok(out)
    }

    /// Move the cursor to `offset`.
    ///
    /// Valid targets are any retained offset (`offset <= cached_len`) and the
    /// frontier itself.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.source_offset {
            return Err(Error::SeekBeyondFrontier {
                offset,
                frontier: self.source_offset,
            });
        }
        if self.cache.len() < offset && offset < self.source_offset {
            return Err(self.unavailable(offset));
        }
        self.cursor = offset;
        Ok(())
    }

    /// Consume the buffer into an iterator of `chunk_size` reads.
    pub fn into_chunks(self, chunk_size: usize) -> ReplayChunks<S> {
        ReplayChunks {
            buffer: self,
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }

    fn pull(&mut self, n: usize) -> Result<Vec<u8>> {
        let bytes = self.source.read_bytes(n)?;
        self.advance(&bytes);
        Ok(bytes)
    }

    fn pull_line(&mut self) -> Result<Vec<u8>> {
        let line = self.source.read_line()?;
        self.advance(&line);
        Ok(line)
    }

    /// Account for freshly read bytes; cursor is at the frontier on entry.
    fn advance(&mut self, bytes: &[u8]) {
        let cached = self.cache.len();
        if cached == self.source_offset && cached < self.capacity {
            let take = (self.capacity - cached).min(bytes.len());
            self.cache.extend_from_slice(&bytes[..take]);
            if self.cache.len() == self.capacity {
                tracing::debug!(capacity = self.capacity, "replay cache full");
            }
        }
        self.source_offset += bytes.len();
        self.cursor = self.source_offset;
        tracing::trace!(
            bytes = bytes.len(),
            source_offset = self.source_offset,
            "fresh read"
        );
    }

    fn unavailable(&self, offset: usize) -> Error {
        Error::BufferUnavailable {
            offset,
            cached: self.cache.len(),
            frontier: self.source_offset,
        }
    }
}

impl<S: ByteSource> Read for ReplayBuffer<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes = ReplayBuffer::read(self, buf.len())?;
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

impl<S: ByteSource> Seek for ReplayBuffer<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(o) => usize::try_from(o).ok(),
            SeekFrom::Current(delta) => {
                if delta >= 0 {
                    usize::try_from(delta)
                        .ok()
                        .and_then(|d| self.cursor.checked_add(d))
                } else {
                    usize::try_from(delta.unsigned_abs())
                        .ok()
                        .and_then(|d| self.cursor.checked_sub(d))
                }
            }
            SeekFrom::End(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "replay buffer cannot seek relative to an unknown stream end",
                ))
            }
        };
        let target = target.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek to an invalid position")
        })?;
        ReplayBuffer::seek(self, target)?;
        Ok(target as u64)
    }
}

/// Chunked reads from a `ReplayBuffer`, ending at the first empty read.
///
/// Feeds `lines::TryRawLines`; errors end the iteration after being yielded.
pub struct ReplayChunks<S: ByteSource> {
    buffer: ReplayBuffer<S>,
    chunk_size: usize,
    done: bool,
}

impl<S: ByteSource> Iterator for ReplayChunks<S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.buffer.read(self.chunk_size) {
            Ok(chunk) if chunk.is_empty() => {
                self.done = true;
                None
            }
            Ok(chunk) => Some(Ok(chunk)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
