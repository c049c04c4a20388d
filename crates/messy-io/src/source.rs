//! Forward-only byte sources.
//!
//! A `ByteSource` is consumed strictly front to back. `ReplayBuffer` is the
//! only component that reads one directly once wrapped.

use std::io::{self, BufRead, Read};

const DRAIN_CHUNK: usize = 8 * 1024;

/// Forward-only producer of bytes.
pub trait ByteSource {
    /// Read up to `n` bytes. Fewer than `n` only at end of stream.
    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>>;

    /// Read through the next LF (inclusive), or the remainder at end of stream.
    ///
    /// The default splits manually over single-byte reads so that sources
    /// without native line support never consume past the terminator.
    fn read_line(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        loop {
            let byte = self.read_bytes(1)?;
            match byte.first() {
                None => break,
                Some(&b) => {
                    line.push(b);
                    if b == b'\n' {
                        break;
                    }
                }
            }
        }
        Ok(line)
    }

    /// Drain everything left in the source.
    fn read_remaining(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            let chunk = self.read_bytes(DRAIN_CHUNK)?;
            if chunk.is_empty() {
                break;
            }
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }
}

/// Adapter for any `Read`. Lines fall back to byte-at-a-time splitting.
pub struct ReaderSource<R: Read> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(n.min(DRAIN_CHUNK));
        self.inner.by_ref().take(n as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn read_remaining(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Adapter for any `BufRead`, using its native line reading.
pub struct LineReaderSource<R: BufRead> {
    inner: R,
}

impl<R: BufRead> LineReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> ByteSource for LineReaderSource<R> {
    fn read_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(n.min(DRAIN_CHUNK));
        self.inner.by_ref().take(n as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn read_line(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        self.inner.read_until(b'\n', &mut line)?;
        Ok(line)
    }

    fn read_remaining(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most one byte per `read` call, like a slow pipe.
    struct Trickle(Vec<u8>, usize);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.1 >= self.0.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[self.1];
            self.1 += 1;
            Ok(1)
        }
    }

    #[test]
    fn read_bytes_fills_request_across_short_reads() {
        let mut src = ReaderSource::new(Trickle(b"abcdef".to_vec(), 0));
        assert_eq!(src.read_bytes(4).unwrap(), b"abcd");
        assert_eq!(src.read_bytes(4).unwrap(), b"ef");
        assert!(src.read_bytes(4).unwrap().is_empty());
    }

    #[test]
    fn fallback_line_split_stops_at_lf() {
        let mut src = ReaderSource::new(&b"one\ntwo\r\nthree"[..]);
        assert_eq!(src.read_line().unwrap(), b"one\n");
        assert_eq!(src.read_line().unwrap(), b"two\r\n");
        assert_eq!(src.read_line().unwrap(), b"three");
        assert!(src.read_line().unwrap().is_empty());
    }

    #[test]
    fn native_line_split_matches_fallback() {
        let mut src = LineReaderSource::new(&b"one\ntwo"[..]);
        assert_eq!(src.read_line().unwrap(), b"one\n");
        assert_eq!(src.read_remaining().unwrap(), b"two");
    }
}
