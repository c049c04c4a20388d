//! Universal-newline line splitting over arbitrarily chunked bytes.
//!
//! Chunk boundaries carry no meaning: the same bytes produce the same lines
//! however they are cut. LF, CR and CRLF each end a line, and every emitted
//! line ends in a single `\n` except an unterminated final line.
//!
//! Boundaries are found on raw bytes and only whole lines are decoded, so a
//! multi-byte character split across two chunks is never mangled.

use std::collections::VecDeque;

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// Push-based line splitter: feed chunks, pop completed lines.
///
/// Holds at most one unterminated fragment (`tail`) between chunks. A chunk
/// ending in CR keeps that CR in the tail until the next chunk shows whether
/// an LF follows.
#[derive(Debug, Default)]
pub struct LineSplitter {
    tail: Vec<u8>,
    ready: VecDeque<Vec<u8>>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk. Empty chunks are ignored.
    pub fn push(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }

        let mut start = 0;
        if self.tail.last() == Some(&CR) {
            self.tail.pop();
            self.emit(&[]);
            if chunk[0] == LF {
                start = 1;
            }
        }

        let mut i = start;
        while i < chunk.len() {
            match chunk[i] {
                LF => {
                    self.emit(&chunk[start..i]);
                    start = i + 1;
                }
                CR if i + 1 < chunk.len() => {
                    self.emit(&chunk[start..i]);
                    if chunk[i + 1] == LF {
                        i += 1;
                    }
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }

        self.tail.extend_from_slice(&chunk[start..]);
        if self.tail.last() == Some(&CR) {
            tracing::trace!(tail = self.tail.len(), "holding CR across chunk boundary");
        }
    }

    /// Signal end of input. A remaining fragment becomes the final line; a
    /// held CR is normalized like any other terminator.
    pub fn finish(&mut self) {
        if self.tail.is_empty() {
            return;
        }
        let mut line = std::mem::take(&mut self.tail);
        if let Some(last) = line.last_mut() {
            if *last == CR {
                *last = LF;
            }
        }
        self.ready.push_back(line);
    }

    /// Next completed line, if any.
    pub fn pop(&mut self) -> Option<Vec<u8>> {
        self.ready.pop_front()
    }

    /// Bytes carried over from previous chunks.
    pub fn pending(&self) -> usize {
        self.tail.len()
    }

    fn emit(&mut self, body: &[u8]) {
        let mut line = std::mem::take(&mut self.tail);
        line.extend_from_slice(body);
        line.push(LF);
        self.ready.push_back(line);
    }
}

/// Lazy raw lines over an infallible chunk iterator.
pub struct RawLines<I> {
    chunks: I,
    splitter: LineSplitter,
    finished: bool,
}

impl<I> RawLines<I> {
    pub fn new(chunks: I) -> Self {
        Self {
            chunks,
            splitter: LineSplitter::new(),
            finished: false,
        }
    }
}

impl<I, B> Iterator for RawLines<I>
where
    I: Iterator<Item = B>,
    B: AsRef<[u8]>,
{
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.splitter.pop() {
                return Some(line);
            }
            if self.finished {
                return None;
            }
            match self.chunks.next() {
                Some(chunk) => self.splitter.push(chunk.as_ref()),
                None => {
                    self.splitter.finish();
                    self.finished = true;
                }
            }
        }
    }
}

/// Lazy raw lines over a fallible chunk iterator.
///
/// Lines completed before an error are still yielded first; the error ends
/// the sequence and the unterminated fragment is dropped.
pub struct TryRawLines<I> {
    chunks: I,
    splitter: LineSplitter,
    finished: bool,
}

impl<I> TryRawLines<I> {
    pub fn new(chunks: I) -> Self {
        Self {
            chunks,
            splitter: LineSplitter::new(),
            finished: false,
        }
    }
}

impl<I, B, E> Iterator for TryRawLines<I>
where
    I: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Vec<u8>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.splitter.pop() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }
            match self.chunks.next() {
                Some(Ok(chunk)) => self.splitter.push(chunk.as_ref()),
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.splitter.finish();
                    self.finished = true;
                }
            }
        }
    }
}

/// Decoded lines. Invalid UTF-8 is replaced, so decoding never fails.
pub struct Lines<I> {
    raw: RawLines<I>,
}

impl<I> Lines<I> {
    pub fn new(chunks: I) -> Self {
        Self {
            raw: RawLines::new(chunks),
        }
    }
}

impl<I, B> Iterator for Lines<I>
where
    I: Iterator<Item = B>,
    B: AsRef<[u8]>,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw
            .next()
            .map(|line| String::from_utf8_lossy(&line).into_owned())
    }
}

/// Decoded, newline-normalized lines from any sequence of byte chunks.
pub fn normalize_lines<T>(chunks: T) -> Lines<T::IntoIter>
where
    T: IntoIterator,
    T::Item: AsRef<[u8]>,
{
    Lines::new(chunks.into_iter())
}
