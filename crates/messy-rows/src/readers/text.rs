//! Plain-text table set: every line of the stream is one row.

use std::io::Read;

use messy_core::prelude::{Cell, IngestConfig, Row, Scalar};
use messy_io::{ReaderSource, ReplayBuffer, TryRawLines};

use crate::error::Result;
use crate::rowset::RowSet;
use crate::tableset::TableSet;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Column name of the single cell in each row.
pub const LINE_COLUMN: &str = "line";

/// A single table read line by line from a byte stream.
///
/// LF, CR and CRLF all end a line. A leading UTF-8 byte-order mark is
/// dropped; invalid UTF-8 is replaced rather than rejected.
#[derive(Debug)]
pub struct TextTableSet {
    tables: Vec<RowSet>,
}

impl TextTableSet {
    pub fn new<R: Read + 'static>(
        reader: R,
        name: impl Into<String>,
        cfg: &IngestConfig,
    ) -> Result<Self> {
        cfg.validate()?;
        let capacity = cfg.buffer_capacity.max(UTF8_BOM.len());
        let mut buffer = ReplayBuffer::with_capacity(capacity, ReaderSource::new(reader));

        // Sniff the head, then rewind unless it was a BOM.
        let head = buffer.read(UTF8_BOM.len())?;
        if head != UTF8_BOM {
            buffer.seek(0)?;
        } else {
            tracing::debug!("skipping UTF-8 byte-order mark");
        }

        let raw = TryRawLines::new(buffer.into_chunks(cfg.chunk_size)).map(|line| -> Result<Row> {
            let mut line = line?;
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            let text = String::from_utf8_lossy(&line).into_owned();
            let row: Row = vec![Cell::new(Scalar::Str(text)).with_column(LINE_COLUMN)];
            Ok(row)
        });

        Ok(Self {
            tables: vec![RowSet::new(name, raw).with_config(cfg)],
        })
    }
}

impl TableSet for TextTableSet {
    fn tables(&mut self) -> Result<&mut [RowSet]> {
        Ok(&mut self.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(data: &'static [u8], cfg: &IngestConfig) -> Vec<String> {
        let mut ts = TextTableSet::new(Cursor::new(data), "t", cfg).unwrap();
        let table = ts.table("t").unwrap();
        let out = table
            .rows()
            .map(|row| row.unwrap()[0].value.as_ref().unwrap().to_string())
            .collect();
        out
    }

    #[test]
    fn mixed_line_endings() {
        let cfg = IngestConfig {
            chunk_size: 2,
            ..IngestConfig::default()
        };
        assert_eq!(lines(b"a\r\nb\rc\nd", &cfg), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn byte_order_mark_is_dropped() {
        let cfg = IngestConfig::default();
        assert_eq!(lines(b"\xEF\xBB\xBFid\n1\n", &cfg), vec!["id", "1"]);
    }

    #[test]
    fn short_stream_without_bom_is_rewound() {
        let cfg = IngestConfig::default();
        assert_eq!(lines(b"x", &cfg), vec!["x"]);
        assert!(lines(b"", &cfg).is_empty());
    }

    #[test]
    fn rows_carry_the_line_column() {
        let cfg = IngestConfig::default();
        let mut ts = TextTableSet::new(Cursor::new(&b"hello\n"[..]), "t", &cfg).unwrap();
        assert_eq!(ts.table_names().unwrap(), vec!["t"]);
        let row = ts.table("t").unwrap().rows().next().unwrap().unwrap();
        assert_eq!(row[0].column.as_deref(), Some(LINE_COLUMN));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let cfg = IngestConfig {
            chunk_size: 0,
            ..IngestConfig::default()
        };
        assert!(TextTableSet::new(Cursor::new(&b""[..]), "t", &cfg).is_err());
    }
}
