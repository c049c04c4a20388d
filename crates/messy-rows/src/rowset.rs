//! `RowSet`: a lazy, single-pass table with a replayable sample.
//!
//! The raw row source is pulled at most once. The first time any pass needs
//! it, up to `window` raw rows are captured into the sample cache. The main
//! pass yields those cached rows and then continues on the raw source; the
//! sample pass only ever replays the cache.

use std::fmt;

use messy_core::cell::Row;
use messy_core::config::IngestConfig;
use messy_core::schema::TypeTag;

use crate::dict::RowDict;
use crate::error::Result;
use crate::processor::{apply_chain, Pass, ProcessorContext, RowProcessor};

/// Raw rows as produced by a format backend.
pub type RawRows = Box<dyn Iterator<Item = Result<Row>>>;

pub const DEFAULT_WINDOW: usize = 1000;

pub struct RowSet {
    name: String,
    raw: RawRows,
    window: usize,
    sample: Vec<Row>,
    sample_loaded: bool,
    /// Next sample index the main pass will yield.
    main_cursor: usize,
    main_started: bool,
    raw_exhausted: bool,
    typed: bool,
    types: Option<Vec<TypeTag>>,
    processors: Vec<Box<dyn RowProcessor>>,
}

impl RowSet {
    pub fn new<I>(name: impl Into<String>, raw: I) -> Self
    where
        I: Iterator<Item = Result<Row>> + 'static,
    {
        Self {
            name: name.into(),
            raw: Box::new(raw),
            window: DEFAULT_WINDOW,
            sample: Vec::new(),
            sample_loaded: false,
            main_cursor: 0,
            main_started: false,
            raw_exhausted: false,
            typed: false,
            types: None,
            processors: Vec::new(),
        }
    }

    /// Row set over already materialized rows.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self::new(name, rows.into_iter().map(Ok))
    }

    /// Set the sample window. Has no effect once the sample was captured.
    pub fn with_window(mut self, window: usize) -> Self {
        if !self.sample_loaded {
            self.window = window;
        }
        self
    }

    pub fn with_config(self, cfg: &IngestConfig) -> Self {
        self.with_window(cfg.sample_window)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn is_typed(&self) -> bool {
        self.typed
    }

    /// Declare the per-column schema. Values are only converted by a
    /// processor such as `CoerceTypes`.
    pub fn set_types(&mut self, types: Vec<TypeTag>) {
        self.typed = true;
        self.types = Some(types);
    }

    pub fn types(&self) -> Option<&[TypeTag]> {
        self.types.as_deref()
    }

    pub fn register_processor<P: RowProcessor + 'static>(&mut self, processor: P) {
        self.processors.push(Box::new(processor));
    }

    /// The main pass. Calling again after dropping a partially consumed
    /// iterator resumes where it stopped; once exhausted it yields nothing.
    /// Processor main-pass state is reset only when the main pass first
    /// starts, so interleaved `sample()` calls do not disturb it.
    pub fn rows(&mut self) -> Rows<'_> {
        if !self.main_started {
            self.main_started = true;
            self.reset_processors(Pass::Main);
        }
        Rows::new(self, Pass::Main)
    }

    /// Replay the first `window` raw rows through the processor chain.
    ///
    /// Repeatable, and never moves the main pass.
    pub fn sample(&mut self) -> Rows<'_> {
        self.reset_processors(Pass::Sample);
        Rows::new(self, Pass::Sample)
    }

    /// Rows as ordered `column -> value` mappings.
    pub fn dicts(&mut self, sample: bool) -> impl Iterator<Item = Result<RowDict>> + '_ {
        let rows = if sample { self.sample() } else { self.rows() };
        rows.map(|row| row.map(RowDict::from_row))
    }

    fn reset_processors(&mut self, pass: Pass) {
        for processor in &mut self.processors {
            processor.reset(pass);
        }
    }

    fn load_sample(&mut self) -> Result<()> {
        while self.sample.len() < self.window {
            match self.raw.next() {
                Some(row) => self.sample.push(row?),
                None => {
                    self.raw_exhausted = true;
                    break;
                }
            }
        }
        self.sample_loaded = true;
        tracing::debug!(table = %self.name, rows = self.sample.len(), "sample captured");
        Ok(())
    }

    fn next_raw(&mut self, pass: Pass, sample_idx: &mut usize) -> Option<Result<Row>> {
        if !self.sample_loaded {
            if let Err(e) = self.load_sample() {
                return Some(Err(e));
            }
        }
        match pass {
            Pass::Sample => {
                let row = self.sample.get(*sample_idx).cloned()?;
                *sample_idx += 1;
                Some(Ok(row))
            }
            Pass::Main => {
                if let Some(row) = self.sample.get(self.main_cursor) {
                    self.main_cursor += 1;
                    return Some(Ok(row.clone()));
                }
                if self.raw_exhausted {
                    return None;
                }
                let next = self.raw.next();
                if next.is_none() {
                    self.raw_exhausted = true;
                }
                next
            }
        }
    }
}

impl fmt::Debug for RowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSet")
            .field("name", &self.name)
            .field("window", &self.window)
            .field("typed", &self.typed)
            .field("types", &self.types)
            .field("processors", &self.processors.len())
            .finish()
    }
}

impl fmt::Display for RowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowSet({})", self.name)
    }
}

impl<'a> IntoIterator for &'a mut RowSet {
    type Item = Result<Row>;
    type IntoIter = Rows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// Processed rows from one pass over a `RowSet`.
///
/// A processor error is yielded once and ends the pass.
pub struct Rows<'a> {
    set: &'a mut RowSet,
    pass: Pass,
    sample_idx: usize,
    failed: bool,
}

impl<'a> Rows<'a> {
    fn new(set: &'a mut RowSet, pass: Pass) -> Self {
        Self {
            set,
            pass,
            sample_idx: 0,
            failed: false,
        }
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            let raw = match self.set.next_raw(self.pass, &mut self.sample_idx)? {
                Ok(row) => row,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            };

            let RowSet {
                name,
                typed,
                types,
                processors,
                ..
            } = &mut *self.set;
            let ctx = ProcessorContext {
                name: name.as_str(),
                typed: *typed,
                column_types: types.as_deref(),
                pass: self.pass,
            };
            match apply_chain(processors, &ctx, raw) {
                Ok(Some(row)) => return Some(Ok(row)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
