//! Row processors: the transform chain a `RowSet` applies to every row.
//!
//! The `RowSet` calls `process` for each raw row, in registration order.
//! Returning `Ok(None)` vetoes the row: later processors and the consumer
//! never see it. Errors abort the current pass.
//!
//! Processors may keep private state (a running row count, say). The main
//! pass and the sample pass interleave freely, so that state must be kept per
//! pass: `ctx.pass` says which pass a row belongs to, `reset(pass)` is called
//! when that pass starts over, and `PerPass` holds one value for each.

use messy_core::cell::Row;
use messy_core::schema::TypeTag;

use crate::error::Result;

/// Which view of a row set is being iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Main,
    Sample,
}

/// Read-only view of the owning row set handed to each processor.
#[derive(Debug, Clone, Copy)]
pub struct ProcessorContext<'a> {
    pub name: &'a str,
    pub typed: bool,
    pub column_types: Option<&'a [TypeTag]>,
    pub pass: Pass,
}

pub trait RowProcessor {
    /// Stable name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn process(&mut self, ctx: &ProcessorContext<'_>, row: Row) -> Result<Option<Row>>;

    /// Restart the state belonging to `pass`. State of the other pass must
    /// be left alone.
    fn reset(&mut self, _pass: Pass) {}
}

/// One value per pass, for processors that count or remember rows.
#[derive(Debug, Clone, Default)]
pub struct PerPass<T> {
    main: T,
    sample: T,
}

impl<T: Default> PerPass<T> {
    pub fn get_mut(&mut self, pass: Pass) -> &mut T {
        match pass {
            Pass::Main => &mut self.main,
            Pass::Sample => &mut self.sample,
        }
    }

    pub fn reset(&mut self, pass: Pass) {
        *self.get_mut(pass) = T::default();
    }
}

/// Run `row` through `processors`, stopping at the first veto.
pub(crate) fn apply_chain(
    processors: &mut [Box<dyn RowProcessor>],
    ctx: &ProcessorContext<'_>,
    row: Row,
) -> Result<Option<Row>> {
    let mut row = row;
    for processor in processors.iter_mut() {
        match processor.process(ctx, row)? {
            Some(next) => row = next,
            None => {
                tracing::trace!(processor = processor.name(), table = ctx.name, "row vetoed");
                return Ok(None);
            }
        }
    }
    Ok(Some(row))
}

/// Mapping transform: rewrite every row.
pub struct MapRows<F> {
    f: F,
}

impl<F: FnMut(Row) -> Row> MapRows<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(Row) -> Row> RowProcessor for MapRows<F> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn process(&mut self, _ctx: &ProcessorContext<'_>, row: Row) -> Result<Option<Row>> {
        Ok(Some((self.f)(row)))
    }
}

/// Veto transform: keep only rows the predicate accepts.
pub struct FilterRows<F> {
    predicate: F,
}

impl<F: FnMut(&Row) -> bool> FilterRows<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F: FnMut(&Row) -> bool> RowProcessor for FilterRows<F> {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn process(&mut self, _ctx: &ProcessorContext<'_>, row: Row) -> Result<Option<Row>> {
        if (self.predicate)(&row) {
            Ok(Some(row))
        } else {
            Ok(None)
        }
    }
}

/// Type coercion: cast cell `i` with the row set's `column_types[i]`.
///
/// Strict coercion fails the pass on the first value that does not cast.
/// Lenient coercion leaves such cells untouched. Cells beyond the declared
/// types, and rows of an untyped row set, pass through unchanged.
#[derive(Debug, Default, Clone)]
pub struct CoerceTypes {
    strict: bool,
}

impl CoerceTypes {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

impl RowProcessor for CoerceTypes {
    fn name(&self) -> &'static str {
        "types"
    }

    fn process(&mut self, ctx: &ProcessorContext<'_>, mut row: Row) -> Result<Option<Row>> {
        let Some(types) = ctx.column_types else {
            return Ok(Some(row));
        };
        for (cell, tag) in row.iter_mut().zip(types) {
            match tag.cast(cell.value.as_ref()) {
                Ok(value) => {
                    cell.value = value;
                    cell.type_tag = *tag;
                }
                Err(e) if self.strict => return Err(e.into()),
                Err(e) => {
                    tracing::debug!(table = ctx.name, error = %e, "leaving uncastable cell as-is");
                }
            }
        }
        Ok(Some(row))
    }
}

/// Name cells from a header list.
///
/// Cells past the end of the list are named `column_<n>` (1-based) and
/// flagged `column_autogenerated`.
#[derive(Debug, Clone)]
pub struct ApplyHeaders {
    headers: Vec<String>,
}

impl ApplyHeaders {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }
}

impl RowProcessor for ApplyHeaders {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn process(&mut self, _ctx: &ProcessorContext<'_>, mut row: Row) -> Result<Option<Row>> {
        for (i, cell) in row.iter_mut().enumerate() {
            match self.headers.get(i) {
                Some(header) => {
                    cell.column = Some(header.clone());
                    cell.column_autogenerated = false;
                }
                None => {
                    cell.column = Some(format!("column_{}", i + 1));
                    cell.column_autogenerated = true;
                }
            }
        }
        Ok(Some(row))
    }
}

/// Veto the first `count` rows of every pass (e.g. a header block).
#[derive(Debug, Clone)]
pub struct SkipRows {
    count: usize,
    seen: PerPass<usize>,
}

impl SkipRows {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            seen: PerPass::default(),
        }
    }
}

impl RowProcessor for SkipRows {
    fn name(&self) -> &'static str {
        "offset"
    }

    fn process(&mut self, ctx: &ProcessorContext<'_>, row: Row) -> Result<Option<Row>> {
        let seen = self.seen.get_mut(ctx.pass);
        if *seen < self.count {
            *seen += 1;
            return Ok(None);
        }
        Ok(Some(row))
    }

    fn reset(&mut self, pass: Pass) {
        self.seen.reset(pass);
    }
}
