//! Type tags: the abstract classification attached to every cell.
//!
//! Guessing which tag a column should carry is left to external heuristics.
//! This module only knows how to cast a value once a tag has been chosen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Scalar;

const TRUE_VALUES: [&str; 3] = ["true", "yes", "1"];
const FALSE_VALUES: [&str; 3] = ["false", "no", "0"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    #[default]
    String,
    Integer,
    Float,
    Bool,
}

impl TypeTag {
    /// Cast `value` into this tag's representation.
    ///
    /// Absent values and values whose text is blank cast to `None` for every
    /// tag. Anything else either converts or fails with `Error::Cast`.
    pub fn cast(&self, value: Option<&Scalar>) -> Result<Option<Scalar>> {
        let Some(value) = value else {
            return Ok(None);
        };
        let text = value.to_string();
        if text.trim().is_empty() {
            return Ok(None);
        }

        let cast = match (self, value) {
            (TypeTag::String, Scalar::Str(_)) => Some(value.clone()),
            (TypeTag::String, _) => Some(Scalar::Str(text.clone())),

            (TypeTag::Integer, Scalar::I32(i)) => Some(Scalar::I64(*i as i64)),
            (TypeTag::Integer, Scalar::I64(i)) => Some(Scalar::I64(*i)),
            (TypeTag::Integer, Scalar::F32(x)) => whole_f64(*x as f64),
            (TypeTag::Integer, Scalar::F64(x)) => whole_f64(*x),
            (TypeTag::Integer, Scalar::Str(s)) => parse_integer(s),

            (TypeTag::Float, Scalar::I32(i)) => Some(Scalar::F64(*i as f64)),
            (TypeTag::Float, Scalar::I64(i)) => Some(Scalar::F64(*i as f64)),
            (TypeTag::Float, Scalar::F32(x)) => Some(Scalar::F64(*x as f64)),
            (TypeTag::Float, Scalar::F64(x)) => Some(Scalar::F64(*x)),
            (TypeTag::Float, Scalar::Str(s)) => parse_float(s),

            (TypeTag::Bool, Scalar::Bool(b)) => Some(Scalar::Bool(*b)),
            (TypeTag::Bool, _) => parse_bool(&text),

            _ => None,
        };

        cast.map(Some).ok_or(Error::Cast {
            value: text,
            type_tag: *self,
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::String => "String",
            TypeTag::Integer => "Integer",
            TypeTag::Float => "Float",
            TypeTag::Bool => "Bool",
        };
        f.write_str(name)
    }
}

fn whole_f64(x: f64) -> Option<Scalar> {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < i64::MAX as f64 {
        Some(Scalar::I64(x as i64))
    } else {
        None
    }
}

fn parse_integer(s: &str) -> Option<Scalar> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<i64>().ok().map(Scalar::I64)
}

fn parse_float(s: &str) -> Option<Scalar> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().map(Scalar::F64)
}

fn parse_bool(s: &str) -> Option<Scalar> {
    let lowered = s.trim().to_ascii_lowercase();
    if TRUE_VALUES.contains(&lowered.as_str()) {
        Some(Scalar::Bool(true))
    } else if FALSE_VALUES.contains(&lowered.as_str()) {
        Some(Scalar::Bool(false))
    } else {
        None
    }
}
