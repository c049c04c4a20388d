//! Lightweight scalar values carried by cells.
//!
//! Backends produce whatever native value they decode (text for line-based
//! sources, numbers for spreadsheets); `TypeTag::cast` converts between them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::TypeTag;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl Scalar {
    /// The tag a value of this variant naturally carries.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Scalar::Null => TypeTag::String,
            Scalar::Bool(_) => TypeTag::Bool,
            Scalar::I32(_) | Scalar::I64(_) => TypeTag::Integer,
            Scalar::F32(_) | Scalar::F64(_) => TypeTag::Float,
            Scalar::Str(_) | Scalar::Bin(_) => TypeTag::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Borrow the text of a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// JSON view of the value. Binary payloads render as lossy UTF-8 text.
    pub fn to_json(&self) -> serde_json::Value {
        use Scalar::*;
        match self {
            Null => serde_json::Value::Null,
            Bool(b) => serde_json::Value::Bool(*b),
            I32(i) => serde_json::Value::from(*i),
            I64(i) => serde_json::Value::from(*i),
            F32(f) => serde_json::Value::from(*f as f64),
            F64(f) => serde_json::Value::from(*f),
            Str(s) => serde_json::Value::String(s.clone()),
            Bin(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

/// Textual rendering used for emptiness checks and `String` casts.
/// `Null` renders as the empty string.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Scalar::*;
        match self {
            Null => Ok(()),
            Bool(b) => write!(f, "{b}"),
            I32(i) => write!(f, "{i}"),
            I64(i) => write!(f, "{i}"),
            F32(x) => write!(f, "{x}"),
            F64(x) => write!(f, "{x}"),
            Str(s) => f.write_str(s),
            Bin(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::I64(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::I32(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::F64(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(b: Vec<u8>) -> Self {
        Scalar::Bin(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_plain_text() {
        assert_eq!(Scalar::Null.to_string(), "");
        assert_eq!(Scalar::I64(42).to_string(), "42");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::from("a b").to_string(), "a b");
        assert_eq!(Scalar::Bin(b"raw".to_vec()).to_string(), "raw");
    }

    #[test]
    fn natural_type_tags() {
        assert_eq!(Scalar::I32(1).type_tag(), TypeTag::Integer);
        assert_eq!(Scalar::F64(1.5).type_tag(), TypeTag::Float);
        assert_eq!(Scalar::from("x").type_tag(), TypeTag::String);
        assert_eq!(Scalar::Null.type_tag(), TypeTag::String);
    }

    #[test]
    fn json_view() {
        assert_eq!(Scalar::I64(7).to_json(), serde_json::json!(7));
        assert_eq!(Scalar::Null.to_json(), serde_json::Value::Null);
        assert_eq!(Scalar::from("v").to_json(), serde_json::json!("v"));
    }
}
