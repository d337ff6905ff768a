//! Database value model.
//!
//! [`ScalarValue`] mirrors what the SQLite driver hands back for one
//! column; [`GroupedValue`] is one entry inside a [`GroupedResult`] —
//! either a scalar subtotal or a nested sub-level of a multi-column
//! GROUP BY.

use std::fmt;

use serde::Serialize;

use crate::grouped::GroupedResult;

/// A single database scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ScalarValue {
    /// Short type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    /// The integer subtotal, if this scalar is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

/// Report-label rendition. NULL and BLOB values get fixed placeholder
/// labels; everything else renders as the bare value.
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "(none)"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Blob(_) => write!(f, "(blob)"),
        }
    }
}

/// One entry value inside a [`GroupedResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupedValue {
    /// A terminal subtotal (or any other scalar the query produced).
    Scalar(ScalarValue),
    /// A sub-level of a multi-column GROUP BY.
    Nested(GroupedResult),
}

impl GroupedValue {
    /// Short type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(v) => v.kind(),
            Self::Nested(_) => "nested",
        }
    }

    /// The integer subtotal, if this entry is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Scalar(v) => v.as_integer(),
            Self::Nested(_) => None,
        }
    }

    /// The nested sub-level, if this entry is one.
    pub fn as_nested(&self) -> Option<&GroupedResult> {
        match self {
            Self::Nested(g) => Some(g),
            Self::Scalar(_) => None,
        }
    }
}

impl From<i64> for GroupedValue {
    fn from(n: i64) -> Self {
        Self::Scalar(ScalarValue::Integer(n))
    }
}

impl From<ScalarValue> for GroupedValue {
    fn from(v: ScalarValue) -> Self {
        Self::Scalar(v)
    }
}

impl From<GroupedResult> for GroupedValue {
    fn from(g: GroupedResult) -> Self {
        Self::Nested(g)
    }
}
