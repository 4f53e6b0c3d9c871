//! Typed metadata bag shared by rows and data requests.
//!
//! The source library backing this design uses a dynamic per-row property
//! bag (any-typed). We model that as a closed sum type instead of a trait
//! object so pattern matches stay exhaustive and formatters can't stash
//! non-`Send` payloads in a row that might cross an await point inside a
//! host runtime.

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<MetaValue>),
}

impl MetaValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Ordered string-keyed map used for row metadata and request filters.
///
/// Iteration order is insertion order; this matters for `DataRequest`
/// equality (two requests with the same filters inserted in a different
/// order still compare equal field-by-field since `IndexMap`'s `PartialEq`
/// ignores order, but display/debug output stays stable for logs).
pub type MetaMap = IndexMap<String, MetaValue>;

/// Opaque error payload a data source can attach to an errored row or
/// chunk. Kept as a plain string plus a transience flag rather than a
/// trait object so it can be cloned into render state without boxing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub message: String,
    pub transient: bool,
}

impl ErrorValue {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            transient: true,
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            transient: false,
        }
    }
}
