//! # Positional arguments forwarded to handlers.
//!
//! [`Value`] is a small dynamically typed value. `publish` forwards a slice of
//! values verbatim to every matching handler; [`ArgsExt`] gives handlers typed,
//! fallible access by position.
//!
//! ## Example
//! ```rust
//! use vidbus::{args, ArgsExt, Value};
//!
//! let a = args![1, "a", 0.5];
//! assert_eq!(a[0], Value::Int(1));
//! assert_eq!(a.text(1).unwrap(), "a");
//! assert_eq!(a.float(2).unwrap(), 0.5);
//! assert!(a.float(1).is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::HandlerError;

/// Argument value carried by a publish.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Arc<str>),
}

impl Value {
    /// Returns the numeric value; integers are widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Typed positional access for handler arguments.
///
/// Missing positions and type mismatches both map to
/// [`HandlerError::BadArgument`], so handlers can use `?`.
pub trait ArgsExt {
    /// Returns the value at `index`, or `None` when out of range.
    fn arg(&self, index: usize) -> Option<&Value>;

    fn float(&self, index: usize) -> Result<f64, HandlerError> {
        self.arg(index)
            .and_then(Value::as_f64)
            .ok_or(HandlerError::BadArgument {
                index,
                expected: "float",
            })
    }

    fn int(&self, index: usize) -> Result<i64, HandlerError> {
        self.arg(index)
            .and_then(Value::as_i64)
            .ok_or(HandlerError::BadArgument {
                index,
                expected: "int",
            })
    }

    fn boolean(&self, index: usize) -> Result<bool, HandlerError> {
        self.arg(index)
            .and_then(Value::as_bool)
            .ok_or(HandlerError::BadArgument {
                index,
                expected: "bool",
            })
    }

    fn text(&self, index: usize) -> Result<&str, HandlerError> {
        self.arg(index)
            .and_then(Value::as_str)
            .ok_or(HandlerError::BadArgument {
                index,
                expected: "text",
            })
    }
}

impl ArgsExt for [Value] {
    #[inline]
    fn arg(&self, index: usize) -> Option<&Value> {
        self.get(index)
    }
}

/// Builds an array of [`Value`]s from heterogeneous literals.
///
/// ```rust
/// use vidbus::{args, Value};
///
/// let a = args![true, 3, "x"];
/// assert_eq!(a, [Value::Bool(true), Value::Int(3), Value::Text("x".into())]);
/// let empty: [Value; 0] = args![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        []
    };
    ($($v:expr),+ $(,)?) => {
        [$($crate::Value::from($v)),+]
    };
}
