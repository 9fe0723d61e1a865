//! Tagged value representation with string-escaping serialization.
//!
//! `Value` is a closed union over the primitive and container shapes the map
//! layer traffics in. Conversions are lossy only where the target cannot
//! represent the input: non-finite floats become `Null`. Serialization
//! escapes control characters in strings and otherwise passes text through
//! verbatim.

use crate::array_iter::{ArrayIter, ArrayKeyValueIter};
use crate::robin_hood::RobinHoodMap;
use core::fmt;

/// A dynamically tagged value.
#[derive(Debug, PartialEq)]
pub enum Value {
    Null,
    True,
    False,
    Number(f64),
    Str(String),
    Array(Vec<Value>),
    Object(RobinHoodMap<String, Value>),
}

impl Value {
    /// Iterates the elements of an `Array` value; other variants yield an
    /// empty iteration.
    pub fn members(&self) -> ArrayIter<'_, Value> {
        match self {
            Value::Array(items) => ArrayIter::new(items),
            _ => ArrayIter::new(&[]),
        }
    }

    /// Like [`members`](Value::members), but paired with element indices.
    pub fn members_indexed(&self) -> ArrayKeyValueIter<'_, Value> {
        match self {
            Value::Array(items) => ArrayKeyValueIter::new(items),
            _ => ArrayKeyValueIter::new(&[]),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<f64> for Value {
    /// NaN and the infinities have no numeric representation here and map
    /// to `Null`.
    fn from(n: f64) -> Self {
        if n.is_finite() {
            Value::Number(n)
        } else {
            Value::Null
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<RobinHoodMap<String, Value>> for Value {
    fn from(map: RobinHoodMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

/// Writes `s` with control characters escaped: `\n`, `\r`, `\b`, `\t`,
/// `\f`, any other code below 0x20 as `\u00xx` (lowercase hex). Everything
/// else passes through unchanged.
fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    use fmt::Write;

    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\u{8}' => f.write_str("\\b")?,
            '\t' => f.write_str("\\t")?,
            '\u{c}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::True => f.write_str("true"),
            Value::False => f.write_str("false"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => {
                f.write_str("\"")?;
                write_escaped(f, s)?;
                f.write_str("\"")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("\"")?;
                    write_escaped(f, key)?;
                    f.write_str("\":")?;
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
