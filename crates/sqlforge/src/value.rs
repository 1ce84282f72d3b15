//! Parameter values and the raw-expression escape hatch.
//!
//! Every value handed to a builder is carried out-of-band as a [`Value`] in
//! the rendered statement's argument list; the SQL text only ever contains a
//! placeholder. The one exception is [`RawExpr`], which splices caller-trusted
//! SQL text verbatim.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};

/// A SQL parameter value.
///
/// Aligned positionally with the placeholders of the statement that produced
/// it; the caller hands the list to its own execution mechanism.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer (all Rust integer inputs widen to i64).
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Text.
    Text(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// UUID.
    Uuid(uuid::Uuid),
    /// JSON document.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Serialize any `Serialize` type into a [`Value::Json`] parameter.
    pub fn json<T: serde::Serialize>(value: &T) -> serde_json::Result<Self> {
        Ok(Value::Json(serde_json::to_value(value)?))
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// Caller-supplied literal SQL text, spliced into the output verbatim.
///
/// A raw expression contributes no placeholder and no argument. It is a
/// trusted-input escape hatch, not a security boundary: the keyword check in
/// [`raw`] is best-effort only and cannot catch all injection shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawExpr(pub(crate) String);

impl RawExpr {
    /// The literal SQL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn dangerous_keywords() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"(?i)\b(DROP|DELETE|INSERT|UPDATE|ALTER)\b")
            .expect("invalid built-in keyword pattern")
    })
}

/// Create a raw SQL expression after a basic keyword check.
///
/// # Panics
///
/// Panics when the expression contains DROP/DELETE/INSERT/UPDATE/ALTER
/// (case-insensitive). Rejected construction is a programmer error, not a
/// runtime condition; use [`raw_unchecked`] to opt out of the check.
pub fn raw(expr: impl Into<String>) -> RawExpr {
    let expr = expr.into();
    if dangerous_keywords().is_match(&expr) {
        panic!("potentially dangerous raw SQL expression");
    }
    RawExpr(expr)
}

/// Create a raw SQL expression without the keyword check (use with caution).
pub fn raw_unchecked(expr: impl Into<String>) -> RawExpr {
    RawExpr(expr.into())
}
