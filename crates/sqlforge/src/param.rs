//! Per-render parameter accumulation.

use crate::value::Value;

/// The single parameter accumulator for one render pass.
///
/// Merges the positional counter and the ordered argument list: pushing a
/// value returns the 0-based index fed to [`Dialect::placeholder`], and the
/// push order is exactly the argument order handed back to the caller.
///
/// A fresh `Params` is created inside every terminal `to_sql` call and
/// threaded by `&mut` through every clause and condition render, subqueries
/// included, so placeholder numbering is globally ordered within one
/// statement and repeated renders of an unmutated builder are identical.
///
/// [`Dialect::placeholder`]: crate::dialect::Dialect::placeholder
#[derive(Debug, Default)]
pub struct Params {
    values: Vec<Value>,
}

impl Params {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append a value and return its 0-based placeholder index.
    pub fn push(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.values.len() - 1
    }

    /// Number of values accumulated so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value has been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the accumulator, yielding arguments in placeholder order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_indices() {
        let mut params = Params::new();
        assert_eq!(params.push(Value::Int(1)), 0);
        assert_eq!(params.push(Value::Int(2)), 1);
        assert_eq!(params.push(Value::Text("x".into())), 2);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn into_values_preserves_push_order() {
        let mut params = Params::new();
        params.push(Value::Int(7));
        params.push(Value::Text("a".into()));
        assert_eq!(
            params.into_values(),
            vec![Value::Int(7), Value::Text("a".into())]
        );
    }
}
