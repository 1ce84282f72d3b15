//! Composable predicate trees for WHERE and HAVING clauses.
//!
//! A [`Cond`] renders itself to a SQL boolean expression given a dialect and
//! the shared per-render [`Params`] accumulator, so placeholder numbering
//! stays globally ordered across clauses and nested subqueries.

use crate::builder::SelectBuilder;
use crate::dialect::Dialect;
use crate::error::BuildResult;
use crate::param::Params;
use crate::value::Value;

/// Right-hand side of a comparison leaf.
#[derive(Clone, Debug)]
pub enum Rhs {
    /// A parameterized value: one placeholder, one argument.
    Value(Value),
    /// Another column: escaped identifier, no argument.
    Column(String),
    /// A nested SELECT rendered in parentheses, sharing the outer counter.
    Subquery(Box<SelectBuilder>),
}

/// A predicate node.
///
/// Condition trees are immutable once constructed; builders append new nodes
/// rather than mutating existing ones. Rendering a condition never fails on
/// its own; the only error path is a nested subquery that itself fails to
/// build, which propagates unchanged.
#[derive(Clone, Debug)]
pub enum Cond {
    /// `column OP rhs`.
    Compare {
        /// Left-hand column name.
        column: String,
        /// SQL operator text.
        op: &'static str,
        /// Right-hand side.
        rhs: Rhs,
    },
    /// `column IS NULL` / `column IS NOT NULL`; consumes no placeholder.
    NullCheck {
        /// Column under test.
        column: String,
        /// `true` for IS NOT NULL.
        negated: bool,
    },
    /// `column IN (…)` / `column NOT IN (…)`, one placeholder per value.
    InList {
        /// Column under test.
        column: String,
        /// Listed values, in placeholder order.
        values: Vec<Value>,
        /// `true` for NOT IN.
        negated: bool,
    },
    /// `column BETWEEN low AND high`, two placeholders in that order.
    Between {
        /// Column under test.
        column: String,
        /// Lower bound.
        low: Value,
        /// Upper bound.
        high: Value,
    },
    /// AND/OR group; children rendering to nothing are dropped, and the group
    /// is parenthesized only when two or more remain.
    Group {
        /// `"AND"` or `"OR"`.
        connective: &'static str,
        /// Children, rendered in list order.
        children: Vec<Cond>,
    },
}

impl Cond {
    fn compare(column: impl Into<String>, op: &'static str, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op,
            rhs: Rhs::Value(value.into()),
        }
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "=", value)
    }

    /// `column <> value`
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<>", value)
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">", value)
    }

    /// `column >= value`
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">=", value)
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<", value)
    }

    /// `column <= value`
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<=", value)
    }

    /// `column LIKE pattern`
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "LIKE", pattern)
    }

    /// `column NOT LIKE pattern`
    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "NOT LIKE", pattern)
    }

    /// `column IN (values…)`
    pub fn in_list<T: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Cond::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// `column NOT IN (values…)`
    pub fn not_in<T: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Cond::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// `column IS NULL`
    pub fn is_null(column: impl Into<String>) -> Self {
        Cond::NullCheck {
            column: column.into(),
            negated: false,
        }
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Cond::NullCheck {
            column: column.into(),
            negated: true,
        }
    }

    /// `column BETWEEN low AND high`
    pub fn between(
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Cond::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    /// `column1 = column2` (column-to-column, contributes no argument)
    pub fn col_eq(column1: impl Into<String>, column2: impl Into<String>) -> Self {
        Cond::Compare {
            column: column1.into(),
            op: "=",
            rhs: Rhs::Column(column2.into()),
        }
    }

    /// `column = (SELECT …)`
    pub fn eq_select(column: impl Into<String>, query: SelectBuilder) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "=",
            rhs: Rhs::Subquery(Box::new(query)),
        }
    }

    /// `column IN (SELECT …)`
    pub fn in_select(column: impl Into<String>, query: SelectBuilder) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "IN",
            rhs: Rhs::Subquery(Box::new(query)),
        }
    }

    /// Combine conditions with AND.
    pub fn and(children: impl IntoIterator<Item = Cond>) -> Self {
        Cond::Group {
            connective: "AND",
            children: children.into_iter().collect(),
        }
    }

    /// Combine conditions with OR.
    pub fn or(children: impl IntoIterator<Item = Cond>) -> Self {
        Cond::Group {
            connective: "OR",
            children: children.into_iter().collect(),
        }
    }

    /// Render this predicate to a SQL fragment, pushing arguments onto the
    /// shared accumulator in placeholder order.
    pub fn render(&self, dialect: Dialect, params: &mut Params) -> BuildResult<String> {
        match self {
            Cond::Compare { column, op, rhs } => {
                let mut sql = format!("{} {}", dialect.escape_identifier(column), op);
                match rhs {
                    Rhs::Value(value) => {
                        let idx = params.push(value.clone());
                        sql.push(' ');
                        sql.push_str(&dialect.placeholder(idx));
                    }
                    Rhs::Column(other) => {
                        sql.push(' ');
                        sql.push_str(&dialect.escape_identifier(other));
                    }
                    Rhs::Subquery(query) => {
                        let inner = query.build(params)?;
                        sql.push_str(" (");
                        sql.push_str(&inner);
                        sql.push(')');
                    }
                }
                Ok(sql)
            }
            Cond::NullCheck { column, negated } => {
                let op = if *negated { "IS NOT NULL" } else { "IS NULL" };
                Ok(format!("{} {}", dialect.escape_identifier(column), op))
            }
            Cond::InList {
                column,
                values,
                negated,
            } => {
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| {
                        let idx = params.push(v.clone());
                        dialect.placeholder(idx)
                    })
                    .collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                Ok(format!(
                    "{} {} ({})",
                    dialect.escape_identifier(column),
                    op,
                    placeholders.join(", ")
                ))
            }
            Cond::Between { column, low, high } => {
                let low_idx = params.push(low.clone());
                let low_ph = dialect.placeholder(low_idx);
                let high_idx = params.push(high.clone());
                let high_ph = dialect.placeholder(high_idx);
                Ok(format!(
                    "{} BETWEEN {} AND {}",
                    dialect.escape_identifier(column),
                    low_ph,
                    high_ph
                ))
            }
            Cond::Group {
                connective,
                children,
            } => {
                let mut parts = Vec::with_capacity(children.len());
                for child in children {
                    let part = child.render(dialect, params)?;
                    if !part.is_empty() {
                        parts.push(part);
                    }
                }
                let joined = parts.join(&format!(" {connective} "));
                if parts.len() > 1 {
                    Ok(format!("({joined})"))
                } else {
                    Ok(joined)
                }
            }
        }
    }
}
