//! UPDATE statement builder.

use crate::builder::{render_column_list, render_conditions, render_order_by, OrderBy};
use crate::cond::Cond;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::param::Params;
use crate::value::{RawExpr, Value};

#[derive(Clone, Debug)]
enum SetValue {
    Value(Value),
    Raw(RawExpr),
}

/// Builder for UPDATE statements.
///
/// SET assignments render before WHERE, so their placeholders take the lower
/// indices on numbered dialects.
#[derive(Clone, Debug)]
pub struct UpdateBuilder {
    dialect: Dialect,
    table: String,
    sets: Vec<(String, SetValue)>,
    where_conds: Vec<Cond>,
    order_by: Vec<OrderBy>,
    limit: Option<i64>,
    returning: Vec<String>,
}

impl UpdateBuilder {
    /// Begin an UPDATE targeting `table`.
    pub fn new(dialect: Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            sets: Vec::new(),
            where_conds: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            returning: Vec::new(),
        }
    }

    /// Assign a parameterized value to `column`.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sets.push((column.into(), SetValue::Value(value.into())));
        self
    }

    /// Assign a raw expression to `column`, spliced without a placeholder.
    pub fn set_raw(mut self, column: impl Into<String>, expr: RawExpr) -> Self {
        self.sets.push((column.into(), SetValue::Raw(expr)));
        self
    }

    /// AND another condition onto the WHERE clause.
    pub fn and_where(mut self, cond: Cond) -> Self {
        self.where_conds.push(cond);
        self
    }

    /// Append an ORDER BY term; only emitted on dialects that allow ordering
    /// mutations.
    pub fn order_by(mut self, column: impl Into<String>, direction: &str) -> Self {
        self.order_by.push(OrderBy::new(column.into(), direction));
        self
    }

    /// Cap the number of affected rows; only emitted on dialects that allow
    /// limited mutations.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Declare RETURNING columns; omitted on dialects without RETURNING.
    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Render the statement, returning SQL text and arguments in placeholder
    /// order.
    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        if self.table.is_empty() {
            return Err(BuildError::MissingTable);
        }
        if self.sets.is_empty() {
            return Err(BuildError::MissingSet);
        }

        let mut params = Params::new();
        let mut sql = String::from("UPDATE ");
        sql.push_str(&self.dialect.escape_identifier(&self.table));
        sql.push_str(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&self.dialect.escape_identifier(column));
            sql.push_str(" = ");
            match value {
                SetValue::Value(v) => {
                    let idx = params.push(v.clone());
                    sql.push_str(&self.dialect.placeholder(idx));
                }
                SetValue::Raw(expr) => sql.push_str(expr.as_str()),
            }
        }

        let where_sql = render_conditions(&self.where_conds, self.dialect, &mut params)?;
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if self.dialect.supports_mutation_limit() {
            if !self.order_by.is_empty() {
                sql.push_str(" ORDER BY ");
                sql.push_str(&render_order_by(&self.order_by, self.dialect));
            }
            if let Some(limit) = self.limit {
                let idx = params.push(Value::Int(limit));
                sql.push_str(" LIMIT ");
                sql.push_str(&self.dialect.placeholder(idx));
            }
        }

        if !self.returning.is_empty() && self.dialect.supports_returning() {
            sql.push_str(" RETURNING ");
            sql.push_str(&render_column_list(&self.returning, self.dialect));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(kind = "UPDATE", sql = %sql, args = params.len(), "built statement");
        Ok((sql, params.into_values()))
    }
}
