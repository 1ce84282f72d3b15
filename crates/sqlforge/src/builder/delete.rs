//! DELETE statement builder.

use crate::builder::{
    render_column_list, render_conditions, render_joins, render_order_by, Join, JoinKind,
    JoinTarget, OrderBy,
};
use crate::cond::Cond;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::param::Params;
use crate::value::Value;

/// Builder for DELETE statements.
#[derive(Clone, Debug)]
pub struct DeleteBuilder {
    dialect: Dialect,
    table: String,
    joins: Vec<Join>,
    where_conds: Vec<Cond>,
    order_by: Vec<OrderBy>,
    limit: Option<i64>,
    returning: Vec<String>,
}

impl DeleteBuilder {
    /// Begin a DELETE targeting `table`.
    pub fn new(dialect: Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            joins: Vec::new(),
            where_conds: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            returning: Vec::new(),
        }
    }

    fn join_with(mut self, kind: JoinKind, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.joins.push(Join {
            kind,
            target: JoinTarget::Table(table.into()),
            on: on.into(),
        });
        self
    }

    /// INNER JOIN another table, typically to scope the deletion. The ON
    /// text is emitted verbatim.
    pub fn join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.join_with(JoinKind::Inner, table, on)
    }

    /// LEFT JOIN another table.
    pub fn left_join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.join_with(JoinKind::Left, table, on)
    }

    /// RIGHT JOIN another table.
    pub fn right_join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.join_with(JoinKind::Right, table, on)
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

        let mut params = Params::new();
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(&self.dialect.escape_identifier(&self.table));

        render_joins(&self.joins, self.dialect, &mut params, &mut sql)?;

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
        tracing::debug!(kind = "DELETE", sql = %sql, args = params.len(), "built statement");
        Ok((sql, params.into_values()))
    }
}
