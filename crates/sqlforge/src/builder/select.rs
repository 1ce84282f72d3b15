//! SELECT statement builder.

use crate::builder::{
    render_column_list, render_conditions, render_joins, render_order_by, Join, JoinKind,
    JoinTarget, OrderBy,
};
use crate::cond::Cond;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::param::Params;
use crate::value::Value;

#[derive(Clone, Debug)]
enum FromTarget {
    Table(String),
    Subquery {
        query: Box<SelectBuilder>,
        alias: String,
    },
}

/// Builder for SELECT statements.
///
/// Clause calls accumulate state in any order; [`to_sql`](Self::to_sql)
/// renders in one fixed sequence: SELECT list, FROM, JOINs, WHERE, GROUP BY,
/// HAVING, ORDER BY, LIMIT, OFFSET.
#[derive(Clone, Debug)]
pub struct SelectBuilder {
    dialect: Dialect,
    distinct: bool,
    columns: Vec<String>,
    from: Option<FromTarget>,
    joins: Vec<Join>,
    where_conds: Vec<Cond>,
    group_by: Vec<String>,
    having: Vec<Cond>,
    order_by: Vec<OrderBy>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl SelectBuilder {
    /// Begin a SELECT with the given column list (empty renders `*`).
    pub fn new<I, S>(dialect: Dialect, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dialect,
            distinct: false,
            columns: columns.into_iter().map(Into::into).collect(),
            from: None,
            joins: Vec::new(),
            where_conds: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Select FROM a plain table.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from = Some(FromTarget::Table(table.into()));
        self
    }

    /// Select FROM a parenthesized subquery; the alias is emitted as
    /// `AS alias` when non-empty.
    pub fn from_subquery(mut self, query: SelectBuilder, alias: impl Into<String>) -> Self {
        self.from = Some(FromTarget::Subquery {
            query: Box::new(query),
            alias: alias.into(),
        });
        self
    }

    /// Emit DISTINCT immediately after the SELECT keyword.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Append a WHERE condition (conditions are ANDed together).
    pub fn and_where(mut self, cond: Cond) -> Self {
        self.where_conds.push(cond);
        self
    }

    /// Add an INNER JOIN.
    pub fn join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.push_join(JoinKind::Inner, JoinTarget::Table(table.into()), on)
    }

    /// Add a LEFT JOIN.
    pub fn left_join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.push_join(JoinKind::Left, JoinTarget::Table(table.into()), on)
    }

    /// Add a RIGHT JOIN.
    pub fn right_join(self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.push_join(JoinKind::Right, JoinTarget::Table(table.into()), on)
    }

    /// Add an INNER JOIN against an aliased subquery.
    ///
    /// The alias names the subquery in the ON clause; joins against an
    /// unaliased subquery are not addressable there.
    pub fn join_subquery(
        self,
        query: SelectBuilder,
        alias: impl Into<String>,
        on: impl Into<String>,
    ) -> Self {
        self.push_subquery_join(JoinKind::Inner, query, alias, on)
    }

    /// Add a LEFT JOIN against an aliased subquery.
    pub fn left_join_subquery(
        self,
        query: SelectBuilder,
        alias: impl Into<String>,
        on: impl Into<String>,
    ) -> Self {
        self.push_subquery_join(JoinKind::Left, query, alias, on)
    }

    /// Add a RIGHT JOIN against an aliased subquery.
    pub fn right_join_subquery(
        self,
        query: SelectBuilder,
        alias: impl Into<String>,
        on: impl Into<String>,
    ) -> Self {
        self.push_subquery_join(JoinKind::Right, query, alias, on)
    }

    fn push_join(mut self, kind: JoinKind, target: JoinTarget, on: impl Into<String>) -> Self {
        self.joins.push(Join {
            kind,
            target,
            on: on.into(),
        });
        self
    }

    fn push_subquery_join(
        self,
        kind: JoinKind,
        query: SelectBuilder,
        alias: impl Into<String>,
        on: impl Into<String>,
    ) -> Self {
        self.push_join(
            kind,
            JoinTarget::Subquery {
                query: Box::new(query),
                alias: alias.into(),
            },
            on,
        )
    }

    /// Append GROUP BY columns.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append a HAVING condition (conditions are ANDed together).
    pub fn having(mut self, cond: Cond) -> Self {
        self.having.push(cond);
        self
    }

    /// Append an ORDER BY entry; directions other than `ASC`/`DESC`
    /// normalize to ASC.
    pub fn order_by(mut self, column: impl Into<String>, direction: &str) -> Self {
        self.order_by.push(OrderBy::new(column, direction));
        self
    }

    /// Set LIMIT; the bound is parameterized, consuming one placeholder.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set OFFSET; the bound is parameterized, consuming one placeholder.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render the statement, returning SQL text and arguments in placeholder
    /// order. A fresh counter is used per call, so repeated renders of an
    /// unmutated builder are identical.
    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        let mut params = Params::new();
        let sql = self.build(&mut params)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = "SELECT", sql = %sql, args = params.len(), "built statement");
        Ok((sql, params.into_values()))
    }

    /// Render into a shared accumulator; used directly when this builder is
    /// embedded as a subquery so placeholder numbering stays global.
    pub(crate) fn build(&self, params: &mut Params) -> BuildResult<String> {
        let Some(from) = &self.from else {
            return Err(BuildError::MissingFrom);
        };

        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&render_column_list(&self.columns, self.dialect));
        }

        sql.push_str(" FROM ");
        match from {
            FromTarget::Table(table) => sql.push_str(&self.dialect.escape_identifier(table)),
            FromTarget::Subquery { query, alias } => {
                let inner = query.build(params)?;
                sql.push('(');
                sql.push_str(&inner);
                sql.push(')');
                if !alias.is_empty() {
                    sql.push_str(" AS ");
                    sql.push_str(&self.dialect.escape_identifier(alias));
                }
            }
        }

        render_joins(&self.joins, self.dialect, params, &mut sql)?;

        let where_sql = render_conditions(&self.where_conds, self.dialect, params)?;
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&render_column_list(&self.group_by, self.dialect));
        }

        let having_sql = render_conditions(&self.having, self.dialect, params)?;
        if !having_sql.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&having_sql);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&render_order_by(&self.order_by, self.dialect));
        }

        if let Some(limit) = self.limit {
            let idx = params.push(Value::Int(limit));
            sql.push_str(" LIMIT ");
            sql.push_str(&self.dialect.placeholder(idx));
        }

        if let Some(offset) = self.offset {
            let idx = params.push(Value::Int(offset));
            sql.push_str(" OFFSET ");
            sql.push_str(&self.dialect.placeholder(idx));
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::QueryBuilder;

    fn qb() -> QueryBuilder {
        QueryBuilder::new(Dialect::Postgres)
    }

    #[test]
    fn empty_column_list_renders_star() {
        let (sql, args) = qb().select(Vec::<String>::new()).from("users").to_sql().unwrap();
        assert_eq!(sql, "SELECT * FROM \"users\"");
        assert!(args.is_empty());
    }

    #[test]
    fn columns_are_escaped() {
        let (sql, _) = qb().select(["id", "name"]).from("users").to_sql().unwrap();
        assert_eq!(sql, "SELECT \"id\", \"name\" FROM \"users\"");
    }

    #[test]
    fn distinct_follows_select_keyword() {
        let (sql, _) = qb().select(["city"]).distinct().from("users").to_sql().unwrap();
        assert_eq!(sql, "SELECT DISTINCT \"city\" FROM \"users\"");
    }

    #[test]
    fn missing_from_is_an_error() {
        let err = qb().select(["id"]).to_sql().unwrap_err();
        assert_eq!(err, BuildError::MissingFrom);
    }

    #[test]
    fn joins_render_in_order() {
        let (sql, _) = qb()
            .select(["u.id"])
            .from("users")
            .join("orders", "u.id = o.user_id")
            .left_join("payments", "o.id = p.order_id")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT \"u.id\" FROM \"users\" INNER JOIN \"orders\" ON u.id = o.user_id \
             LEFT JOIN \"payments\" ON o.id = p.order_id"
        );
    }

    #[test]
    fn group_by_and_having_share_the_counter() {
        let (sql, args) = qb()
            .select(["user_id"])
            .from("orders")
            .and_where(Cond::eq("status", "paid"))
            .group_by(["user_id"])
            .having(Cond::gt("total", 100))
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT \"user_id\" FROM \"orders\" WHERE \"status\" = $1 \
             GROUP BY \"user_id\" HAVING \"total\" > $2"
        );
        assert_eq!(args, vec![Value::Text("paid".into()), Value::Int(100)]);
    }

    #[test]
    fn order_direction_normalizes_to_asc() {
        let (sql, _) = qb()
            .select(["id"])
            .from("t")
            .order_by("a", "DESC")
            .order_by("b", "ASC")
            .order_by("c", "sideways")
            .to_sql()
            .unwrap();
        assert!(sql.ends_with("ORDER BY \"a\" DESC, \"b\" ASC, \"c\" ASC"));
    }

    #[test]
    fn limit_and_offset_are_parameterized() {
        let (sql, args) = qb()
            .select(["id"])
            .from("t")
            .and_where(Cond::eq("x", 1))
            .limit(10)
            .offset(20)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT \"id\" FROM \"t\" WHERE \"x\" = $1 LIMIT $2 OFFSET $3"
        );
        assert_eq!(args, vec![Value::Int(1), Value::Int(10), Value::Int(20)]);
    }

    #[test]
    fn from_subquery_with_alias() {
        let inner = qb().select(["id"]).from("users").and_where(Cond::eq("active", true));
        let (sql, args) = qb()
            .select(["id"])
            .from_subquery(inner, "u")
            .and_where(Cond::gt("id", 5))
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT \"id\" FROM (SELECT \"id\" FROM \"users\" WHERE \"active\" = $1) AS \"u\" \
             WHERE \"id\" > $2"
        );
        assert_eq!(args, vec![Value::Bool(true), Value::Int(5)]);
    }

    #[test]
    fn subquery_join_requires_alias_for_emission() {
        let sub = qb().select(["user_id", "total"]).from("orders");
        let (sql, _) = qb()
            .select(["u.id"])
            .from("users")
            .join_subquery(sub.clone(), "o", "u.id = o.user_id")
            .to_sql()
            .unwrap();
        assert!(sql.contains("INNER JOIN (SELECT"));
        assert!(sql.contains(") AS \"o\" ON u.id = o.user_id"));

        // Empty alias: no AS clause.
        let (sql, _) = qb()
            .select(["u.id"])
            .from("users")
            .join_subquery(sub, "", "1 = 1")
            .to_sql()
            .unwrap();
        assert!(!sql.contains(" AS "));
    }

    #[test]
    fn nested_missing_from_propagates() {
        let inner = qb().select(["id"]); // no FROM
        let err = qb().select(["id"]).from_subquery(inner, "x").to_sql().unwrap_err();
        assert_eq!(err, BuildError::MissingFrom);
    }

    #[test]
    fn renders_identically_twice() {
        let builder = qb()
            .select(["id"])
            .from("t")
            .and_where(Cond::between("n", 1, 9))
            .limit(3);
        let first = builder.to_sql().unwrap();
        let second = builder.to_sql().unwrap();
        assert_eq!(first, second);
    }
}
