//! Statement builders for SELECT, INSERT, UPDATE, and DELETE.
//!
//! All builders start from a [`QueryBuilder`] bound to a [`Dialect`]. Clause
//! calls consume and return the builder by value, so construction chains
//! without aliasing; the terminal [`to_sql`] walks accumulated state in a
//! fixed clause order and emits dialect-correct SQL plus the ordered argument
//! list.
//!
//! ```
//! use sqlforge::{Cond, Dialect, QueryBuilder, Value};
//!
//! let qb = QueryBuilder::new(Dialect::Postgres);
//! let (sql, args) = qb
//!     .select(["id", "name"])
//!     .from("users")
//!     .and_where(Cond::eq("status", "active"))
//!     .to_sql()?;
//! assert_eq!(sql, r#"SELECT "id", "name" FROM "users" WHERE "status" = $1"#);
//! assert_eq!(args, vec![Value::from("active")]);
//! # Ok::<(), sqlforge::BuildError>(())
//! ```
//!
//! [`to_sql`]: SelectBuilder::to_sql

mod delete;
mod insert;
mod select;
mod update;


pub use delete::DeleteBuilder;
pub use insert::{InsertBuilder, InsertValue, OnConflict};
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

use crate::cond::Cond;
use crate::dialect::Dialect;
use crate::error::BuildResult;
use crate::param::Params;

/// Entry point: constructs statement builders bound to one dialect.
#[derive(Clone, Copy, Debug)]
pub struct QueryBuilder {
    dialect: Dialect,
}

impl QueryBuilder {
    /// Create a factory for the given dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// The dialect this factory hands to its builders.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Switch dialects; subsequently created builders use the new one.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Begin a SELECT statement; an empty column list renders `*`.
    pub fn select<I, S>(&self, columns: I) -> SelectBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectBuilder::new(self.dialect, columns)
    }

    /// Begin an INSERT statement targeting `table`.
    pub fn insert(&self, table: impl Into<String>) -> InsertBuilder {
        InsertBuilder::new(self.dialect, table)
    }

    /// Begin an UPDATE statement targeting `table`.
    pub fn update(&self, table: impl Into<String>) -> UpdateBuilder {
        UpdateBuilder::new(self.dialect, table)
    }

    /// Begin a DELETE statement targeting `table`.
    pub fn delete(&self, table: impl Into<String>) -> DeleteBuilder {
        DeleteBuilder::new(self.dialect, table)
    }
}

/// Join kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN
    Inner,
    /// LEFT JOIN
    Left,
    /// RIGHT JOIN
    Right,
}

impl JoinKind {
    fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum JoinTarget {
    Table(String),
    Subquery {
        query: Box<SelectBuilder>,
        alias: String,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Join {
    pub(crate) kind: JoinKind,
    pub(crate) target: JoinTarget,
    pub(crate) on: String,
}

impl Join {
    fn render(&self, dialect: Dialect, params: &mut Params) -> BuildResult<String> {
        let mut sql = format!("{} JOIN ", self.kind.as_sql());
        match &self.target {
            JoinTarget::Table(table) => sql.push_str(&dialect.escape_identifier(table)),
            JoinTarget::Subquery { query, alias } => {
                let inner = query.build(params)?;
                sql.push('(');
                sql.push_str(&inner);
                sql.push(')');
                if !alias.is_empty() {
                    sql.push_str(" AS ");
                    sql.push_str(&dialect.escape_identifier(alias));
                }
            }
        }
        sql.push_str(" ON ");
        sql.push_str(&self.on);
        Ok(sql)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct OrderBy {
    pub(crate) column: String,
    pub(crate) descending: bool,
}

impl OrderBy {
    /// Directions other than the literal tokens `ASC`/`DESC` normalize to ASC.
    pub(crate) fn new(column: impl Into<String>, direction: &str) -> Self {
        Self {
            column: column.into(),
            descending: direction == "DESC",
        }
    }
}

pub(crate) fn render_joins(
    joins: &[Join],
    dialect: Dialect,
    params: &mut Params,
    sql: &mut String,
) -> BuildResult<()> {
    for join in joins {
        sql.push(' ');
        sql.push_str(&join.render(dialect, params)?);
    }
    Ok(())
}

/// Render a condition list joined with AND, without a wrapping parenthesis.
///
/// Empty fragments (an AND/OR group with no children renders to nothing) are
/// dropped; the result may be empty, and callers must skip the clause keyword
/// when it is.
pub(crate) fn render_conditions(
    conds: &[Cond],
    dialect: Dialect,
    params: &mut Params,
) -> BuildResult<String> {
    let mut parts = Vec::with_capacity(conds.len());
    for cond in conds {
        let part = cond.render(dialect, params)?;
        if !part.is_empty() {
            parts.push(part);
        }
    }
    Ok(parts.join(" AND "))
}

pub(crate) fn render_order_by(entries: &[OrderBy], dialect: Dialect) -> String {
    let parts: Vec<String> = entries
        .iter()
        .map(|o| {
            format!(
                "{} {}",
                dialect.escape_identifier(&o.column),
                if o.descending { "DESC" } else { "ASC" }
            )
        })
        .collect();
    parts.join(", ")
}

pub(crate) fn render_column_list(columns: &[String], dialect: Dialect) -> String {
    let parts: Vec<String> = columns
        .iter()
        .map(|c| dialect.escape_identifier(c))
        .collect();
    parts.join(", ")
}
