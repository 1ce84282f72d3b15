//! sqlforge is a programmatic SQL builder: fluent, chainable builders for
//! SELECT, INSERT, UPDATE, and DELETE statements that render dialect-correct
//! SQL text plus a positional argument list, ready to hand to any database
//! driver.
//!
//! Supported dialects: MySQL, PostgreSQL, SQLite, SQL Server, and Oracle.
//! Every value flows through a placeholder; identifiers are escaped per
//! dialect; rendering a builder never mutates it, so the same builder can be
//! rendered repeatedly or against several dialects.
//!
//! ```
//! use sqlforge::{Cond, Dialect, QueryBuilder, Value};
//!
//! let qb = QueryBuilder::new(Dialect::Postgres);
//! let (sql, args) = qb
//!     .select(["id", "name"])
//!     .from("users")
//!     .and_where(Cond::eq("active", true))
//!     .and_where(Cond::gt("age", 18))
//!     .order_by("name", "ASC")
//!     .limit(20)
//!     .to_sql()?;
//!
//! assert_eq!(
//!     sql,
//!     "SELECT \"id\", \"name\" FROM \"users\" \
//!      WHERE \"active\" = $1 AND \"age\" > $2 \
//!      ORDER BY \"name\" ASC LIMIT $3"
//! );
//! assert_eq!(args, vec![Value::Bool(true), Value::Int(18), Value::Int(20)]);
//! # Ok::<(), sqlforge::BuildError>(())
//! ```
//!
//! Conditions compose into trees with [`Cond::and`] and [`Cond::or`]; a group
//! is parenthesized only when it holds more than one child:
//!
//! ```
//! use sqlforge::{Cond, Dialect, QueryBuilder};
//!
//! let (sql, _) = QueryBuilder::new(Dialect::MySql)
//!     .select(["id"])
//!     .from("orders")
//!     .and_where(Cond::or([
//!         Cond::eq("status", "open"),
//!         Cond::and([Cond::eq("status", "held"), Cond::is_null("assignee")]),
//!     ]))
//!     .to_sql()?;
//!
//! assert_eq!(
//!     sql,
//!     "SELECT `id` FROM `orders` WHERE \
//!      (`status` = ? OR (`status` = ? AND `assignee` IS NULL))"
//! );
//! # Ok::<(), sqlforge::BuildError>(())
//! ```

pub mod builder;
pub mod cond;
pub mod dialect;
pub mod error;
pub mod param;
pub mod value;

pub use builder::{
    DeleteBuilder, InsertBuilder, InsertValue, JoinKind, OnConflict, QueryBuilder,
    SelectBuilder, UpdateBuilder,
};
pub use cond::{Cond, Rhs};
pub use dialect::Dialect;
pub use error::{BuildError, BuildResult};
pub use param::Params;
pub use value::{raw, raw_unchecked, RawExpr, Value};
