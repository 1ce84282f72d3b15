//! INSERT statement builder.

use crate::builder::{render_column_list, SelectBuilder};
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::param::Params;
use crate::value::{RawExpr, Value};

/// One item in a VALUES row: a parameterized value or a raw expression.
#[derive(Clone, Debug)]
pub enum InsertValue {
    /// Parameterized: one placeholder, one argument.
    Value(Value),
    /// Spliced verbatim: no placeholder, no argument.
    Raw(RawExpr),
}

impl From<Value> for InsertValue {
    fn from(v: Value) -> Self {
        InsertValue::Value(v)
    }
}

impl From<RawExpr> for InsertValue {
    fn from(e: RawExpr) -> Self {
        InsertValue::Raw(e)
    }
}

/// ON CONFLICT directive: optional target plus DO NOTHING or DO UPDATE.
///
/// DO UPDATE assignments are an explicitly ordered list, so placeholder and
/// column pairing is deterministic. With neither action set, a bare
/// `ON CONFLICT` clause is emitted.
#[derive(Clone, Debug, Default)]
pub struct OnConflict {
    target: Option<String>,
    do_nothing: bool,
    do_update: Vec<(String, Value)>,
}

impl OnConflict {
    /// Bare ON CONFLICT with no action.
    pub fn new() -> Self {
        Self::default()
    }

    /// ON CONFLICT … DO NOTHING.
    pub fn do_nothing() -> Self {
        Self {
            do_nothing: true,
            ..Self::default()
        }
    }

    /// ON CONFLICT … DO UPDATE SET, assignments applied in list order.
    pub fn do_update<C, V>(assignments: impl IntoIterator<Item = (C, V)>) -> Self
    where
        C: Into<String>,
        V: Into<Value>,
    {
        Self {
            do_update: assignments
                .into_iter()
                .map(|(c, v)| (c.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Set the conflict target column or constraint.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Builder for INSERT statements.
///
/// Exactly one insertion mode must be selected per statement: VALUES rows,
/// FROM-SELECT, or DEFAULT VALUES.
#[derive(Clone, Debug)]
pub struct InsertBuilder {
    dialect: Dialect,
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<InsertValue>>,
    use_defaults: bool,
    from_select: Option<Box<SelectBuilder>>,
    conflict: Option<OnConflict>,
    returning: Vec<String>,
}

impl InsertBuilder {
    /// Begin an INSERT targeting `table`.
    pub fn new(dialect: Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            use_defaults: false,
            from_select: None,
            conflict: None,
            returning: Vec::new(),
        }
    }

    /// Declare the column list; every VALUES row must match its arity.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one VALUES row. Call repeatedly for a multi-row batch.
    pub fn values<I, T>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<InsertValue>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Insert the result of a SELECT instead of explicit rows.
    pub fn from_select(mut self, query: SelectBuilder) -> Self {
        self.from_select = Some(Box::new(query));
        self
    }

    /// Use `DEFAULT VALUES` instead of explicit rows.
    pub fn default_values(mut self) -> Self {
        self.use_defaults = true;
        self
    }

    /// Attach an ON CONFLICT directive.
    pub fn on_conflict(mut self, conflict: OnConflict) -> Self {
        self.conflict = Some(conflict);
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

    fn validate(&self) -> BuildResult<()> {
        if self.table.is_empty() {
            return Err(BuildError::MissingTable);
        }

        let mut modes = 0;
        if !self.rows.is_empty() {
            modes += 1;
        }
        if self.from_select.is_some() {
            modes += 1;
        }
        if self.use_defaults {
            modes += 1;
        }
        if modes == 0 {
            return Err(BuildError::MissingInsertSource);
        }
        if modes > 1 {
            return Err(BuildError::ConflictingInsertSources);
        }

        if !self.columns.is_empty() {
            for row in &self.rows {
                if row.len() != self.columns.len() {
                    return Err(BuildError::ValueCountMismatch {
                        expected: self.columns.len(),
                        actual: row.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Render the statement, returning SQL text and arguments in placeholder
    /// order.
    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        self.validate()?;
        let mut params = Params::new();
        let mut sql = String::from("INSERT INTO ");
        sql.push_str(&self.dialect.escape_identifier(&self.table));

        if !self.columns.is_empty() && !self.use_defaults {
            sql.push_str(" (");
            sql.push_str(&render_column_list(&self.columns, self.dialect));
            sql.push(')');
        }

        if self.use_defaults {
            sql.push_str(" DEFAULT VALUES");
        } else if let Some(query) = &self.from_select {
            sql.push(' ');
            sql.push_str(&query.build(&mut params)?);
        } else {
            sql.push_str(" VALUES ");
            for (row_idx, row) in self.rows.iter().enumerate() {
                if row_idx > 0 {
                    sql.push_str(", ");
                }
                sql.push('(');
                for (i, item) in row.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    match item {
                        InsertValue::Value(value) => {
                            let idx = params.push(value.clone());
                            sql.push_str(&self.dialect.placeholder(idx));
                        }
                        InsertValue::Raw(expr) => sql.push_str(expr.as_str()),
                    }
                }
                sql.push(')');
            }
        }

        if let Some(conflict) = &self.conflict {
            sql.push_str(" ON CONFLICT");
            if let Some(target) = &conflict.target {
                sql.push_str(" (");
                sql.push_str(&self.dialect.escape_identifier(target));
                sql.push(')');
            }
            if conflict.do_nothing {
                sql.push_str(" DO NOTHING");
            } else if !conflict.do_update.is_empty() {
                sql.push_str(" DO UPDATE SET ");
                for (i, (column, value)) in conflict.do_update.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    sql.push_str(&self.dialect.escape_identifier(column));
                    sql.push_str(" = ");
                    let idx = params.push(value.clone());
                    sql.push_str(&self.dialect.placeholder(idx));
                }
            }
        }

        if !self.returning.is_empty() && self.dialect.supports_returning() {
            sql.push_str(" RETURNING ");
            sql.push_str(&render_column_list(&self.returning, self.dialect));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(kind = "INSERT", sql = %sql, args = params.len(), "built statement");
        Ok((sql, params.into_values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::QueryBuilder;
    use crate::cond::Cond;
    use crate::value::raw;

    fn qb() -> QueryBuilder {
        QueryBuilder::new(Dialect::Postgres)
    }

    #[test]
    fn single_row_insert() {
        let (sql, args) = qb()
            .insert("people")
            .columns(["id", "name"])
            .values([Value::from(1), Value::from("Ana")])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"people\" (\"id\", \"name\") VALUES ($1, $2)"
        );
        assert_eq!(args, vec![Value::Int(1), Value::Text("Ana".into())]);
    }

    #[test]
    fn multi_row_batch_numbers_across_rows() {
        let (sql, args) = qb()
            .insert("t")
            .columns(["a", "b"])
            .values([Value::from(1), Value::from(2)])
            .values([Value::from(3), Value::from(4)])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"t\" (\"a\", \"b\") VALUES ($1, $2), ($3, $4)"
        );
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn raw_expression_splices_without_placeholder() {
        let (sql, args) = qb()
            .insert("t")
            .columns(["name", "created_at"])
            .values([InsertValue::from(Value::from("x")), InsertValue::from(raw("NOW()"))])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"t\" (\"name\", \"created_at\") VALUES ($1, NOW())"
        );
        assert_eq!(args, vec![Value::Text("x".into())]);
    }

    #[test]
    fn default_values_omits_column_list() {
        let (sql, args) = qb()
            .insert("audit_log")
            .columns(["id"])
            .default_values()
            .to_sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO \"audit_log\" DEFAULT VALUES");
        assert!(args.is_empty());
    }

    #[test]
    fn from_select_shares_the_counter() {
        let sel = qb()
            .select(["id", "name"])
            .from("staging")
            .and_where(Cond::eq("ready", true));
        let (sql, args) = qb()
            .insert("people")
            .columns(["id", "name"])
            .from_select(sel)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"people\" (\"id\", \"name\") \
             SELECT \"id\", \"name\" FROM \"staging\" WHERE \"ready\" = $1"
        );
        assert_eq!(args, vec![Value::Bool(true)]);
    }

    #[test]
    fn zero_modes_is_an_error() {
        let err = qb().insert("t").to_sql().unwrap_err();
        assert_eq!(err, BuildError::MissingInsertSource);
    }

    #[test]
    fn conflicting_modes_is_an_error() {
        let sel = qb().select(["id"]).from("s");
        let err = qb()
            .insert("t")
            .values([Value::from(1)])
            .from_select(sel)
            .to_sql()
            .unwrap_err();
        assert_eq!(err, BuildError::ConflictingInsertSources);
    }

    #[test]
    fn arity_mismatch_names_both_counts() {
        let err = qb()
            .insert("t")
            .columns(["a", "b"])
            .values([Value::from(1)])
            .to_sql()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::ValueCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "number of values (1) doesn't match columns (2)"
        );
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = qb().insert("").values([Value::from(1)]).to_sql().unwrap_err();
        assert_eq!(err, BuildError::MissingTable);
    }

    #[test]
    fn on_conflict_do_nothing() {
        let (sql, _) = qb()
            .insert("users")
            .columns(["username"])
            .values([Value::from("alice")])
            .on_conflict(OnConflict::do_nothing().target("username"))
            .to_sql()
            .unwrap();
        assert!(sql.ends_with("ON CONFLICT (\"username\") DO NOTHING"));
    }

    #[test]
    fn on_conflict_do_update_preserves_order_and_counter() {
        let (sql, args) = qb()
            .insert("users")
            .columns(["username", "email"])
            .values([Value::from("alice"), Value::from("a@x.io")])
            .on_conflict(OnConflict::do_update([
                ("email", "a@x.io"),
                ("verified", "no"),
            ])
            .target("username"))
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"users\" (\"username\", \"email\") VALUES ($1, $2) \
             ON CONFLICT (\"username\") DO UPDATE SET \"email\" = $3, \"verified\" = $4"
        );
        assert_eq!(args.len(), 4);
        assert_eq!(args[2], Value::Text("a@x.io".into()));
        assert_eq!(args[3], Value::Text("no".into()));
    }

    #[test]
    fn bare_on_conflict_without_action() {
        let (sql, _) = qb()
            .insert("t")
            .values([Value::from(1)])
            .on_conflict(OnConflict::new())
            .to_sql()
            .unwrap();
        assert!(sql.ends_with("VALUES ($1) ON CONFLICT"));
    }

    #[test]
    fn returning_is_dialect_gated() {
        let build = |dialect: Dialect| {
            QueryBuilder::new(dialect)
                .insert("users")
                .columns(["username"])
                .values([Value::from("alice")])
                .returning(["id"])
                .to_sql()
                .unwrap()
        };
        let (pg, _) = build(Dialect::Postgres);
        assert!(pg.ends_with(" RETURNING \"id\""));
        let (my, _) = build(Dialect::MySql);
        assert!(!my.contains("RETURNING"));
    }
}
