//! SQL dialect strategy: placeholder syntax, identifier quoting, string
//! escaping, and capability flags per database family.
//!
//! A [`Dialect`] is a stateless `Copy` value; one per target database family,
//! shared freely across any number of builders.

/// One supported database family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// MySQL / MariaDB: `?` placeholders, backtick identifiers.
    MySql,
    /// PostgreSQL: `$n` placeholders, double-quoted identifiers.
    Postgres,
    /// SQLite: `?` placeholders, double-quoted identifiers.
    Sqlite,
    /// Microsoft SQL Server: `@pn` placeholders, bracketed identifiers.
    SqlServer,
    /// Oracle: `:n` placeholders, double-quoted identifiers.
    Oracle,
}

impl Dialect {
    /// Render the placeholder token for the parameter at `index`.
    ///
    /// `index` is the 0-based position of the parameter in the statement's
    /// argument list; numbered dialects emit 1-based text (`$1`, `@p1`, `:1`),
    /// sequential dialects emit a fixed marker regardless of position.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
            Dialect::Postgres => format!("${}", index + 1),
            Dialect::SqlServer => format!("@p{}", index + 1),
            Dialect::Oracle => format!(":{}", index + 1),
        }
    }

    /// Quote an identifier, doubling any embedded quote character.
    ///
    /// This is quote-doubling only, not injection protection: never pass
    /// untrusted table or column names.
    pub fn escape_identifier(&self, ident: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", ident.replace('`', "``")),
            Dialect::SqlServer => format!("[{}]", ident.replace(']', "]]")),
            Dialect::Postgres | Dialect::Sqlite | Dialect::Oracle => {
                format!("\"{}\"", ident.replace('"', "\"\""))
            }
        }
    }

    /// Render a string literal with `''` doubling.
    ///
    /// Values flowing through builders are always parameterized; this exists
    /// for callers that need an inline literal (for raw expressions, say).
    pub fn escape_string(&self, value: &str) -> String {
        let body = value.replace('\'', "''");
        match self {
            Dialect::SqlServer => format!("N'{body}'"),
            _ => format!("'{body}'"),
        }
    }

    /// Whether ORDER BY / LIMIT are valid on UPDATE and DELETE statements.
    ///
    /// Builders silently omit the clause (and its argument) when unsupported.
    pub fn supports_mutation_limit(&self) -> bool {
        matches!(self, Dialect::MySql | Dialect::Sqlite)
    }

    /// Whether RETURNING is valid on INSERT/UPDATE/DELETE statements.
    ///
    /// Builders silently omit the clause when unsupported.
    pub fn supports_returning(&self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Sqlite)
    }
}
