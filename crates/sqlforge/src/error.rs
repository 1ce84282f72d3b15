//! Error types for sqlforge.

use thiserror::Error;

/// Result type alias for statement rendering.
pub type BuildResult<T> = Result<T, BuildError>;

/// Structural misconfiguration detected while rendering a statement.
///
/// All errors surface at `to_sql` time, never while chaining clause calls.
/// Malformed predicate values never produce an error; only missing or
/// conflicting statement structure does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// SELECT without a table or subquery in FROM.
    #[error("no table or subquery specified for FROM clause")]
    MissingFrom,

    /// INSERT/UPDATE/DELETE without a target table.
    #[error("no table specified")]
    MissingTable,

    /// INSERT with none of VALUES, FROM-SELECT, or DEFAULT VALUES.
    #[error("no values, select query, or DEFAULT VALUES specified")]
    MissingInsertSource,

    /// INSERT with more than one of VALUES, FROM-SELECT, DEFAULT VALUES.
    #[error("cannot specify multiple insertion methods (VALUES, FROM SELECT, DEFAULT VALUES)")]
    ConflictingInsertSources,

    /// A VALUES row whose arity disagrees with the declared column list.
    #[error("number of values ({actual}) doesn't match columns ({expected})")]
    ValueCountMismatch {
        /// Declared column count.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// UPDATE with no SET assignments.
    #[error("no set values specified")]
    MissingSet,
}
