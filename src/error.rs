//! Errors raised while rendering an expression tree.

use thiserror::Error;

use crate::{dialect::Dialect, writer::StatementKind};

/// Result type for rendering operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while rendering SQL.
///
/// Every error aborts the render at the first failing node. The partially
/// written buffer is discarded by the render entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A CASE expression was rendered without any WHEN/THEN pair.
    #[error("invalid case expression: at least one when/then pair is required")]
    EmptyCase,

    /// A CASE expression has a different number of WHEN and THEN branches.
    #[error("case expression mismatch: {when} when branches for {then} then branches")]
    CaseMismatch { when: usize, then: usize },

    /// A derived table was given an empty alias.
    #[error("derived table alias is empty")]
    EmptyAlias,

    /// A select statement has nothing to project.
    #[error("select statement has no projections")]
    EmptyProjection,

    /// The node cannot appear in the enclosing statement.
    #[error("{node} is not allowed in {statement:?} context")]
    UnsupportedContext {
        node: &'static str,
        statement: StatementKind,
    },

    /// More values were bound than placeholders can be numbered.
    #[error("too many bound values, at most {limit} are supported")]
    TooManyBinds { limit: u16 },

    /// The dialect has no literal for a NaN or infinite float.
    #[error("{dialect:?} cannot represent a non-finite float literal")]
    NonFiniteFloat { dialect: Dialect },

    /// The underlying writer failed.
    #[error("failed to write sql: {0}")]
    Format(#[from] std::fmt::Error),
}
