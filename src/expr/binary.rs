use std::fmt::Write;

use sqlexpr_derive::BinaryOperator;

use crate::{
    BoolExpr, IntoExpr,
    dialect::Dialect,
    error::Result,
    writer::{FormatContext, FormatWriter, Wrap},
};

use super::{Expr, lit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, BinaryOperator)]
pub enum BinaryOp {
    #[binary(token = "=")]
    Eq,
    #[binary(token = "!=")]
    NotEq,
    #[binary(token = "<")]
    Lt,
    #[binary(token = "<=")]
    LtEq,
    #[binary(token = ">")]
    Gt,
    #[binary(token = ">=")]
    GtEq,
    #[binary(token = "IS DISTINCT FROM")]
    IsDistinctFrom,
    #[binary(token = "IS NOT DISTINCT FROM")]
    IsNotDistinctFrom,
    #[binary(token = "AND")]
    And,
    #[binary(token = "OR")]
    Or,
    #[binary(token = "REGEXP")]
    Regexp,
}

impl BinaryOp {
    /// The token written for `dialect`.
    ///
    /// Differs from [`BinaryOp::token`] only for `Regexp` on Postgres, which
    /// has no `REGEXP` operator and is written as `~` instead.
    pub fn sql(self, dialect: Dialect) -> &'static str {
        match (dialect, self) {
            // postgres has no REGEXP keyword
            (Dialect::Postgres, BinaryOp::Regexp) => "~",
            _ => self.token(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub(crate) lhs: Box<Expr>,
    pub(crate) operator: BinaryOp,
    pub(crate) rhs: Box<Expr>,
}

impl FormatWriter for BinaryExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        let parens = wrap.parenthesize();
        if parens {
            context.open_paren()?;
        }
        self.lhs.format_writer(context, Wrap::Auto)?;
        context.write_token(self.operator.sql(context.dialect))?;
        self.rhs.format_writer(context, Wrap::Auto)?;
        if parens {
            context.close_paren()?;
        }
        Ok(())
    }
}

/// Returns a representation of `lhs REGEXP 'pattern'` with the pattern as a literal.
pub fn regexp_lit<L: IntoExpr>(lhs: L, pattern: &str) -> BoolExpr {
    regexp(lhs, lit(pattern))
}
