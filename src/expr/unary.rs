use std::fmt::Write;

use sqlexpr_derive::PostfixOperator;

use crate::{
    BoolExpr, IntoExpr, SelectStatement,
    error::Result,
    writer::{FormatContext, FormatWriter, Wrap},
};

use super::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Exists,
}

impl PrefixOp {
    pub const fn token(self) -> &'static str {
        match self {
            PrefixOp::Not => "NOT",
            PrefixOp::Exists => "EXISTS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PostfixOperator)]
pub enum PostfixOp {
    #[postfix(token = "IS TRUE")]
    IsTrue,
    #[postfix(token = "IS NOT TRUE")]
    IsNotTrue,
    #[postfix(token = "IS FALSE")]
    IsFalse,
    #[postfix(token = "IS NOT FALSE")]
    IsNotFalse,
    #[postfix(token = "IS UNKNOWN")]
    IsUnknown,
    #[postfix(token = "IS NOT UNKNOWN")]
    IsNotUnknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub(crate) operator: PrefixOp,
    pub(crate) operand: Box<Expr>,
}

impl FormatWriter for PrefixExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        let parens = wrap.parenthesize();
        if parens {
            context.open_paren()?;
        }
        context.write_token(self.operator.token())?;
        self.operand.format_writer(context, Wrap::Auto)?;
        if parens {
            context.close_paren()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub(crate) operand: Box<Expr>,
    pub(crate) operator: PostfixOp,
}

impl FormatWriter for PostfixExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        let parens = wrap.parenthesize();
        if parens {
            context.open_paren()?;
        }
        self.operand.format_writer(context, Wrap::Auto)?;
        context.write_token(self.operator.token())?;
        if parens {
            context.close_paren()?;
        }
        Ok(())
    }
}

/// Returns a representation of `NOT expr`.
pub fn not(expr: BoolExpr) -> BoolExpr {
    BoolExpr::prefix(PrefixOp::Not, expr.into_expr())
}

/// Returns a representation of `EXISTS (subquery)`.
pub fn exists(subquery: SelectStatement) -> BoolExpr {
    BoolExpr::prefix(PrefixOp::Exists, subquery.into_expr())
}

impl BoolExpr {
    /// Returns a representation of `NOT self`.
    pub fn not(self) -> BoolExpr {
        not(self)
    }
}
