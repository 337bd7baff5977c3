//! Expression trees and their rendering.
//!
//! Every node kind is a variant of [`Expr`] and rendering is dispatched from
//! a single `match`. Composite operator nodes parenthesize themselves unless
//! the parent asks for [`Wrap::NoWrap`]; leaves never do.

use std::fmt::Write;

use crate::{
    Column, SelectStatement,
    bind::{Bind, IntoBind},
    error::Result,
    writer::{BindMode, FormatContext, FormatWriter, StatementKind, Wrap, impl_to_sql},
};

use binary::{BinaryExpr, BinaryOp};
use case::Case;
use unary::{PostfixExpr, PostfixOp, PrefixExpr, PrefixOp};

pub mod binary;
pub mod case;
pub mod unary;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Bind),
    Column(Column),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Postfix(PostfixExpr),
    Case(Box<Case>),
    /// A select in scalar position, always parenthesized.
    Subquery(Box<SelectStatement>),
}

impl FormatWriter for Expr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        match self {
            Expr::Literal(bind) => match context.mode {
                BindMode::Inline => bind.format_writer(context, wrap),
                BindMode::Placeholder => context.write_placeholder(bind.clone()),
            },
            Expr::Column(column) => column.format_writer(context, wrap),
            Expr::Binary(binary) => binary.format_writer(context, wrap),
            Expr::Prefix(prefix) => prefix.format_writer(context, wrap),
            Expr::Postfix(postfix) => postfix.format_writer(context, wrap),
            Expr::Case(case) => case.format_writer(context, wrap),
            Expr::Subquery(select) => select.format_writer(context, Wrap::Auto),
        }
    }
}

/// An expression valid in predicate position: WHERE, JOIN ON, NOT, IS TRUE.
///
/// Only comparison and logical constructors produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr(Expr);

impl BoolExpr {
    pub(crate) fn binary(lhs: Expr, operator: BinaryOp, rhs: Expr) -> Self {
        Self(Expr::Binary(BinaryExpr {
            lhs: Box::new(lhs),
            operator,
            rhs: Box::new(rhs),
        }))
    }

    pub(crate) fn prefix(operator: PrefixOp, operand: Expr) -> Self {
        Self(Expr::Prefix(PrefixExpr {
            operator,
            operand: Box::new(operand),
        }))
    }

    pub(crate) fn postfix(operand: Expr, operator: PostfixOp) -> Self {
        Self(Expr::Postfix(PostfixExpr {
            operand: Box::new(operand),
            operator,
        }))
    }
}

impl FormatWriter for BoolExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        self.0.format_writer(context, wrap)
    }
}

impl From<BoolExpr> for Expr {
    fn from(value: BoolExpr) -> Self {
        value.0
    }
}

impl_to_sql!(Expr, StatementKind::Expression);
impl_to_sql!(BoolExpr, StatementKind::Expression);

pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for BoolExpr {
    fn into_expr(self) -> Expr {
        self.0
    }
}

impl IntoExpr for Column {
    fn into_expr(self) -> Expr {
        Expr::Column(self)
    }
}

impl IntoExpr for &Column {
    fn into_expr(self) -> Expr {
        Expr::Column(self.clone())
    }
}

impl IntoExpr for Case {
    fn into_expr(self) -> Expr {
        Expr::Case(Box::new(self))
    }
}

impl IntoExpr for SelectStatement {
    fn into_expr(self) -> Expr {
        Expr::Subquery(Box::new(self))
    }
}

impl<T> IntoExpr for T
where
    T: IntoBind,
{
    fn into_expr(self) -> Expr {
        Expr::Literal(self.into_bind())
    }
}

/// Wraps a value as a literal expression.
pub fn lit<T: IntoBind>(value: T) -> Expr {
    Expr::Literal(value.into_bind())
}

#[cfg(test)]
mod tests {
    use crate::{Postgres, ReadableTable, Table, eq, gt, is_true, lit, not};

    use super::*;

    fn users() -> Table {
        Table::new("public", "users").int_column("id").string_column("name")
    }

    #[test]
    fn test_literal_root() {
        assert_eq!("'bob'", lit("bob").to_sql::<Postgres>().unwrap());
        assert_eq!("NULL", lit(None::<i64>).to_sql::<Postgres>().unwrap());
    }

    #[test]
    fn test_scalar_subquery_is_wrapped() {
        let users = users();
        let sub = users.clone().select(users.column("id").unwrap());
        let expr = eq(users.column("id").unwrap(), sub);
        assert_eq!(
            "users.id = (SELECT users.id FROM public.users)",
            expr.to_sql::<Postgres>().unwrap()
        );
    }

    #[test]
    fn test_render_twice_is_identical() {
        let users = users();
        let expr = not(is_true(gt(users.column("id").unwrap(), 10)));
        let first = expr.to_sql::<Postgres>().unwrap();
        let second = expr.to_sql::<Postgres>().unwrap();
        assert_eq!(first, second);
        assert_eq!("NOT ((users.id > 10) IS TRUE)", first);
    }

    #[test]
    fn test_build_collects_binds() {
        let users = users();
        let expr = eq(users.column("name").unwrap(), "bob").and(gt(users.column("id").unwrap(), 3));
        let query = expr.build::<Postgres>().unwrap();
        assert_eq!("(users.name = $1) AND (users.id > $2)", query.sql);
        assert_eq!(
            vec![Bind::String("bob".into()), Bind::I32(3)],
            query.binds.into_vec()
        );
    }
}
