use std::fmt::Write;

use crate::{
    BoolExpr, Column, Expr, IntoExpr,
    error::{Error, Result},
    expr::case::Case,
    ident::{Ident, IntoIdent},
    table::{IntoTable, TableRef},
    writer::{FormatContext, FormatWriter, StatementKind, Wrap, impl_to_sql},
};

/// A projected expression with an optional `AS` alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    expr: Expr,
    alias: Option<Ident>,
}

impl Projection {
    pub fn new<E: IntoExpr>(expr: E) -> Self {
        Self {
            expr: expr.into_expr(),
            alias: None,
        }
    }

    pub fn as_<A: IntoIdent>(mut self, alias: A) -> Self {
        self.alias = Some(alias.into_ident());
        self
    }
}

impl FormatWriter for Projection {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, _wrap: Wrap) -> Result<()> {
        self.expr.format_writer(context, Wrap::Auto)?;
        if let Some(ref alias) = self.alias {
            context.write_token("AS")?;
            context.write_ident(alias.as_str())?;
        }
        Ok(())
    }
}

macro_rules! impl_projection_alias {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                /// Projects `self` under `alias`.
                pub fn as_<A: IntoIdent>(self, alias: A) -> Projection {
                    Projection::new(self).as_(alias)
                }
            }
        )+
    };
}

impl_projection_alias!(Expr, BoolExpr, Column, Case);

pub trait IntoProjection {
    fn into_projection(self) -> Projection;
}

impl IntoProjection for Projection {
    fn into_projection(self) -> Projection {
        self
    }
}

impl<T> IntoProjection for T
where
    T: IntoExpr,
{
    fn into_projection(self) -> Projection {
        Projection::new(self)
    }
}

pub trait IntoProjections {
    fn into_projections(self) -> Vec<Projection>;
}

impl<T> IntoProjections for T
where
    T: IntoProjection,
{
    fn into_projections(self) -> Vec<Projection> {
        vec![self.into_projection()]
    }
}

impl<T> IntoProjections for Vec<T>
where
    T: IntoProjection,
{
    fn into_projections(self) -> Vec<Projection> {
        self.into_iter().map(IntoProjection::into_projection).collect()
    }
}

impl<T, const N: usize> IntoProjections for [T; N]
where
    T: IntoProjection,
{
    fn into_projections(self) -> Vec<Projection> {
        self.into_iter().map(IntoProjection::into_projection).collect()
    }
}

/// A minimal `SELECT ... FROM ... WHERE ...`.
///
/// Rendered as a root it is bare; nested anywhere else it parenthesizes itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    distinct: bool,
    projections: Vec<Projection>,
    maybe_table: Option<TableRef>,
    maybe_where: Option<BoolExpr>,
}

impl SelectStatement {
    pub fn new<P: IntoProjections>(projections: P) -> Self {
        Self {
            distinct: false,
            projections: projections.into_projections(),
            maybe_table: None,
            maybe_where: None,
        }
    }

    pub fn from<T: IntoTable>(mut self, table: T) -> Self {
        self.maybe_table = Some(table.into_table());
        self
    }

    pub fn add_select<P: IntoProjections>(mut self, projections: P) -> Self {
        self.projections.extend(projections.into_projections());
        self
    }

    /// Adds a condition, joined with `AND` to any previous one.
    pub fn where_clause(mut self, condition: BoolExpr) -> Self {
        self.maybe_where = Some(match self.maybe_where.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

impl FormatWriter for SelectStatement {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        if self.projections.is_empty() {
            return Err(Error::EmptyProjection);
        }

        context.with_statement(StatementKind::Select, |context| {
            let parens = wrap.parenthesize();
            if parens {
                context.open_paren()?;
            }
            context.write_token("SELECT")?;
            if self.distinct {
                context.write_token("DISTINCT")?;
            }
            for (index, projection) in self.projections.iter().enumerate() {
                if index > 0 {
                    context.write_comma()?;
                }
                projection.format_writer(context, Wrap::Auto)?;
            }
            if let Some(ref table) = self.maybe_table {
                context.write_token("FROM")?;
                table.format_writer(context, Wrap::NoWrap)?;
            }
            if let Some(ref condition) = self.maybe_where {
                context.write_token("WHERE")?;
                condition.format_writer(context, Wrap::NoWrap)?;
            }
            if parens {
                context.close_paren()?;
            }
            Ok(())
        })
    }
}

impl_to_sql!(SelectStatement, StatementKind::Select);
