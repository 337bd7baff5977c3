//! `CASE ... WHEN ... THEN ... ELSE ... END`.
//!
//! [`Case`] is a by-value accumulator: `when` and `then` append
//! unconditionally and `else_` overwrites. Pairing is only checked when the
//! expression is rendered, so an invalid CASE can be built and passed around;
//! rendering it returns [`Error::EmptyCase`] or [`Error::CaseMismatch`].

use std::fmt::Write;

use crate::{
    IntoExpr,
    error::{Error, Result},
    writer::{FormatContext, FormatWriter, StatementKind, Wrap, impl_to_sql},
};

use super::Expr;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Case {
    subject: Option<Expr>,
    when: Vec<Expr>,
    then: Vec<Expr>,
    otherwise: Option<Expr>,
}

/// Starts a searched `CASE WHEN cond THEN ...`.
pub fn case() -> Case {
    Case::default()
}

/// Starts a simple `CASE subject WHEN value THEN ...`.
pub fn case_of<E: IntoExpr>(subject: E) -> Case {
    Case {
        subject: Some(subject.into_expr()),
        ..Case::default()
    }
}

impl Case {
    pub fn when<E: IntoExpr>(mut self, condition: E) -> Self {
        self.when.push(condition.into_expr());
        self
    }

    pub fn then<E: IntoExpr>(mut self, result: E) -> Self {
        self.then.push(result.into_expr());
        self
    }

    /// Sets the ELSE branch, replacing any previous one.
    pub fn else_<E: IntoExpr>(mut self, result: E) -> Self {
        self.otherwise = Some(result.into_expr());
        self
    }
}

impl FormatWriter for Case {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, _wrap: Wrap) -> Result<()> {
        context.open_paren()?;
        context.write_token("CASE")?;

        // the subject renders before pairing is checked
        if let Some(ref subject) = self.subject {
            subject.format_writer(context, Wrap::Auto)?;
        }

        if self.when.is_empty() || self.then.is_empty() {
            return Err(Error::EmptyCase);
        }
        if self.when.len() != self.then.len() {
            return Err(Error::CaseMismatch {
                when: self.when.len(),
                then: self.then.len(),
            });
        }

        for (when, then) in self.when.iter().zip(&self.then) {
            context.write_token("WHEN")?;
            when.format_writer(context, Wrap::NoWrap)?;
            context.write_token("THEN")?;
            then.format_writer(context, Wrap::NoWrap)?;
        }

        if let Some(ref otherwise) = self.otherwise {
            context.write_token("ELSE")?;
            otherwise.format_writer(context, Wrap::NoWrap)?;
        }

        context.write_token("END")?;
        context.close_paren()
    }
}

impl_to_sql!(Case, StatementKind::Expression);

#[cfg(test)]
mod tests {
    use crate::{Column, Expr, MySql, Postgres, SelectStatement, eq, gt, lit};

    use super::*;

    fn score() -> Column {
        Column::integer("exams", "score")
    }

    #[test]
    fn test_case_when_then_else() {
        let expr = case().when(gt(score(), 50)).then("pass").else_("fail");
        assert_eq!(
            "(CASE WHEN exams.score > 50 THEN 'pass' ELSE 'fail' END)",
            expr.to_sql::<Postgres>().unwrap()
        );
    }

    #[test]
    fn test_case_without_else() {
        let expr = case().when(gt(score(), 50)).then(1).when(eq(score(), 50)).then(0);
        assert_eq!(
            "(CASE WHEN exams.score > 50 THEN 1 WHEN exams.score = 50 THEN 0 END)",
            expr.to_sql::<Postgres>().unwrap()
        );
    }

    #[test]
    fn test_case_subject() {
        let expr = case_of(score()).when(100).then("perfect").else_(lit(None::<i32>));
        assert_eq!(
            "(CASE exams.score WHEN 100 THEN 'perfect' ELSE NULL END)",
            expr.to_sql::<MySql>().unwrap()
        );
    }

    #[test]
    fn test_else_overwrites() {
        let expr = case().when(gt(score(), 1)).then(1).else_(2).else_(3);
        assert_eq!(
            "(CASE WHEN exams.score > 1 THEN 1 ELSE 3 END)",
            expr.to_sql::<Postgres>().unwrap()
        );
    }

    #[test]
    fn test_case_nested_in_comparison() {
        let expr = eq(case().when(gt(score(), 1)).then(1).else_(0), 1);
        assert_eq!(
            "(CASE WHEN exams.score > 1 THEN 1 ELSE 0 END) = 1",
            expr.to_sql::<Postgres>().unwrap()
        );
    }

    #[test]
    fn test_empty_case_fails() {
        assert_eq!(Err(Error::EmptyCase), case().to_sql::<Postgres>());
        assert_eq!(Err(Error::EmptyCase), case().else_(1).to_sql::<Postgres>());
    }

    #[test]
    fn test_mismatch_fails_lazily() {
        // building is allowed, only rendering fails
        let expr = case().when(gt(score(), 1)).then(1).when(gt(score(), 2));
        assert_eq!(
            Err(Error::CaseMismatch { when: 2, then: 1 }),
            expr.to_sql::<Postgres>()
        );
        let fixed = expr.then(2);
        assert!(fixed.to_sql::<Postgres>().is_ok());
    }

    #[test]
    fn test_error_propagates_from_child() {
        let inner = case().when(gt(score(), 1));
        let outer = eq(score(), inner);
        assert_eq!(Err(Error::EmptyCase), outer.to_sql::<Postgres>());
    }

    #[test]
    fn test_subject_error_comes_first() {
        let subject = SelectStatement::new(Vec::<Expr>::new());
        assert_eq!(Err(Error::EmptyProjection), case_of(subject.clone()).to_sql::<Postgres>());
        let mismatched = case_of(subject).when(1).when(2).then(3);
        assert_eq!(Err(Error::EmptyProjection), mismatched.to_sql::<Postgres>());
        assert_eq!(Err(Error::EmptyCase), case_of(score()).to_sql::<Postgres>());
    }
}
