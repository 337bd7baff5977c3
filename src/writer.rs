use std::{
    fmt::{self, Write},
    ops::Deref,
};

use crate::{
    bind::{Bind, Binds},
    dialect::Dialect,
    error::{Error, Result},
};

/// The kind of statement the node is rendered inside of.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    #[default]
    Select,
    /// A standalone expression with no enclosing statement.
    Expression,
}

/// Parenthesization requested by the parent node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wrap {
    #[default]
    Auto,
    NoWrap,
}

impl Wrap {
    #[inline]
    pub(crate) fn parenthesize(self) -> bool {
        matches!(self, Wrap::Auto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindMode {
    /// Literals are written as SQL literals.
    Inline,
    /// Literals become placeholders and their values are collected.
    Placeholder,
}

/// Rendered SQL with the values bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub binds: Binds,
}

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap)
    -> Result<()>;
}

pub(crate) struct FormatContext<'a, W: Write> {
    writer: &'a mut W,
    pub(crate) dialect: Dialect,
    pub(crate) statement: StatementKind,
    pub(crate) mode: BindMode,
    pub(crate) placeholder: u16,
    binds: Binds,
    // next token needs a separating space
    pending: bool,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, dialect: Dialect, statement: StatementKind, mode: BindMode) -> Self {
        Self {
            writer,
            dialect,
            statement,
            mode,
            placeholder: 0,
            binds: Binds::None,
            pending: false,
        }
    }

    fn separate(&mut self) -> fmt::Result {
        if self.pending {
            self.writer.write_char(' ')?;
        }
        Ok(())
    }

    pub(crate) fn write_token(&mut self, token: &str) -> Result<()> {
        self.separate()?;
        self.writer.write_str(token)?;
        self.pending = true;
        Ok(())
    }

    pub(crate) fn write_display<T: fmt::Display>(&mut self, value: T) -> Result<()> {
        self.separate()?;
        write!(self.writer, "{}", value)?;
        self.pending = true;
        Ok(())
    }

    pub(crate) fn open_paren(&mut self) -> Result<()> {
        self.separate()?;
        self.writer.write_char('(')?;
        self.pending = false;
        Ok(())
    }

    pub(crate) fn close_paren(&mut self) -> Result<()> {
        self.writer.write_char(')')?;
        self.pending = true;
        Ok(())
    }

    pub(crate) fn write_comma(&mut self) -> Result<()> {
        self.writer.write_char(',')?;
        self.pending = true;
        Ok(())
    }

    /// Writes `qualifier.name` as a single token, or `name` when the qualifier is empty.
    pub(crate) fn write_qualified(&mut self, qualifier: &str, name: &str) -> Result<()> {
        self.separate()?;
        if !qualifier.is_empty() {
            self.write_ident_part(qualifier)?;
            self.writer.write_char('.')?;
        }
        self.write_ident_part(name)?;
        self.pending = true;
        Ok(())
    }

    pub(crate) fn write_ident(&mut self, ident: &str) -> Result<()> {
        self.write_qualified("", ident)
    }

    pub(crate) fn write_string_literal(&mut self, value: &str) -> Result<()> {
        self.separate()?;
        match self.dialect {
            Dialect::MySql => self.write_mysql_string(value)?,
            Dialect::Postgres | Dialect::Sqlite => self.write_escaped(value, '\'')?,
        }
        self.pending = true;
        Ok(())
    }

    /// Fails once the placeholder counter is exhausted, whatever the dialect.
    pub(crate) fn write_placeholder(&mut self, bind: Bind) -> Result<()> {
        self.placeholder = self
            .placeholder
            .checked_add(1)
            .ok_or(Error::TooManyBinds { limit: u16::MAX })?;
        self.separate()?;
        match self.dialect {
            Dialect::Postgres => write!(self.writer, "${}", self.placeholder)?,
            Dialect::MySql => self.writer.write_char('?')?,
            Dialect::Sqlite => write!(self.writer, "?{}", self.placeholder)?,
        }
        self.binds.push(bind);
        self.pending = true;
        Ok(())
    }

    /// Renders `f` with `statement` as the enclosing statement kind.
    pub(crate) fn with_statement<F>(&mut self, statement: StatementKind, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let outer = std::mem::replace(&mut self.statement, statement);
        let result = f(self);
        self.statement = outer;
        result
    }

    pub(crate) fn take_binds(&mut self) -> Binds {
        std::mem::take(&mut self.binds)
    }

    fn write_ident_part(&mut self, part: &str) -> fmt::Result {
        if part == "*" || is_bare_ident(part) {
            return self.writer.write_str(part);
        }
        let quote = self.dialect.quote();
        self.write_escaped(part, quote)
    }

    // backslash starts an escape inside mysql strings under the default sql_mode
    fn write_mysql_string(&mut self, text: &str) -> fmt::Result {
        self.writer.write_char('\'')?;
        for char in text.chars() {
            match char {
                '\'' => self.writer.write_str("''")?,
                '\\' => self.writer.write_str("\\\\")?,
                '\0' => self.writer.write_str("\\0")?,
                _ => self.writer.write_char(char)?,
            }
        }
        self.writer.write_char('\'')
    }

    fn write_escaped(&mut self, text: &str, quote: char) -> fmt::Result {
        self.writer.write_char(quote)?;
        // duplicate the quote if present
        let mut last = 0;
        for (index, char) in text.char_indices() {
            if char == quote {
                if index != last {
                    self.writer.write_str(&text[last..index])?;
                }
                self.writer.write_char(quote)?;
                self.writer.write_char(quote)?;
                last = index + char.len_utf8();
            }
        }

        // write trailing slice
        if last < text.len() {
            self.writer.write_str(&text[last..])?;
        }

        self.writer.write_char(quote)
    }
}

/// Identifiers that every dialect accepts unquoted.
fn is_bare_ident(part: &str) -> bool {
    let mut bytes = part.bytes();
    match bytes.next() {
        Some(b'a'..=b'z' | b'_') => {}
        _ => return false,
    }
    bytes.all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_'))
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        self.deref().format_writer(context, wrap)
    }
}

pub(crate) fn render<T>(
    node: &T,
    dialect: Dialect,
    statement: StatementKind,
    mode: BindMode,
) -> Result<Query>
where
    T: FormatWriter,
{
    let mut sql = String::with_capacity(64);
    let mut context = FormatContext::new(&mut sql, dialect, statement, mode);
    let outcome = node.format_writer(&mut context, Wrap::NoWrap);
    let binds = context.take_binds();

    match outcome {
        Ok(()) => {
            tracing::debug!(?dialect, len = sql.len(), binds = binds.len(), "rendered sql");
            Ok(Query { sql, binds })
        }
        Err(error) => {
            tracing::debug!(?dialect, %error, "failed to render sql");
            Err(error)
        }
    }
}

/// Adds `to_sql` and `build` entry points to a root node type.
macro_rules! impl_to_sql {
    ($ty:ty, $statement:expr) => {
        impl $ty {
            /// Renders the tree with literals inlined.
            pub fn to_sql<D: $crate::HasDialect>(&self) -> $crate::Result<String> {
                $crate::writer::render(
                    self,
                    D::DIALECT,
                    $statement,
                    $crate::writer::BindMode::Inline,
                )
                .map(|query| query.sql)
            }

            /// Renders the tree with placeholders and returns the bound values.
            pub fn build<D: $crate::HasDialect>(&self) -> $crate::Result<$crate::Query> {
                $crate::writer::render(
                    self,
                    D::DIALECT,
                    $statement,
                    $crate::writer::BindMode::Placeholder,
                )
            }
        }
    };
}

pub(crate) use impl_to_sql;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_ident() {
        assert!(is_bare_ident("users"));
        assert!(is_bare_ident("_id2"));
        assert!(!is_bare_ident("Users"));
        assert!(!is_bare_ident("2x"));
        assert!(!is_bare_ident("users.id"));
        assert!(!is_bare_ident(""));
    }

    #[test]
    fn test_token_spacing() {
        let mut sql = String::new();
        let mut context =
            FormatContext::new(&mut sql, Dialect::Postgres, StatementKind::Select, BindMode::Inline);
        context.open_paren().unwrap();
        context.write_token("CASE").unwrap();
        context.write_ident("a").unwrap();
        context.write_comma().unwrap();
        context.write_qualified("t", "b c").unwrap();
        context.write_token("END").unwrap();
        context.close_paren().unwrap();
        context.write_token("AS").unwrap();
        assert_eq!("(CASE a, t.\"b c\" END) AS", sql);
    }

    #[test]
    fn test_quote_escape() {
        let mut sql = String::new();
        let mut context =
            FormatContext::new(&mut sql, Dialect::MySql, StatementKind::Select, BindMode::Inline);
        context.write_ident("us`ers").unwrap();
        context.write_string_literal("it's").unwrap();
        assert_eq!("`us``ers` 'it''s'", sql);
    }

    #[test]
    fn test_mysql_string_backslash() {
        let mut sql = String::new();
        let mut context =
            FormatContext::new(&mut sql, Dialect::MySql, StatementKind::Select, BindMode::Inline);
        context.write_string_literal("\\' OR 1=1 -- ").unwrap();
        context.write_string_literal("a\0b\\").unwrap();
        assert_eq!("'\\\\'' OR 1=1 -- ' 'a\\0b\\\\'", sql);
    }

    #[test]
    fn test_backslash_is_plain_outside_mysql() {
        let mut sql = String::new();
        let mut context =
            FormatContext::new(&mut sql, Dialect::Postgres, StatementKind::Select, BindMode::Inline);
        context.write_string_literal("\\'").unwrap();
        assert_eq!("'\\'''", sql);
    }

    #[test]
    fn test_placeholder_counter_exhausted() {
        let mut sql = String::new();
        let mut context =
            FormatContext::new(&mut sql, Dialect::MySql, StatementKind::Select, BindMode::Placeholder);
        context.placeholder = u16::MAX - 1;
        context.write_placeholder(Bind::I32(1)).unwrap();
        assert_eq!(
            Err(Error::TooManyBinds { limit: u16::MAX }),
            context.write_placeholder(Bind::I32(2))
        );
        assert_eq!(1, context.take_binds().len());
    }

    #[test]
    fn test_placeholders() {
        let mut sql = String::new();
        let mut context =
            FormatContext::new(&mut sql, Dialect::Sqlite, StatementKind::Select, BindMode::Placeholder);
        context.write_placeholder(Bind::I32(1)).unwrap();
        context.write_placeholder(Bind::Bool(true)).unwrap();
        assert_eq!(2, context.take_binds().len());
        assert_eq!("?1 ?2", sql);
    }
}
