//! Derived tables: a select exposed under an alias in an outer query.
//!
//! The projection list of the wrapped statement is never inspected. Columns
//! are minted on demand with the alias as their owner, and nothing checks
//! that the inner select actually produces them.

use std::fmt::Write;

use smol_str::{SmolStr, format_smolstr};

use crate::{
    Column, SelectStatement,
    col::ColumnType,
    error::{Error, Result},
    ident::{Ident, IntoIdent},
    table::ReadableTable,
    writer::{FormatContext, FormatWriter, StatementKind, Wrap},
};

#[derive(Debug, Clone, PartialEq)]
pub struct AliasedTable {
    statement: Box<SelectStatement>,
    alias: Ident,
}

impl SelectStatement {
    /// Wraps the statement as a derived table named `alias`.
    pub fn as_table<A: IntoIdent>(self, alias: A) -> AliasedTable {
        AliasedTable {
            statement: Box::new(self),
            alias: alias.into_ident(),
        }
    }
}

impl AliasedTable {
    pub fn alias(&self) -> &str {
        self.alias.as_str()
    }

    pub fn ref_int_column_name<N: IntoIdent>(&self, name: N) -> Column {
        self.reference(name.into_ident(), ColumnType::Integer)
    }

    pub fn ref_string_column_name<N: IntoIdent>(&self, name: N) -> Column {
        self.reference(name.into_ident(), ColumnType::String)
    }

    /// References `column` as projected by the inner select.
    ///
    /// The new name is `table.column` taken verbatim from `column`, so this
    /// only resolves when the inner projection is aliased to that compound
    /// name, e.g. `users.id AS "users.id"`.
    pub fn ref_int_column(&self, column: &Column) -> Column {
        self.reference(Ident::new(compound_name(column)), ColumnType::Integer)
    }

    /// See [`AliasedTable::ref_int_column`].
    pub fn ref_string_column(&self, column: &Column) -> Column {
        self.reference(Ident::new(compound_name(column)), ColumnType::String)
    }

    fn reference(&self, name: Ident, ty: ColumnType) -> Column {
        tracing::trace!(alias = %self.alias, column = %name, "derived table column reference");
        Column::new(self.alias.clone(), name, ty)
    }
}

fn compound_name(column: &Column) -> SmolStr {
    format_smolstr!("{}.{}", column.table_name(), column.name())
}

impl ReadableTable for AliasedTable {
    fn schema_name(&self) -> &str {
        ""
    }

    fn table_name(&self) -> &str {
        self.alias.as_str()
    }

    fn columns(&self) -> Vec<Column> {
        Vec::new()
    }
}

impl FormatWriter for AliasedTable {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, _wrap: Wrap) -> Result<()> {
        if self.alias.is_empty() {
            return Err(Error::EmptyAlias);
        }
        // a select always renders its FROM in Select context, so this only
        // fires for a context built outside one
        if context.statement != StatementKind::Select {
            return Err(Error::UnsupportedContext {
                node: "derived table",
                statement: context.statement,
            });
        }
        // the select parenthesizes itself when nested
        self.statement.format_writer(context, Wrap::Auto)?;
        context.write_token("AS")?;
        context.write_ident(self.alias.as_str())
    }
}
