use std::fmt;

use crate::{
    error::Result,
    ident::{Ident, IntoIdent},
    writer::{FormatContext, FormatWriter, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    String,
}

/// A reference to a column, owned by a table name or alias.
///
/// An empty table name renders the bare column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    table: Ident,
    name: Ident,
    ty: ColumnType,
}

impl Column {
    pub fn new<T, N>(table: T, name: N, ty: ColumnType) -> Self
    where
        T: IntoIdent,
        N: IntoIdent,
    {
        Self {
            table: table.into_ident(),
            name: name.into_ident(),
            ty,
        }
    }

    pub fn integer<T: IntoIdent, N: IntoIdent>(table: T, name: N) -> Self {
        Self::new(table, name, ColumnType::Integer)
    }

    pub fn string<T: IntoIdent, N: IntoIdent>(table: T, name: N) -> Self {
        Self::new(table, name, ColumnType::String)
    }

    pub fn table_name(&self) -> &str {
        self.table.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    pub(crate) fn with_table(mut self, table: Ident) -> Self {
        self.table = table;
        self
    }
}

impl FormatWriter for Column {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
        _wrap: Wrap,
    ) -> Result<()> {
        context.write_qualified(self.table.as_str(), self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::{dialect::Dialect, tests::format_writer};

    use super::*;

    #[test]
    fn test_qualified_column() {
        let column = Column::integer("users", "id");
        assert_eq!("users.id", format_writer(column, Dialect::Postgres));
    }

    #[test]
    fn test_bare_column() {
        let column = Column::string("", "name");
        assert_eq!("name", format_writer(column, Dialect::Postgres));
    }

    #[test]
    fn test_quoted_parts() {
        let column = Column::string("Users", "first name");
        assert_eq!("`Users`.`first name`", format_writer(column, Dialect::MySql));
    }
}
