use std::fmt::Write;

use indexmap::IndexMap;

use crate::{
    AliasedTable, BoolExpr, Column, SelectStatement,
    col::ColumnType,
    error::Result,
    ident::{Ident, IntoIdent},
    join::{JoinTable, JoinType},
    select::IntoProjections,
    writer::{FormatContext, FormatWriter, Wrap},
};

/// Anything usable in a FROM or JOIN position.
///
/// Joining always yields a new [`TableRef`], which is itself readable, so
/// joins chain to any depth.
pub trait ReadableTable: IntoTable + Sized {
    fn schema_name(&self) -> &str;

    fn table_name(&self) -> &str;

    fn columns(&self) -> Vec<Column>;

    fn select<P: IntoProjections>(self, projections: P) -> SelectStatement {
        SelectStatement::new(projections).from(self)
    }

    fn inner_join<T: IntoTable>(self, table: T, on: BoolExpr) -> TableRef {
        JoinTable::join(JoinType::Inner, self, table, Some(on))
    }

    fn left_join<T: IntoTable>(self, table: T, on: BoolExpr) -> TableRef {
        JoinTable::join(JoinType::Left, self, table, Some(on))
    }

    fn right_join<T: IntoTable>(self, table: T, on: BoolExpr) -> TableRef {
        JoinTable::join(JoinType::Right, self, table, Some(on))
    }

    fn full_join<T: IntoTable>(self, table: T, on: BoolExpr) -> TableRef {
        JoinTable::join(JoinType::Full, self, table, Some(on))
    }

    fn cross_join<T: IntoTable>(self, table: T) -> TableRef {
        JoinTable::join(JoinType::Cross, self, table, None)
    }
}

pub trait IntoTable {
    fn into_table(self) -> TableRef;
}

/// A base table with an ordered set of known columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Ident,
    name: Ident,
    alias: Option<Ident>,
    columns: IndexMap<Ident, Column>,
}

impl Table {
    pub fn new<S, N>(schema: S, name: N) -> Self
    where
        S: IntoIdent,
        N: IntoIdent,
    {
        Self {
            schema: schema.into_ident(),
            name: name.into_ident(),
            alias: None,
            columns: IndexMap::new(),
        }
    }

    pub fn int_column<N: IntoIdent>(self, name: N) -> Self {
        self.add_column(name.into_ident(), ColumnType::Integer)
    }

    pub fn string_column<N: IntoIdent>(self, name: N) -> Self {
        self.add_column(name.into_ident(), ColumnType::String)
    }

    fn add_column(mut self, name: Ident, ty: ColumnType) -> Self {
        let owner = self.alias.clone().unwrap_or_else(|| self.name.clone());
        let column = Column::new(owner, name.clone(), ty);
        self.columns.insert(name, column);
        self
    }

    /// Renames the table and rebinds every column to the alias.
    pub fn as_<A: IntoIdent>(mut self, alias: A) -> Self {
        let alias = alias.into_ident();
        for column in self.columns.values_mut() {
            *column = column.clone().with_table(alias.clone());
        }
        self.alias = Some(alias);
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_ref().map(Ident::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(&Ident::new(name))
    }
}

impl ReadableTable for Table {
    fn schema_name(&self) -> &str {
        self.schema.as_str()
    }

    fn table_name(&self) -> &str {
        self.name.as_str()
    }

    fn columns(&self) -> Vec<Column> {
        self.columns.values().cloned().collect()
    }
}

impl FormatWriter for Table {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, _wrap: Wrap) -> Result<()> {
        context.write_qualified(self.schema.as_str(), self.name.as_str())?;
        if let Some(ref alias) = self.alias {
            context.write_token("AS")?;
            context.write_ident(alias.as_str())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    Table(Table),
    Aliased(AliasedTable),
    Join(Box<JoinTable>),
}

impl ReadableTable for TableRef {
    fn schema_name(&self) -> &str {
        match self {
            TableRef::Table(table) => table.schema_name(),
            TableRef::Aliased(aliased) => aliased.schema_name(),
            TableRef::Join(join) => join.schema_name(),
        }
    }

    fn table_name(&self) -> &str {
        match self {
            TableRef::Table(table) => table.table_name(),
            TableRef::Aliased(aliased) => aliased.table_name(),
            TableRef::Join(join) => join.table_name(),
        }
    }

    fn columns(&self) -> Vec<Column> {
        match self {
            TableRef::Table(table) => table.columns(),
            TableRef::Aliased(aliased) => aliased.columns(),
            TableRef::Join(join) => join.columns(),
        }
    }
}

impl FormatWriter for TableRef {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, wrap: Wrap) -> Result<()> {
        match self {
            TableRef::Table(table) => table.format_writer(context, wrap),
            TableRef::Aliased(aliased) => aliased.format_writer(context, wrap),
            TableRef::Join(join) => join.format_writer(context, wrap),
        }
    }
}

impl IntoTable for TableRef {
    fn into_table(self) -> TableRef {
        self
    }
}

impl IntoTable for Table {
    fn into_table(self) -> TableRef {
        TableRef::Table(self)
    }
}

impl IntoTable for &Table {
    fn into_table(self) -> TableRef {
        TableRef::Table(self.clone())
    }
}

impl IntoTable for AliasedTable {
    fn into_table(self) -> TableRef {
        TableRef::Aliased(self)
    }
}

impl IntoTable for JoinTable {
    fn into_table(self) -> TableRef {
        TableRef::Join(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Postgres, dialect::Dialect, tests::format_writer};

    use super::*;

    #[test]
    fn test_table_columns_keep_order() {
        let users = Table::new("public", "users")
            .int_column("id")
            .string_column("name")
            .int_column("age");
        let names: Vec<String> = users.columns().iter().map(|c| c.name().to_owned()).collect();
        assert_eq!(vec!["id", "name", "age"], names);
        assert_eq!("public", users.schema_name());
        assert_eq!("users", users.table_name());
        assert_eq!(Some(&Column::integer("users", "id")), users.column("id"));
        assert_eq!(None, users.column("missing"));
    }

    #[test]
    fn test_format_table() {
        let users = Table::new("public", "users");
        assert_eq!("public.users", format_writer(users, Dialect::Postgres));
        let users = Table::new("", "Users");
        assert_eq!("\"Users\"", format_writer(users, Dialect::Postgres));
    }

    #[test]
    fn test_table_alias_rebinds_columns() {
        let users = Table::new("public", "users").int_column("id").as_("u");
        assert_eq!(Some("u"), users.alias());
        assert_eq!("u", users.column("id").unwrap().table_name());
        assert_eq!("public.users AS u", format_writer(users.clone(), Dialect::Postgres));
        let sql = users.clone().select(users.column("id").unwrap()).to_sql::<Postgres>().unwrap();
        assert_eq!("SELECT u.id FROM public.users AS u", sql);
    }
}
