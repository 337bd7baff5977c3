use std::fmt::Write;

use crate::{
    BoolExpr, Column,
    error::Result,
    table::{IntoTable, ReadableTable, TableRef},
    writer::{FormatContext, FormatWriter, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub const fn token(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

/// Two tables combined by a join, usable wherever a table is.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTable {
    lhs: TableRef,
    ty: JoinType,
    rhs: TableRef,
    maybe_on: Option<BoolExpr>,
}

impl JoinTable {
    pub(crate) fn join<L, R>(ty: JoinType, lhs: L, rhs: R, maybe_on: Option<BoolExpr>) -> TableRef
    where
        L: IntoTable,
        R: IntoTable,
    {
        TableRef::Join(Box::new(Self {
            lhs: lhs.into_table(),
            ty,
            rhs: rhs.into_table(),
            maybe_on,
        }))
    }
}

impl ReadableTable for JoinTable {
    /// The schema of the leftmost table.
    fn schema_name(&self) -> &str {
        self.lhs.schema_name()
    }

    fn table_name(&self) -> &str {
        ""
    }

    fn columns(&self) -> Vec<Column> {
        let mut columns = self.lhs.columns();
        columns.extend(self.rhs.columns());
        columns
    }
}

impl FormatWriter for JoinTable {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>, _wrap: Wrap) -> Result<()> {
        self.lhs.format_writer(context, Wrap::NoWrap)?;
        context.write_token(self.ty.token())?;
        // left-deep chains need no grouping, a nested join on the right does
        if let TableRef::Join(ref rhs) = self.rhs {
            context.open_paren()?;
            rhs.format_writer(context, Wrap::NoWrap)?;
            context.close_paren()?;
        } else {
            self.rhs.format_writer(context, Wrap::NoWrap)?;
        }
        if let Some(ref on) = self.maybe_on {
            context.write_token("ON")?;
            on.format_writer(context, Wrap::NoWrap)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{MySql, Postgres, Table, eq, lit};

    use super::*;

    fn users() -> Table {
        Table::new("", "users").int_column("id").string_column("name")
    }

    fn orders() -> Table {
        Table::new("", "orders").int_column("id").int_column("user_id")
    }

    fn items() -> Table {
        Table::new("", "items").int_column("order_id")
    }

    #[test]
    fn test_join_kinds() {
        let (users, orders) = (users(), orders());
        let on = eq(users.column("id").unwrap(), orders.column("user_id").unwrap());
        let cases = [
            (users.clone().inner_join(&orders, on.clone()), "users INNER JOIN orders ON users.id = orders.user_id"),
            (users.clone().left_join(&orders, on.clone()), "users LEFT JOIN orders ON users.id = orders.user_id"),
            (users.clone().right_join(&orders, on.clone()), "users RIGHT JOIN orders ON users.id = orders.user_id"),
            (users.clone().full_join(&orders, on), "users FULL JOIN orders ON users.id = orders.user_id"),
            (users.clone().cross_join(&orders), "users CROSS JOIN orders"),
        ];
        for (table, expected) in cases {
            let sql = table.select(lit(1)).to_sql::<Postgres>().unwrap();
            assert_eq!(format!("SELECT 1 FROM {}", expected), sql);
        }
    }

    #[test]
    fn test_join_chain() {
        let (users, orders, items) = (users(), orders(), items());
        let joined = users
            .clone()
            .inner_join(&orders, eq(users.column("id").unwrap(), orders.column("user_id").unwrap()))
            .left_join(&items, eq(orders.column("id").unwrap(), items.column("order_id").unwrap()));
        assert_eq!("", joined.table_name());
        assert_eq!("", joined.schema_name());
        let scoped = Table::new("app", "users").cross_join(&orders);
        assert_eq!("app", scoped.schema_name());
        assert_eq!("", orders.clone().cross_join(Table::new("app", "users")).schema_name());
        assert_eq!(5, joined.columns().len());
        let sql = joined.select(users.column("name").unwrap()).to_sql::<MySql>().unwrap();
        assert_eq!(
            "SELECT users.name FROM users INNER JOIN orders ON users.id = orders.user_id LEFT JOIN items ON orders.id = items.order_id",
            sql
        );
    }

    #[test]
    fn test_nested_join_on_right() {
        let (users, orders, items) = (users(), orders(), items());
        let inner = orders
            .clone()
            .inner_join(&items, eq(orders.column("id").unwrap(), items.column("order_id").unwrap()));
        let joined = users
            .clone()
            .cross_join(inner);
        let sql = joined.select(lit(1)).to_sql::<Postgres>().unwrap();
        assert_eq!(
            "SELECT 1 FROM users CROSS JOIN (orders INNER JOIN items ON orders.id = items.order_id)",
            sql
        );
    }

    #[test]
    fn test_join_derived_table() {
        let (users, orders) = (users(), orders());
        let totals = orders
            .clone()
            .select(orders.column("user_id").unwrap().clone().as_("user_id"))
            .as_table("t");
        let user_id = totals.ref_int_column_name("user_id");
        let joined = totals.inner_join(&users, eq(&user_id, users.column("id").unwrap()));
        let sql = joined.select(&user_id).to_sql::<Postgres>().unwrap();
        assert_eq!(
            "SELECT t.user_id FROM (SELECT orders.user_id AS user_id FROM orders) AS t INNER JOIN users ON t.user_id = users.id",
            sql
        );
    }
}
