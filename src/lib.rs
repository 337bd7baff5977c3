mod alias;
mod bind;
mod col;
mod dialect;
mod error;
mod expr;
mod ident;
mod join;
mod select;
mod table;
mod writer;

pub use alias::AliasedTable;
pub use bind::{Array, Bind, Binds, IntoBind};
pub use col::{Column, ColumnType};
pub use dialect::{Dialect, HasDialect, MySql, Postgres, Sqlite};
pub use error::{Error, Result};
pub use ident::{Ident, IntoIdent};
pub use join::{JoinTable, JoinType};
pub use select::{IntoProjection, IntoProjections, Projection, SelectStatement};
pub use table::{IntoTable, ReadableTable, Table, TableRef};
pub use writer::{Query, StatementKind};

pub use expr::{BoolExpr, Expr, IntoExpr, lit};
pub use expr::binary::{
    BinaryExpr, BinaryOp, and, eq, gt, gt_eq, is_distinct_from, is_not_distinct_from, lt, lt_eq,
    not_eq, or, regexp, regexp_lit,
};
pub use expr::case::{Case, case, case_of};
pub use expr::unary::{
    PostfixExpr, PostfixOp, PrefixExpr, PrefixOp, exists, is_false, is_not_false, is_not_true,
    is_not_unknown, is_true, is_unknown, not,
};
