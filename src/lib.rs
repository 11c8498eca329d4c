//! Fluent SQL query builder.
//!
//! Statements are assembled through chained `&mut self` calls and rendered
//! into a [`Raw`]: SQL text with `?` placeholders plus the params bound to
//! them, in placeholder order. Nothing is executed.
//!
//! ```
//! use kriteria::{Dialect, QueryBuilder, prelude::*};
//!
//! let query = QueryBuilder::new(Dialect::MySql);
//! let mut select = query.select("users");
//! select
//!     .where_("foo", "=", "bar")
//!     .where_or("baz", "<", 5);
//! assert_eq!(
//!     "SELECT *\n\tFROM `users`\n\tWHERE `foo` = ? OR `baz` < ?\n",
//!     select.to_sql().sql()
//! );
//! ```

mod bind;
mod col;
mod criteria;
mod delete;
mod dialect;
mod error;
mod expr;
mod ident;
mod insert;
mod join;
mod operator;
mod query;
mod raw;
mod select;
mod set;
mod table;
mod update;
mod writer;

pub use bind::{IntoParam, IntoParams, Param, Params};
pub use col::{Column, ColumnExpr, IntoColumn, IntoColumnExpr, IntoColumnExprs, IntoColumns};
pub use criteria::{Criteria, CriteriaBuilder};
pub use delete::Delete;
pub use dialect::{Adapter, Dialect, SharedAdapter, sanitize_field};
pub use error::{Error, Result};
pub use expr::{Criterion, Group, IntoValue, Joiner, Key, Value};
pub use ident::{Ident, IntoIdent, split_alias};
pub use insert::Insert;
pub use join::{JoinBuilder, JoinKind};
pub use operator::{IntoOperator, Operator};
pub use query::QueryBuilder;
pub use raw::{IntoRaw, Raw};
pub use select::{Direction, OrderBy, Select};
pub use set::{IntoSet, SetExpr};
pub use table::{IntoTable, IntoTableName, Statement, TableName, TableRef};
pub use update::Update;

/// Traits needed to call the builder methods.
pub mod prelude {
    pub use crate::criteria::Criteria;
    pub use crate::table::Statement;
}

pub fn ident_static(value: &'static str) -> Ident {
    Ident::new_static(value)
}

pub fn ident(value: &str) -> Ident {
    Ident::new(value)
}

pub fn raw(value: &str) -> Raw {
    Raw::new(value)
}

pub fn raw_with<P: IntoParams>(value: &str, params: P) -> Raw {
    Raw::with_params(value, params)
}
