use std::fmt::{self, Write};

use crate::{
    Raw,
    ident::{self, Ident, IntoIdent},
    writer::{FormatContext, FormatWriter},
};

/// A selected, grouped or ordered expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnExpr {
    Field(Ident),
    Raw(Raw),
}

impl FormatWriter for ColumnExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            ColumnExpr::Field(field) => field.format_writer(context),
            ColumnExpr::Raw(raw) => raw.format_writer(context),
        }
    }
}

pub trait IntoColumnExpr {
    fn into_column_expr(self) -> ColumnExpr;
}

impl IntoColumnExpr for ColumnExpr {
    fn into_column_expr(self) -> ColumnExpr {
        self
    }
}

impl IntoColumnExpr for &str {
    fn into_column_expr(self) -> ColumnExpr {
        ColumnExpr::Field(self.into_ident())
    }
}

impl IntoColumnExpr for String {
    fn into_column_expr(self) -> ColumnExpr {
        ColumnExpr::Field(self.into_ident())
    }
}

impl IntoColumnExpr for Ident {
    fn into_column_expr(self) -> ColumnExpr {
        ColumnExpr::Field(self)
    }
}

impl IntoColumnExpr for Raw {
    fn into_column_expr(self) -> ColumnExpr {
        ColumnExpr::Raw(self)
    }
}

pub trait IntoColumnExprs {
    fn into_column_exprs(self) -> Vec<ColumnExpr>;
}

impl<T: IntoColumnExpr> IntoColumnExprs for T {
    fn into_column_exprs(self) -> Vec<ColumnExpr> {
        vec![self.into_column_expr()]
    }
}

impl<T: IntoColumnExpr, const N: usize> IntoColumnExprs for [T; N] {
    fn into_column_exprs(self) -> Vec<ColumnExpr> {
        self.into_iter().map(IntoColumnExpr::into_column_expr).collect()
    }
}

impl<T: IntoColumnExpr> IntoColumnExprs for Vec<T> {
    fn into_column_exprs(self) -> Vec<ColumnExpr> {
        self.into_iter().map(IntoColumnExpr::into_column_expr).collect()
    }
}

/// An entry of the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    expr: ColumnExpr,
    alias: Option<Ident>,
}

impl Column {
    pub fn new<E: IntoColumnExpr>(expr: E) -> Self {
        Self {
            expr: expr.into_column_expr(),
            alias: None,
        }
    }

    pub fn aliased<E: IntoColumnExpr, A: IntoIdent>(expr: E, alias: A) -> Self {
        Self {
            expr: expr.into_column_expr(),
            alias: Some(alias.into_ident()),
        }
    }

    pub fn expr(&self) -> &ColumnExpr {
        &self.expr
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }
}

impl FormatWriter for Column {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.expr.format_writer(context)?;
        ident::write_alias(context, self.alias.as_ref())
    }
}

pub trait IntoColumn {
    fn into_column(self) -> Column;
}

impl IntoColumn for Column {
    fn into_column(self) -> Column {
        self
    }
}

impl IntoColumn for &str {
    fn into_column(self) -> Column {
        match ident::split_alias(self) {
            (expr, Some(alias)) => Column::aliased(expr, alias),
            (expr, None) => Column::new(expr),
        }
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Column {
        self.as_str().into_column()
    }
}

impl IntoColumn for Ident {
    fn into_column(self) -> Column {
        match self.split_alias() {
            (expr, Some(alias)) => Column::aliased(expr, alias),
            (expr, None) => Column::new(expr),
        }
    }
}

impl IntoColumn for Raw {
    fn into_column(self) -> Column {
        Column::new(self)
    }
}

impl<E: IntoColumnExpr, A: IntoIdent> IntoColumn for (E, A) {
    fn into_column(self) -> Column {
        Column::aliased(self.0, self.1)
    }
}

pub trait IntoColumns {
    fn into_columns(self) -> Vec<Column>;
}

impl<T: IntoColumn> IntoColumns for T {
    fn into_columns(self) -> Vec<Column> {
        vec![self.into_column()]
    }
}

impl<T: IntoColumn, const N: usize> IntoColumns for [T; N] {
    fn into_columns(self) -> Vec<Column> {
        self.into_iter().map(IntoColumn::into_column).collect()
    }
}

impl<T: IntoColumn> IntoColumns for Vec<T> {
    fn into_columns(self) -> Vec<Column> {
        self.into_iter().map(IntoColumn::into_column).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bind::Param,
        tests::{format_writer, mysql},
    };

    use super::*;

    #[test]
    fn test_column_plain_and_star() {
        assert_eq!("`u`.*", format_writer(&"u.*".into_column(), &mysql()).sql());
        assert_eq!("`bar`", format_writer(&"bar".into_column(), &mysql()).sql());
    }

    #[test]
    fn test_column_alias() {
        assert_eq!(
            "`bar` AS `foo`",
            format_writer(&("bar", "foo").into_column(), &mysql()).sql()
        );
        assert_eq!(
            "`bar` AS `foo`",
            format_writer(&"bar as foo".into_column(), &mysql()).sql()
        );
    }

    #[test]
    fn test_column_raw_keeps_params() {
        let column = (Raw::with_params("(SELECT MAX(`id`) FROM `t` WHERE `x` > ?)", [42]), "foo")
            .into_column();
        let raw = format_writer(&column, &mysql());
        assert_eq!("(SELECT MAX(`id`) FROM `t` WHERE `x` > ?) AS `foo`", raw.sql());
        assert_eq!(&[Param::I32(42)], raw.params());
    }

    #[test]
    fn test_into_columns() {
        assert_eq!(2, ["a", "b"].into_columns().len());
        assert_eq!(1, "a".into_columns().len());
        assert_eq!(3, vec!["a", "b", "c"].into_column_exprs().len());
    }
}
