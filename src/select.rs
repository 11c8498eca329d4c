use std::{
    fmt::{self, Write},
    str::FromStr,
};

use kriteria_derive::or_variant;

use crate::{
    Error, Raw, Result,
    bind::Param,
    col::{Column, ColumnExpr, IntoColumnExpr, IntoColumnExprs, IntoColumns},
    criteria::{Criteria, CriteriaBuilder},
    dialect::SharedAdapter,
    expr::{Criterion, IntoValue, Joiner},
    ident::IntoIdent,
    join::{JoinBuilder, JoinKind},
    operator::IntoOperator,
    raw::IntoRaw,
    table::{IntoTable, Statement, TableRef},
    writer::{self, FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            _ => Err(Error::InvalidSortDirection {
                direction: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    expr: ColumnExpr,
    direction: Direction,
}

impl OrderBy {
    pub fn expr(&self) -> &ColumnExpr {
        &self.expr
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl FormatWriter for OrderBy {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.expr.format_writer(context)?;
        context.writer.write_char(' ')?;
        context.writer.write_str(self.direction.as_str())
    }
}

/// A SELECT statement.
///
/// Clauses are rendered in a fixed order regardless of the order the
/// methods are called in: columns, FROM, joins, WHERE, GROUP BY, HAVING,
/// ORDER BY, LIMIT. Params follow the same order.
#[derive(Debug, Clone)]
pub struct Select {
    adapter: SharedAdapter,
    table: TableRef,
    columns: Vec<Column>,
    joins: Vec<JoinBuilder>,
    criteria: CriteriaBuilder,
    group_by: Vec<ColumnExpr>,
    having: CriteriaBuilder,
    order_by: Vec<OrderBy>,
    limit_row_count: Option<u64>,
    limit_offset: Option<u64>,
}

impl Select {
    pub fn new<T: IntoTable>(adapter: SharedAdapter, table: T) -> Self {
        Self {
            table: table.into_table(),
            columns: Vec::new(),
            joins: Vec::new(),
            criteria: CriteriaBuilder::new(adapter.clone()),
            group_by: Vec::new(),
            having: CriteriaBuilder::new(adapter.clone()),
            order_by: Vec::new(),
            limit_row_count: None,
            limit_offset: None,
            adapter,
        }
    }

    /// Adds to the selected columns. Nothing selected renders `*`.
    pub fn columns<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        self.columns.extend(columns.into_columns());
        self
    }

    pub fn get_columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn set_columns<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        self.columns = columns.into_columns();
        self
    }

    /// Adds a join whose ON criteria are filled by `populate`.
    pub fn join_with<T, F>(&mut self, table: T, kind: JoinKind, populate: F) -> &mut Self
    where
        T: IntoTable,
        F: FnOnce(&mut JoinBuilder),
    {
        let mut join = JoinBuilder::new(self.adapter.clone(), table, kind);
        populate(&mut join);
        self.joins.push(join);
        self
    }

    /// `INNER JOIN <table> ON <key> <operator> ?`
    pub fn join<T, K, O, V>(&mut self, table: T, key: K, operator: O, value: V) -> &mut Self
    where
        T: IntoTable,
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.join_kind(JoinKind::Inner, table, key, operator, value)
    }

    /// `INNER JOIN <table> ON <raw>`
    pub fn join_raw<T: IntoTable, R: IntoRaw>(&mut self, table: T, on: R) -> &mut Self {
        self.join_with(table, JoinKind::Inner, |join| {
            join.where_raw(on);
        })
    }

    /// `INNER JOIN <table> ON <left> = <right>`, comparing two columns.
    pub fn join_on<T, L, R>(&mut self, table: T, left: L, right: R) -> &mut Self
    where
        T: IntoTable,
        L: IntoIdent,
        R: IntoIdent,
    {
        self.join_with(table, JoinKind::Inner, |join| {
            join.where_columns_equals(left, right);
        })
    }

    pub fn left_join<T, K, O, V>(&mut self, table: T, key: K, operator: O, value: V) -> &mut Self
    where
        T: IntoTable,
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.join_kind(JoinKind::Left, table, key, operator, value)
    }

    pub fn right_join<T, K, O, V>(&mut self, table: T, key: K, operator: O, value: V) -> &mut Self
    where
        T: IntoTable,
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.join_kind(JoinKind::Right, table, key, operator, value)
    }

    pub fn left_outer_join<T, K, O, V>(
        &mut self,
        table: T,
        key: K,
        operator: O,
        value: V,
    ) -> &mut Self
    where
        T: IntoTable,
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.join_kind(JoinKind::LeftOuter, table, key, operator, value)
    }

    pub fn right_outer_join<T, K, O, V>(
        &mut self,
        table: T,
        key: K,
        operator: O,
        value: V,
    ) -> &mut Self
    where
        T: IntoTable,
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.join_kind(JoinKind::RightOuter, table, key, operator, value)
    }

    fn join_kind<T, K, O, V>(
        &mut self,
        kind: JoinKind,
        table: T,
        key: K,
        operator: O,
        value: V,
    ) -> &mut Self
    where
        T: IntoTable,
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.join_with(table, kind, |join| {
            join.on(key, operator, value);
        })
    }

    pub fn joins(&self) -> &[JoinBuilder] {
        &self.joins
    }

    pub fn set_joins(&mut self, joins: Vec<JoinBuilder>) -> &mut Self {
        self.joins = joins;
        self
    }

    pub fn where_clause(&self) -> &CriteriaBuilder {
        &self.criteria
    }

    pub fn group_by<C: IntoColumnExprs>(&mut self, columns: C) -> &mut Self {
        self.group_by.extend(columns.into_column_exprs());
        self
    }

    pub fn get_group_by(&self) -> &[ColumnExpr] {
        &self.group_by
    }

    pub fn set_group_by<C: IntoColumnExprs>(&mut self, columns: C) -> &mut Self {
        self.group_by = columns.into_column_exprs();
        self
    }

    #[or_variant]
    pub fn having<K, O, V>(&mut self, key: K, operator: O, value: V) -> &mut Self
    where
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.having
            .append(Criterion::field(key, operator, value, Joiner::And));
        self
    }

    #[or_variant]
    pub fn having_not<K, O, V>(&mut self, key: K, operator: O, value: V) -> &mut Self
    where
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.having
            .append(Criterion::field(key, operator, value, Joiner::AndNot));
        self
    }

    /// The HAVING criteria, for anything the `having` shorthands don't cover.
    pub fn having_clause(&mut self) -> &mut CriteriaBuilder {
        &mut self.having
    }

    pub fn having_statements(&self) -> &[Criterion] {
        self.having.statements()
    }

    /// Orders by each column in `columns`. `direction` must be `ASC` or
    /// `DESC`.
    pub fn order_by<C: IntoColumnExprs>(&mut self, columns: C, direction: &str) -> Result<&mut Self> {
        let direction: Direction = direction.parse()?;
        self.order_by.extend(
            columns
                .into_column_exprs()
                .into_iter()
                .map(|expr| OrderBy { expr, direction }),
        );
        Ok(self)
    }

    /// Orders by `(column, direction)` pairs, each with its own direction.
    /// Nothing is added when one of the directions is invalid.
    pub fn order_by_each<I, C, D>(&mut self, pairs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (C, D)>,
        C: IntoColumnExpr,
        D: AsRef<str>,
    {
        let order_by = pairs
            .into_iter()
            .map(|(column, direction)| -> Result<OrderBy> {
                Ok(OrderBy {
                    expr: column.into_column_expr(),
                    direction: direction.as_ref().parse()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.order_by.extend(order_by);
        Ok(self)
    }

    pub fn order_by_asc<C: IntoColumnExpr>(&mut self, column: C) -> &mut Self {
        self.order_by.push(OrderBy {
            expr: column.into_column_expr(),
            direction: Direction::Asc,
        });
        self
    }

    pub fn order_by_desc<C: IntoColumnExpr>(&mut self, column: C) -> &mut Self {
        self.order_by.push(OrderBy {
            expr: column.into_column_expr(),
            direction: Direction::Desc,
        });
        self
    }

    pub fn get_order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    /// Replaces the ordering. Left untouched when `direction` is invalid.
    pub fn set_order_by<C: IntoColumnExprs>(
        &mut self,
        columns: C,
        direction: &str,
    ) -> Result<&mut Self> {
        let direction: Direction = direction.parse()?;
        self.order_by = columns
            .into_column_exprs()
            .into_iter()
            .map(|expr| OrderBy { expr, direction })
            .collect();
        Ok(self)
    }

    /// `LIMIT [offset, ]row_count`. A `None` offset keeps the previous one.
    pub fn limit(&mut self, row_count: u64, offset: Option<u64>) -> &mut Self {
        self.limit_row_count = Some(row_count);
        if let Some(offset) = offset {
            self.limit_offset = Some(offset);
        }
        self
    }

    pub fn limit_row_count(&self) -> Option<u64> {
        self.limit_row_count
    }

    pub fn limit_offset(&self) -> Option<u64> {
        self.limit_offset
    }
}

impl Criteria for Select {
    fn criteria(&mut self) -> &mut CriteriaBuilder {
        &mut self.criteria
    }
}

impl FormatWriter for Select {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str("SELECT ")?;
        if self.columns.is_empty() {
            context.writer.write_char('*')?;
        } else {
            context.write_list(&self.columns, ", ")?;
        }

        context.writer.write_str("\n\tFROM ")?;
        self.table.write(context, true)?;
        context.writer.write_char('\n')?;

        for join in &self.joins {
            context.writer.write_char('\t')?;
            join.format_writer(context)?;
            context.writer.write_char('\n')?;
        }

        if !self.criteria.is_empty() {
            context.writer.write_str("\tWHERE ")?;
            self.criteria.format_writer(context)?;
            context.writer.write_char('\n')?;
        }

        if !self.group_by.is_empty() {
            context.writer.write_str("\tGROUP BY ")?;
            context.write_list(&self.group_by, ", ")?;
            context.writer.write_char('\n')?;
        }

        if !self.having.is_empty() {
            context.writer.write_str("\tHAVING ")?;
            self.having.format_writer(context)?;
            context.writer.write_char('\n')?;
        }

        if !self.order_by.is_empty() {
            context.writer.write_str("\tORDER BY ")?;
            context.write_list(&self.order_by, ", ")?;
            context.writer.write_char('\n')?;
        }

        if let Some(row_count) = self.limit_row_count {
            context.writer.write_str("\tLIMIT ")?;
            if let Some(offset) = self.limit_offset {
                context.writer.write_str("?, ")?;
                context.push_param(Param::U64(offset));
            }
            context.writer.write_str("?\n")?;
            context.push_param(Param::U64(row_count));
        }
        Ok(())
    }
}

impl Statement for Select {
    fn table(&self) -> &TableRef {
        &self.table
    }

    fn table_mut(&mut self) -> &mut TableRef {
        &mut self.table
    }

    fn to_sql(&self) -> Raw {
        writer::finish("select", writer::render(self, &self.adapter))
    }
}
