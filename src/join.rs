use std::fmt::Write;

use kriteria_derive::or_variant;

use crate::{
    Raw,
    criteria::{Criteria, CriteriaBuilder},
    dialect::SharedAdapter,
    expr::{Criterion, IntoValue, Joiner},
    ident::IntoIdent,
    operator::IntoOperator,
    table::{IntoTable, TableRef},
    writer::{self, FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    LeftOuter,
    RightOuter,
}

impl JoinKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::LeftOuter => "LEFT OUTER",
            JoinKind::RightOuter => "RIGHT OUTER",
        }
    }
}

impl FormatWriter for JoinKind {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

/// One `<KIND> JOIN <table> ON <criteria>` clause.
///
/// The ON criteria accept every [`Criteria`] method; `on` and `on_or` are
/// shorthands for `where_` and `where_or`. A join without any ON criteria
/// renders as `<KIND> JOIN <table>`, with no dangling `ON`.
#[derive(Debug, Clone)]
pub struct JoinBuilder {
    kind: JoinKind,
    table: TableRef,
    criteria: CriteriaBuilder,
}

impl JoinBuilder {
    pub fn new<T: IntoTable>(adapter: SharedAdapter, table: T, kind: JoinKind) -> Self {
        Self {
            kind,
            table: table.into_table(),
            criteria: CriteriaBuilder::new(adapter),
        }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn on_clause(&self) -> &CriteriaBuilder {
        &self.criteria
    }

    #[or_variant]
    pub fn on<K, O, V>(&mut self, key: K, operator: O, value: V) -> &mut Self
    where
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.criteria
            .append(Criterion::field(key, operator, value, Joiner::And));
        self
    }

    /// Renders the clause; the table params come before the ON params.
    pub fn to_sql(&self) -> Raw {
        writer::render(self, self.criteria.adapter())
    }
}

impl Criteria for JoinBuilder {
    fn criteria(&mut self) -> &mut CriteriaBuilder {
        &mut self.criteria
    }
}

impl FormatWriter for JoinBuilder {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        self.kind.format_writer(context)?;
        context.writer.write_str(" JOIN ")?;
        self.table.write(context, false)?;
        if !self.criteria.is_empty() {
            context.writer.write_str(" ON ")?;
            self.criteria.format_writer(context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Param, expr::Value, tests::mysql};

    use super::*;

    fn join<T: IntoTable>(table: T) -> JoinBuilder {
        JoinBuilder::new(mysql(), table, JoinKind::Inner)
    }

    #[test]
    fn test_on_adds_criteria() {
        let mut builder = join("foo_join");
        builder.on("foo", "bar", "baz").on_or("foo", "bar", "baz");
        let statements = builder.on_clause().statements();
        assert!(statements[0].key().is_field("foo"));
        assert_eq!(Some("bar"), statements[0].operator());
        assert_eq!(&Value::Scalar(Param::String("baz".into())), statements[0].value());
        assert_eq!(Joiner::And, statements[0].joiner());
        assert_eq!(Joiner::Or, statements[1].joiner());
    }

    #[test]
    fn test_to_sql_simple() {
        let mut builder = join("foo_join");
        builder.on("bar", "=", 42);
        let raw = builder.to_sql();
        assert_eq!("INNER JOIN `foo_join` ON `bar` = ?", raw.sql());
        assert_eq!(&[Param::I32(42)], raw.params());
    }

    #[test]
    fn test_to_sql_alias() {
        let mut builder = join(("foo_join", "fj"));
        builder.on("bar", "=", 42);
        assert_eq!("INNER JOIN `foo_join` AS `fj` ON `bar` = ?", builder.to_sql().sql());
    }

    #[test]
    fn test_to_sql_on_raw() {
        let mut builder = join("foo_join");
        builder.where_raw("`bar` = `baz`");
        let raw = builder.to_sql();
        assert_eq!("INNER JOIN `foo_join` ON `bar` = `baz`", raw.sql());
        assert!(raw.params().is_empty());
    }

    #[test]
    fn test_to_sql_on_raw_sub_select() {
        let mut builder = join(Raw::with_params(
            "(SELECT * FROM `bar_join` WHERE `id` = ?) AS `foo_join`",
            [2],
        ));
        builder.on("bar", "=", 42);
        let raw = builder.to_sql();
        assert_eq!(
            "INNER JOIN (SELECT * FROM `bar_join` WHERE `id` = ?) AS `foo_join` ON `bar` = ?",
            raw.sql()
        );
        assert_eq!(&[Param::I32(2), Param::I32(42)], raw.params());
    }

    #[test]
    fn test_kinds_and_columns() {
        let mut builder = JoinBuilder::new(mysql(), "roles as r", JoinKind::LeftOuter);
        builder
            .where_columns_equals("r.user_id", "u.id")
            .on_or("r.name", "IN", ["admin", "owner"]);
        let raw = builder.to_sql();
        assert_eq!(
            "LEFT OUTER JOIN `roles` AS `r` ON `r`.`user_id` = `u`.`id` OR `r`.`name` IN (?, ?)",
            raw.sql()
        );
        assert_eq!(2, raw.params().len());
    }

    #[test]
    fn test_empty_on_is_omitted() {
        let builder = JoinBuilder::new(mysql(), "bar", JoinKind::Right);
        assert_eq!("RIGHT JOIN `bar`", builder.to_sql().sql());
    }
}
