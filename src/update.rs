use std::fmt::Write;

use indexmap::IndexMap;

use crate::{
    Raw,
    criteria::{Criteria, CriteriaBuilder},
    dialect::SharedAdapter,
    ident::{Ident, IntoIdent},
    set::{IntoSet, SetExpr},
    table::{IntoTable, Statement, TableRef},
    writer::{self, FormatContext, FormatWriter},
};

/// `UPDATE <table> SET ... [WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Update {
    adapter: SharedAdapter,
    table: TableRef,
    values: IndexMap<Ident, SetExpr>,
    criteria: CriteriaBuilder,
}

impl Update {
    pub fn new<T: IntoTable>(adapter: SharedAdapter, table: T) -> Self {
        Self {
            criteria: CriteriaBuilder::new(adapter.clone()),
            adapter,
            table: table.into_table(),
            values: IndexMap::new(),
        }
    }

    /// Replaces the assignments with `values`, keeping their order.
    pub fn set<I, C, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: IntoIdent,
        V: IntoSet,
    {
        self.values = values
            .into_iter()
            .map(|(column, value)| (column.into_ident(), value.into_set()))
            .collect();
        self
    }

    pub fn set_value<C: IntoIdent, V: IntoSet>(&mut self, column: C, value: V) -> &mut Self {
        self.values.insert(column.into_ident(), value.into_set());
        self
    }

    pub fn get_values(&self) -> &IndexMap<Ident, SetExpr> {
        &self.values
    }

    pub fn where_clause(&self) -> &CriteriaBuilder {
        &self.criteria
    }
}

impl Criteria for Update {
    fn criteria(&mut self) -> &mut CriteriaBuilder {
        &mut self.criteria
    }
}

impl FormatWriter for Update {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        context.writer.write_str("UPDATE ")?;
        self.table.write(context, false)?;
        context.writer.write_str("\n\tSET\n")?;
        for (index, (column, value)) in self.values.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(",\n")?;
            }
            context.writer.write_str("\t\t")?;
            column.format_writer(context)?;
            context.writer.write_str(" = ")?;
            value.format_writer(context)?;
        }
        context.writer.write_char('\n')?;
        if !self.criteria.is_empty() {
            context.writer.write_str("\tWHERE ")?;
            self.criteria.format_writer(context)?;
        }
        Ok(())
    }
}

impl Statement for Update {
    fn table(&self) -> &TableRef {
        &self.table
    }

    fn table_mut(&mut self) -> &mut TableRef {
        &mut self.table
    }

    fn to_sql(&self) -> Raw {
        writer::finish("update", writer::render(self, &self.adapter))
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Param, tests::mysql};

    use super::*;

    #[test]
    fn test_to_sql() {
        let mut update = Update::new(mysql(), "foo");
        update.set([("foo", "bar"), ("baz", "boo"), ("boo", "foo")]);
        let raw = update.to_sql();
        assert_eq!(
            "UPDATE `foo`\n\tSET\n\t\t`foo` = ?,\n\t\t`baz` = ?,\n\t\t`boo` = ?\n",
            raw.sql()
        );
        assert_eq!(3, raw.params().len());
    }

    #[test]
    fn test_to_sql_with_raw() {
        let raw_sql = "(SELECT `id` FROM `bar` WHERE `x` = ?)";
        let mut update = Update::new(mysql(), "foo");
        update
            .set_value("foo", "bar")
            .set_value("baz", Raw::with_params(raw_sql, [42]));
        let raw = update.to_sql();
        assert_eq!(
            format!("UPDATE `foo`\n\tSET\n\t\t`foo` = ?,\n\t\t`baz` = {raw_sql}\n"),
            raw.sql()
        );
        assert_eq!(&[Param::String("bar".into()), Param::I32(42)], raw.params());
    }

    #[test]
    fn test_to_sql_where() {
        let mut update = Update::new(mysql(), "foo");
        update
            .set([("foo", "bar")])
            .where_("baz", "=", 42)
            .where_is_null("boo");
        let raw = update.to_sql();
        assert_eq!(
            "UPDATE `foo`\n\tSET\n\t\t`foo` = ?\n\tWHERE `baz` = ? AND `boo` IS NULL",
            raw.sql()
        );
        assert_eq!(&[Param::String("bar".into()), Param::I32(42)], raw.params());
    }

    #[test]
    fn test_clone_keeps_where_independent() {
        let mut update = Update::new(mysql(), "foo");
        update.set([("a", 1)]).where_("id", "=", 1);
        let mut copy = update.clone();
        copy.where_("b", "=", 2);
        assert_eq!(1, update.where_clause().statements().len());
        assert_eq!(2, copy.where_clause().statements().len());
    }
}
