use std::fmt::Write;

use indexmap::IndexMap;

use crate::{
    Raw,
    dialect::SharedAdapter,
    ident::{Ident, IntoIdent},
    set::{IntoSet, SetExpr},
    table::{IntoTable, Statement, TableRef},
    writer::{self, FormatContext, FormatWriter},
};

/// `INSERT INTO <table> (<columns>) VALUES (...)` for a single row.
#[derive(Debug, Clone)]
pub struct Insert {
    adapter: SharedAdapter,
    table: TableRef,
    values: IndexMap<Ident, SetExpr>,
}

impl Insert {
    pub fn new<T: IntoTable>(adapter: SharedAdapter, table: T) -> Self {
        Self {
            adapter,
            table: table.into_table(),
            values: IndexMap::new(),
        }
    }

    /// Replaces the row with `values`, keeping their order.
    pub fn values<I, C, V>(&mut self, values: I) -> &mut Self
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

    /// Sets one column, replacing its previous value in place.
    pub fn value<C: IntoIdent, V: IntoSet>(&mut self, column: C, value: V) -> &mut Self {
        self.values.insert(column.into_ident(), value.into_set());
        self
    }

    pub fn get_values(&self) -> &IndexMap<Ident, SetExpr> {
        &self.values
    }
}

impl FormatWriter for Insert {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        context.writer.write_str("INSERT INTO ")?;
        self.table.write(context, false)?;
        context.writer.write_str(" (")?;
        for (index, column) in self.values.keys().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            column.format_writer(context)?;
        }
        context.writer.write_str(")\n\tVALUES (")?;
        for (index, value) in self.values.values().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            value.format_writer(context)?;
        }
        context.writer.write_char(')')
    }
}

impl Statement for Insert {
    fn table(&self) -> &TableRef {
        &self.table
    }

    fn table_mut(&mut self) -> &mut TableRef {
        &mut self.table
    }

    fn to_sql(&self) -> Raw {
        writer::finish("insert", writer::render(self, &self.adapter))
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Param, tests::mysql};

    use super::*;

    #[test]
    fn test_to_sql() {
        let mut insert = Insert::new(mysql(), "foo_join");
        insert.values([("foo", "bar"), ("baz", "boo"), ("boo", "foo")]);
        let raw = insert.to_sql();
        assert_eq!(
            "INSERT INTO `foo_join` (`foo`, `baz`, `boo`)\n\tVALUES (?, ?, ?)",
            raw.sql()
        );
        assert_eq!(
            &[
                Param::String("bar".into()),
                Param::String("boo".into()),
                Param::String("foo".into()),
            ],
            raw.params()
        );
    }

    #[test]
    fn test_values_replace() {
        let mut insert = Insert::new(mysql(), "users");
        insert.values([("a", 1)]).values([("b", 2)]);
        assert_eq!(1, insert.get_values().len());
        assert!(insert.get_values().contains_key(&Ident::new_static("b")));
    }

    #[test]
    fn test_value_and_raw() {
        let mut insert = Insert::new(mysql(), ("users", "u"));
        insert
            .value("name", "bob")
            .value("created_at", Raw::new("NOW()"))
            .value("age", None::<i32>)
            .value("name", "alice");
        let raw = insert.to_sql();
        assert_eq!(
            "INSERT INTO `users` AS `u` (`name`, `created_at`, `age`)\n\tVALUES (?, NOW(), ?)",
            raw.sql()
        );
        assert_eq!(&[Param::String("alice".into()), Param::Null], raw.params());
    }
}
