use std::fmt::Write;

use crate::{
    Raw,
    criteria::{Criteria, CriteriaBuilder},
    dialect::SharedAdapter,
    table::{IntoTable, Statement, TableRef},
    writer::{self, FormatContext, FormatWriter},
};

/// `DELETE FROM <table> [WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Delete {
    adapter: SharedAdapter,
    table: TableRef,
    criteria: CriteriaBuilder,
}

impl Delete {
    pub fn new<T: IntoTable>(adapter: SharedAdapter, table: T) -> Self {
        Self {
            criteria: CriteriaBuilder::new(adapter.clone()),
            adapter,
            table: table.into_table(),
        }
    }

    pub fn where_clause(&self) -> &CriteriaBuilder {
        &self.criteria
    }
}

impl Criteria for Delete {
    fn criteria(&mut self) -> &mut CriteriaBuilder {
        &mut self.criteria
    }
}

impl FormatWriter for Delete {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        context.writer.write_str("DELETE FROM ")?;
        self.table.write(context, false)?;
        if !self.criteria.is_empty() {
            context.writer.write_str("\n\tWHERE ")?;
            self.criteria.format_writer(context)?;
        }
        Ok(())
    }
}

impl Statement for Delete {
    fn table(&self) -> &TableRef {
        &self.table
    }

    fn table_mut(&mut self) -> &mut TableRef {
        &mut self.table
    }

    fn to_sql(&self) -> Raw {
        writer::finish("delete", writer::render(self, &self.adapter))
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Param, tests::mysql};

    use super::*;

    #[test]
    fn test_to_sql() {
        let mut delete = Delete::new(mysql(), "foo_join");
        delete.where_("id", "=", 42);
        let raw = delete.to_sql();
        assert_eq!("DELETE FROM `foo_join`\n\tWHERE `id` = ?", raw.sql());
        assert_eq!(&[Param::I32(42)], raw.params());
    }

    #[test]
    fn test_to_sql_without_where() {
        let mut delete = Delete::new(mysql(), "foo");
        delete.alias("f");
        assert_eq!("DELETE FROM `foo` AS `f`", delete.to_sql().sql());
        assert_eq!(Some("f"), delete.alias_name().map(|alias| alias.as_str()));
    }
}
