use std::fmt::{self, Write};

use crate::{
    Raw,
    ident::{self, Ident, IntoIdent},
    writer::{FormatContext, FormatWriter},
};

/// The table a statement or join targets.
#[derive(Debug, Clone, PartialEq)]
pub enum TableName {
    /// Quoted by the adapter.
    Ident(Ident),
    /// Used as-is, typically a rendered subquery.
    Raw(Raw),
}

pub trait IntoTableName {
    fn into_table_name(self) -> TableName;
}

impl IntoTableName for TableName {
    fn into_table_name(self) -> TableName {
        self
    }
}

impl IntoTableName for &str {
    fn into_table_name(self) -> TableName {
        TableName::Ident(Ident::new(self))
    }
}

impl IntoTableName for String {
    fn into_table_name(self) -> TableName {
        TableName::Ident(Ident::new(self))
    }
}

impl IntoTableName for Ident {
    fn into_table_name(self) -> TableName {
        TableName::Ident(self)
    }
}

impl IntoTableName for Raw {
    fn into_table_name(self) -> TableName {
        TableName::Raw(self)
    }
}

/// A table name with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    name: TableName,
    alias: Option<Ident>,
}

impl TableRef {
    pub fn new<T: IntoTableName>(name: T) -> Self {
        Self {
            name: name.into_table_name(),
            alias: None,
        }
    }

    pub fn aliased<T: IntoTableName, A: IntoIdent>(name: T, alias: A) -> Self {
        Self {
            name: name.into_table_name(),
            alias: Some(alias.into_ident()),
        }
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    /// Sets the alias, replacing any previous one.
    pub fn set_alias<A: IntoIdent>(&mut self, alias: A) {
        self.alias = Some(alias.into_ident());
    }

    /// Writes `name [AS alias]`. A raw name is wrapped in parentheses when
    /// `wrap_raw` is set, as required in a FROM clause.
    pub(crate) fn write<W: Write>(
        &self,
        context: &mut FormatContext<'_, W>,
        wrap_raw: bool,
    ) -> fmt::Result {
        match self.name {
            TableName::Ident(ref name) => name.format_writer(context)?,
            TableName::Raw(ref raw) if wrap_raw => {
                context.writer.write_char('(')?;
                raw.format_writer(context)?;
                context.writer.write_char(')')?;
            }
            TableName::Raw(ref raw) => raw.format_writer(context)?,
        }
        ident::write_alias(context, self.alias.as_ref())
    }
}

impl FormatWriter for TableRef {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.write(context, false)
    }
}

/// Anything usable as a statement or join target.
///
/// Plain strings may carry their alias inline: `"users as u"`.
pub trait IntoTable {
    fn into_table(self) -> TableRef;
}

impl IntoTable for TableRef {
    #[inline(always)]
    fn into_table(self) -> TableRef {
        self
    }
}

impl IntoTable for &str {
    fn into_table(self) -> TableRef {
        match ident::split_alias(self) {
            (name, Some(alias)) => TableRef::aliased(name, alias),
            (name, None) => TableRef::new(name),
        }
    }
}

impl IntoTable for String {
    fn into_table(self) -> TableRef {
        self.as_str().into_table()
    }
}

impl IntoTable for Ident {
    fn into_table(self) -> TableRef {
        match self.split_alias() {
            (name, Some(alias)) => TableRef::aliased(name, alias),
            (name, None) => TableRef::new(name),
        }
    }
}

impl IntoTable for Raw {
    fn into_table(self) -> TableRef {
        TableRef::new(self)
    }
}

impl<T, A> IntoTable for (T, A)
where
    T: IntoTableName,
    A: IntoIdent,
{
    fn into_table(self) -> TableRef {
        TableRef::aliased(self.0, self.1)
    }
}

/// Behavior shared by the SELECT, INSERT, UPDATE and DELETE builders.
pub trait Statement {
    fn table(&self) -> &TableRef;

    fn table_mut(&mut self) -> &mut TableRef;

    /// Renders the statement and its params in placeholder order.
    fn to_sql(&self) -> Raw;

    /// Sets or replaces the alias of the target table.
    fn alias<A: IntoIdent>(&mut self, alias: A) -> &mut Self
    where
        Self: Sized,
    {
        self.table_mut().set_alias(alias);
        self
    }

    fn alias_name(&self) -> Option<&Ident> {
        self.table().alias()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bind::Param,
        tests::{format_writer, mysql, postgres},
    };

    use super::*;

    #[test]
    fn test_table_plain() {
        let raw = format_writer(&"users".into_table(), &mysql());
        assert_eq!("`users`", raw.sql());
        let raw = format_writer(&"public.users".into_table(), &postgres());
        assert_eq!("\"public\".\"users\"", raw.sql());
    }

    #[test]
    fn test_table_inline_alias() {
        let table = "users AS u".into_table();
        assert_eq!(Some(&Ident::new_static("u")), table.alias());
        assert_eq!("`users` AS `u`", format_writer(&table, &mysql()).sql());
    }

    #[test]
    fn test_table_pair() {
        let table = ("foo_join", "fj").into_table();
        assert_eq!("`foo_join` AS `fj`", format_writer(&table, &mysql()).sql());
    }

    #[test]
    fn test_table_raw() {
        let table = (Raw::with_params("SELECT * FROM `a` WHERE `id` = ?", [2]), "sub").into_table();
        let raw = format_writer(&table, &mysql());
        assert_eq!("SELECT * FROM `a` WHERE `id` = ? AS `sub`", raw.sql());
        assert_eq!(&[Param::I32(2)], raw.params());
    }

    #[test]
    fn test_set_alias_replaces() {
        let mut table = ("users", "u").into_table();
        table.set_alias("x");
        assert_eq!(Some(&Ident::new_static("x")), table.alias());
    }
}
