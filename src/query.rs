use crate::{
    Delete, Insert, Raw, Select, Update,
    bind::IntoParams,
    dialect::SharedAdapter,
    table::IntoTable,
};

/// Creates statement builders bound to one adapter.
///
/// ```
/// use kriteria::{Dialect, QueryBuilder, prelude::*};
///
/// let query = QueryBuilder::new(Dialect::Postgres);
/// let mut select = query.select("users as u");
/// select.columns(["u.id", "u.name"]).where_("u.active", "=", true);
/// let raw = select.to_sql();
/// assert_eq!(
///     "SELECT \"u\".\"id\", \"u\".\"name\"\n\tFROM \"users\" AS \"u\"\n\tWHERE \"u\".\"active\" = ?\n",
///     raw.sql()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    adapter: SharedAdapter,
}

impl QueryBuilder {
    pub fn new<A: Into<SharedAdapter>>(adapter: A) -> Self {
        Self {
            adapter: adapter.into(),
        }
    }

    pub fn adapter(&self) -> &SharedAdapter {
        &self.adapter
    }

    pub fn select<T: IntoTable>(&self, table: T) -> Select {
        Select::new(self.adapter.clone(), table)
    }

    pub fn insert<T: IntoTable>(&self, table: T) -> Insert {
        Insert::new(self.adapter.clone(), table)
    }

    pub fn update<T: IntoTable>(&self, table: T) -> Update {
        Update::new(self.adapter.clone(), table)
    }

    pub fn delete<T: IntoTable>(&self, table: T) -> Delete {
        Delete::new(self.adapter.clone(), table)
    }

    pub fn raw<S: Into<String>, P: IntoParams>(&self, sql: S, params: P) -> Raw {
        Raw::with_params(sql, params)
    }

    /// Quotes a dotted field path the way the builders do.
    pub fn sanitize_field(&self, field: &str) -> String {
        self.adapter.sanitize_field(field)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dialect, bind::Param, prelude::*};

    use super::*;

    #[test]
    fn test_factories_share_adapter() {
        let query = QueryBuilder::new(Dialect::MySql);
        assert_eq!("`a`.`b`", query.sanitize_field("a.b"));
        assert_eq!("`t`.*", query.sanitize_field("t.*"));

        assert_eq!("SELECT *\n\tFROM `t`\n", query.select("t").to_sql().sql());
        assert_eq!("DELETE FROM `t`", query.delete("t").to_sql().sql());

        let mut insert = query.insert("t");
        insert.value("a", 1);
        assert_eq!("INSERT INTO `t` (`a`)\n\tVALUES (?)", insert.to_sql().sql());

        let mut update = query.update("t");
        update.set_value("a", 1);
        assert_eq!("UPDATE `t`\n\tSET\n\t\t`a` = ?\n", update.to_sql().sql());
    }

    #[test]
    fn test_raw() {
        let query = QueryBuilder::new(Dialect::Sqlite);
        let raw = query.raw("SELECT ?", ["x"]);
        assert_eq!("SELECT ?", raw.sql());
        assert_eq!(&[Param::String("x".into())], raw.params());
        assert!(query.raw("SELECT 1", ()).params().is_empty());
    }
}
