use kriteria_derive::or_variant;

use crate::{
    Error, Raw, Result,
    bind::IntoParam,
    dialect::SharedAdapter,
    expr::{Criterion, IntoValue, Joiner, Value},
    ident::{Ident, IntoIdent},
    operator::{self, IntoOperator, Operator},
    raw::IntoRaw,
    writer::{FormatContext, FormatWriter},
};

/// An ordered list of criteria rendered as one boolean expression.
///
/// Used for WHERE, HAVING and JOIN ... ON. Cloning copies the list, so a
/// clone can be extended without affecting the original.
#[derive(Debug, Clone)]
pub struct CriteriaBuilder {
    adapter: SharedAdapter,
    statements: Vec<Criterion>,
}

impl CriteriaBuilder {
    pub fn new(adapter: SharedAdapter) -> Self {
        Self {
            adapter,
            statements: Vec::new(),
        }
    }

    pub fn adapter(&self) -> &SharedAdapter {
        &self.adapter
    }

    /// Appends a criterion with any joiner.
    ///
    /// Fails with [`Error::MalformedCriterion`] when the criterion could not
    /// be rendered faithfully, e.g. a raw key given a value.
    pub fn push(&mut self, criterion: Criterion) -> Result<&mut Self> {
        if let Err((attribute, reason)) = criterion.validate() {
            return Err(Error::MalformedCriterion {
                index: self.statements.len(),
                attribute,
                reason,
            });
        }
        Ok(self.append(criterion))
    }

    pub(crate) fn append(&mut self, criterion: Criterion) -> &mut Self {
        self.statements.push(criterion);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Criterion] {
        &self.statements
    }

    /// Replaces every criterion. Nothing is replaced when one of them is
    /// malformed.
    pub fn set_statements(&mut self, statements: Vec<Criterion>) -> Result<&mut Self> {
        for (index, criterion) in statements.iter().enumerate() {
            if let Err((attribute, reason)) = criterion.validate() {
                return Err(Error::MalformedCriterion {
                    index,
                    attribute,
                    reason,
                });
            }
        }
        self.statements = statements;
        Ok(self)
    }

    pub(crate) fn push_columns(
        &mut self,
        left: Ident,
        operator: &str,
        right: Ident,
        joiner: Joiner,
    ) -> Result<()> {
        let operator = operator.trim();
        if !operator::COLUMN_OPERATORS.contains(&operator) {
            return Err(Error::InvalidOperator {
                operator: operator.to_string(),
            });
        }
        let raw = self.columns_raw(&left, operator, &right);
        self.append(Criterion::raw(raw, joiner));
        Ok(())
    }

    fn columns_raw(&self, left: &Ident, operator: &str, right: &Ident) -> Raw {
        let left = self.adapter.sanitize_field(left.as_str());
        let right = self.adapter.sanitize_field(right.as_str());
        Raw::new(format!("{left} {operator} {right}"))
    }

    /// Renders the criteria, without the joiner of the first one.
    pub fn to_sql(&self) -> Raw {
        let mut sql = String::with_capacity(32 * self.statements.len());
        let mut context = FormatContext::new(&mut sql, &self.adapter);
        context
            .write_list(&self.statements, "")
            .expect("should not fail on a string writer");
        let params = context.into_params();
        let sql = strip_leading_joiner(&sql).trim();
        Raw::with_params(sql, params)
    }
}

impl FormatWriter for CriteriaBuilder {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        self.to_sql().format_writer(context)
    }
}

/// Strips one leading `AND` or `OR` (case insensitive), optionally preceded
/// by a single whitespace and followed by a single space.
fn strip_leading_joiner(sql: &str) -> &str {
    let rest = sql
        .strip_prefix(|c: char| c.is_whitespace())
        .unwrap_or(sql);
    for keyword in ["AND", "OR"] {
        let matched = rest
            .get(..keyword.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(keyword));
        if matched {
            let rest = &rest[keyword.len()..];
            return rest.strip_prefix(' ').unwrap_or(rest);
        }
    }
    sql
}

/// The `where` family, shared by everything that owns a WHERE-like
/// criteria list.
///
/// Every `AND` method has an `OR` twin (`where_not` / `where_or_not`, ...).
pub trait Criteria {
    /// The criteria list the methods below append to.
    fn criteria(&mut self) -> &mut CriteriaBuilder;

    /// Appends `key operator ?`. A list value renders as `(?, ?, ...)`, or as
    /// `? AND ?` for `BETWEEN`. A null value renders `key IS NULL`.
    #[or_variant]
    fn where_<K, O, V>(&mut self, key: K, operator: O, value: V) -> &mut Self
    where
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.criteria()
            .append(Criterion::field(key, operator, value, Joiner::And));
        self
    }

    #[or_variant]
    fn where_not<K, O, V>(&mut self, key: K, operator: O, value: V) -> &mut Self
    where
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        self.criteria()
            .append(Criterion::field(key, operator, value, Joiner::AndNot));
        self
    }

    /// Appends a parenthesized group filled by `populate`.
    ///
    /// ```
    /// use kriteria::{CriteriaBuilder, Dialect, prelude::*};
    ///
    /// let mut criteria = CriteriaBuilder::new(Dialect::MySql.into());
    /// criteria
    ///     .where_("a", "=", 1)
    ///     .where_group(|group| {
    ///         group.where_("b", ">=", 2).where_or("c", "<", 3);
    ///     });
    /// assert_eq!("`a` = ? AND (`b` >= ? OR `c` < ?)", criteria.to_sql().sql());
    /// ```
    #[or_variant]
    fn where_group<F>(&mut self, populate: F) -> &mut Self
    where
        F: Fn(&mut CriteriaBuilder) + Send + Sync + 'static,
    {
        self.criteria().append(Criterion::group(populate, Joiner::And));
        self
    }

    #[or_variant]
    fn where_not_group<F>(&mut self, populate: F) -> &mut Self
    where
        F: Fn(&mut CriteriaBuilder) + Send + Sync + 'static,
    {
        self.criteria()
            .append(Criterion::group(populate, Joiner::AndNot));
        self
    }

    /// Appends a fragment verbatim, along with its params.
    #[or_variant]
    fn where_raw<R: IntoRaw>(&mut self, raw: R) -> &mut Self {
        self.criteria().append(Criterion::raw(raw, Joiner::And));
        self
    }

    #[or_variant]
    fn where_is_null<K: IntoIdent>(&mut self, key: K) -> &mut Self {
        self.criteria()
            .append(Criterion::field(key, "IS NULL", Value::Null, Joiner::And));
        self
    }

    /// Renders `NOT key IS NULL`.
    #[or_variant]
    fn where_is_not_null<K: IntoIdent>(&mut self, key: K) -> &mut Self {
        self.criteria()
            .append(Criterion::field(key, "IS NULL", Value::Null, Joiner::AndNot));
        self
    }

    #[or_variant]
    fn where_in<K, V>(&mut self, key: K, values: V) -> &mut Self
    where
        K: IntoIdent,
        V: IntoValue,
    {
        self.criteria()
            .append(Criterion::field(key, Operator::In, values, Joiner::And));
        self
    }

    #[or_variant]
    fn where_not_in<K, V>(&mut self, key: K, values: V) -> &mut Self
    where
        K: IntoIdent,
        V: IntoValue,
    {
        self.criteria()
            .append(Criterion::field(key, Operator::NotIn, values, Joiner::And));
        self
    }

    #[or_variant]
    fn where_between<K, L, H>(&mut self, key: K, low: L, high: H) -> &mut Self
    where
        K: IntoIdent,
        L: IntoParam,
        H: IntoParam,
    {
        let range = Value::List(vec![low.into_param(), high.into_param()]);
        self.criteria()
            .append(Criterion::field(key, Operator::Between, range, Joiner::And));
        self
    }

    /// Compares two columns directly, without binding anything.
    ///
    /// Fails with [`Error::InvalidOperator`] unless `operator` is one of
    /// `=`, `!=`, `>`, `>=`, `<`, `<=`.
    #[or_variant]
    fn where_columns<L, R>(&mut self, left: L, operator: &str, right: R) -> Result<&mut Self>
    where
        L: IntoIdent,
        R: IntoIdent,
    {
        self.where_columns_with(left, operator, right, Joiner::And)
    }

    fn where_columns_with<L, R>(
        &mut self,
        left: L,
        operator: &str,
        right: R,
        joiner: Joiner,
    ) -> Result<&mut Self>
    where
        L: IntoIdent,
        R: IntoIdent,
    {
        self.criteria()
            .push_columns(left.into_ident(), operator, right.into_ident(), joiner)?;
        Ok(self)
    }

    #[or_variant]
    fn where_columns_equals<L, R>(&mut self, left: L, right: R) -> &mut Self
    where
        L: IntoIdent,
        R: IntoIdent,
    {
        let criteria = self.criteria();
        let raw = criteria.columns_raw(&left.into_ident(), "=", &right.into_ident());
        criteria.append(Criterion::raw(raw, Joiner::And));
        self
    }

    #[or_variant]
    fn where_columns_not_equals<L, R>(&mut self, left: L, right: R) -> &mut Self
    where
        L: IntoIdent,
        R: IntoIdent,
    {
        let criteria = self.criteria();
        let raw = criteria.columns_raw(&left.into_ident(), "!=", &right.into_ident());
        criteria.append(Criterion::raw(raw, Joiner::And));
        self
    }

    /// Replaces the whole criteria list, see [`CriteriaBuilder::set_statements`].
    fn set_where(&mut self, statements: Vec<Criterion>) -> Result<&mut Self> {
        self.criteria().set_statements(statements)?;
        Ok(self)
    }
}

impl Criteria for CriteriaBuilder {
    fn criteria(&mut self) -> &mut CriteriaBuilder {
        self
    }
}
