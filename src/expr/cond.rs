use std::{
    fmt::{self, Write},
    sync::Arc,
};

use smol_str::SmolStr;

use crate::{
    CriteriaBuilder, Ident, Raw,
    ident::IntoIdent,
    operator::{self, IntoOperator},
    raw::IntoRaw,
    writer::{FormatContext, FormatWriter},
};

use super::value::{IntoValue, Value};

/// Boolean connective placed in front of a criterion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    #[default]
    And,
    Or,
    AndNot,
    OrNot,
}

impl Joiner {
    pub const fn as_str(self) -> &'static str {
        match self {
            Joiner::And => "AND",
            Joiner::Or => "OR",
            Joiner::AndNot => "AND NOT",
            Joiner::OrNot => "OR NOT",
        }
    }
}

impl FormatWriter for Joiner {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

type Populate = dyn Fn(&mut CriteriaBuilder) + Send + Sync;

/// A nested condition group. The closure fills a fresh child builder every
/// time the parent is rendered.
#[derive(Clone)]
pub struct Group(Arc<Populate>);

impl Group {
    pub fn new<F>(populate: F) -> Self
    where
        F: Fn(&mut CriteriaBuilder) + Send + Sync + 'static,
    {
        Self(Arc::new(populate))
    }

    pub fn populate(&self, builder: &mut CriteriaBuilder) {
        (self.0)(builder)
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Group(..)")
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Left-hand side of a criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// Dotted field path, quoted by the adapter.
    Field(Ident),
    /// Used verbatim, contributes its own params.
    Raw(Raw),
    Group(Group),
}

impl Key {
    /// True when the key is a plain field named `name`.
    pub fn is_field(&self, name: &str) -> bool {
        matches!(self, Key::Field(field) if field.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    key: Key,
    operator: Option<SmolStr>,
    value: Value,
    joiner: Joiner,
}

impl Criterion {
    pub fn new(key: Key, operator: Option<SmolStr>, value: Value, joiner: Joiner) -> Self {
        Self {
            key,
            operator,
            value,
            joiner,
        }
    }

    pub fn field<K, O, V>(key: K, operator: O, value: V, joiner: Joiner) -> Self
    where
        K: IntoIdent,
        O: IntoOperator,
        V: IntoValue,
    {
        Self::new(
            Key::Field(key.into_ident()),
            Some(operator.into_operator()),
            value.into_value(),
            joiner,
        )
    }

    pub fn raw<R: IntoRaw>(raw: R, joiner: Joiner) -> Self {
        Self::new(Key::Raw(raw.into_raw()), None, Value::Null, joiner)
    }

    pub fn group<F>(populate: F, joiner: Joiner) -> Self
    where
        F: Fn(&mut CriteriaBuilder) + Send + Sync + 'static,
    {
        Self::new(Key::Group(Group::new(populate)), None, Value::Null, joiner)
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn joiner(&self) -> Joiner {
        self.joiner
    }

    /// Returns the offending attribute and what is wrong with it.
    pub(crate) fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        match (&self.key, &self.value) {
            (Key::Group(_), _) if self.operator.is_some() => {
                Err(("operator", "cannot be set on a nested group"))
            }
            (Key::Group(_), Value::Null) => Ok(()),
            (Key::Group(_), _) => Err(("value", "cannot be set on a nested group")),
            (Key::Raw(_), Value::Scalar(_) | Value::Raw(_)) => {
                Err(("value", "cannot be combined with a raw key"))
            }
            (_, Value::Scalar(_) | Value::List(_) | Value::Raw(_)) if self.operator.is_none() => {
                Err(("operator", "is required when a value is given"))
            }
            (_, Value::List(items)) if self.is_between() && items.len() != 2 => {
                Err(("value", "BETWEEN takes exactly two values"))
            }
            _ => Ok(()),
        }
    }

    fn is_between(&self) -> bool {
        self.operator.as_deref().is_some_and(operator::is_between)
    }

    fn write_operator<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        if let Some(ref operator) = self.operator {
            context.writer.write_char(' ')?;
            context.writer.write_str(operator)?;
        }
        Ok(())
    }
}

// Every criterion is written as `<joiner> <body> `; the builder strips the
// leading joiner and trims once all criteria are written. A BETWEEN list
// without exactly two values is written as a plain list so every value
// keeps its placeholder.
impl FormatWriter for Criterion {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.joiner.format_writer(context)?;
        let is_raw_key = match self.key {
            Key::Group(ref group) => {
                let mut child = CriteriaBuilder::new(Arc::clone(context.adapter));
                group.populate(&mut child);
                context.writer.write_str(" (")?;
                child.to_sql().format_writer(context)?;
                return context.writer.write_str(") ");
            }
            Key::Field(ref field) => {
                context.writer.write_char(' ')?;
                field.format_writer(context)?;
                false
            }
            Key::Raw(ref raw) => {
                context.writer.write_char(' ')?;
                raw.format_writer(context)?;
                true
            }
        };

        match self.value {
            Value::List(ref items) => {
                self.write_operator(context)?;
                if self.is_between() && items.len() == 2 {
                    context.extend_params(items);
                    context.writer.write_str(" ? AND ? ")
                } else {
                    if self.is_between() {
                        tracing::warn!(
                            values = items.len(),
                            "BETWEEN takes two values, rendering them as a list"
                        );
                    }
                    context.writer.write_str(" (")?;
                    for (index, item) in items.iter().enumerate() {
                        if index > 0 {
                            context.writer.write_str(", ")?;
                        }
                        context.writer.write_char('?')?;
                        context.push_param(item.clone());
                    }
                    context.writer.write_str(") ")
                }
            }
            Value::Null if is_raw_key => context.writer.write_char(' '),
            Value::Null => context.writer.write_str(" IS NULL "),
            Value::Scalar(ref param) => {
                self.write_operator(context)?;
                context.push_param(param.clone());
                context.writer.write_str(" ? ")
            }
            Value::Raw(ref raw) => {
                self.write_operator(context)?;
                context.writer.write_char(' ')?;
                raw.format_writer(context)?;
                context.writer.write_char(' ')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Param, tests::mysql, writer::render};

    use super::*;

    fn render_one(criterion: Criterion) -> String {
        render(&criterion, &mysql()).into_parts().0
    }

    #[test]
    fn test_joiner_prefix() {
        assert_eq!(
            "OR NOT `baz` < ? ",
            render_one(Criterion::field("baz", "<", 5, Joiner::OrNot))
        );
    }

    #[test]
    fn test_raw_key_keeps_params() {
        let criterion = Criterion::raw(Raw::with_params("`a` > ?", [1]), Joiner::And);
        let raw = render(&criterion, &mysql());
        assert_eq!("AND `a` > ? ", raw.sql());
        assert_eq!(&[Param::I32(1)], raw.params());
    }

    #[test]
    fn test_raw_key_with_list_binds_key_first() {
        let criterion = Criterion::new(
            Key::Raw(Raw::with_params("COALESCE(`a`, ?)", ["x"])),
            Some(SmolStr::new_static("IN")),
            vec![1, 2].into_value(),
            Joiner::And,
        );
        let raw = render(&criterion, &mysql());
        assert_eq!("AND COALESCE(`a`, ?) IN (?, ?) ", raw.sql());
        assert_eq!(
            &[Param::String("x".into()), Param::I32(1), Param::I32(2)],
            raw.params()
        );
    }

    #[test]
    fn test_field_with_raw_value() {
        let criterion = Criterion::field(
            "id",
            "=",
            Raw::with_params("(SELECT `user_id` FROM `roles` WHERE `name` = ?)", ["admin"]),
            Joiner::And,
        );
        let raw = render(&criterion, &mysql());
        assert_eq!(
            "AND `id` = (SELECT `user_id` FROM `roles` WHERE `name` = ?) ",
            raw.sql()
        );
        assert_eq!(&[Param::String("admin".into())], raw.params());
    }

    #[test]
    fn test_validate() {
        assert!(Criterion::field("id", "=", 1, Joiner::And).validate().is_ok());
        assert!(Criterion::raw("1 = 1", Joiner::And).validate().is_ok());
        assert!(Criterion::group(|_| {}, Joiner::And).validate().is_ok());

        let no_operator = Criterion::new(
            Key::Field(Ident::new_static("id")),
            None,
            Value::Scalar(Param::I32(1)),
            Joiner::And,
        );
        assert_eq!(Err("operator"), no_operator.validate().map_err(|(attr, _)| attr));

        let raw_with_value = Criterion::new(
            Key::Raw(Raw::new("`a` = `b`")),
            Some(SmolStr::new_static("=")),
            Value::Scalar(Param::I32(1)),
            Joiner::And,
        );
        assert_eq!(Err("value"), raw_with_value.validate().map_err(|(attr, _)| attr));

        let short_between = Criterion::field("a", "NOT BETWEEN", vec![1], Joiner::And);
        assert_eq!(Err("value"), short_between.validate().map_err(|(attr, _)| attr));
        assert!(Criterion::field("a", "BETWEEN", vec![1, 2], Joiner::And).validate().is_ok());
    }

    #[test]
    fn test_between_wrong_length_keeps_every_placeholder() {
        let raw = render(
            &Criterion::field("a", "BETWEEN", vec![1, 2, 3], Joiner::And),
            &mysql(),
        );
        assert_eq!("AND `a` BETWEEN (?, ?, ?) ", raw.sql());
        assert_eq!(&[Param::I32(1), Param::I32(2), Param::I32(3)], raw.params());
        assert_eq!(raw.params().len(), raw.placeholder_count());
    }

    #[test]
    fn test_raw_key_with_scalar_keeps_value() {
        let criterion = Criterion::new(
            Key::Raw(Raw::new("`a`")),
            Some(SmolStr::new_static("=")),
            Value::Scalar(Param::I32(7)),
            Joiner::And,
        );
        let raw = render(&criterion, &mysql());
        assert_eq!("AND `a` = ? ", raw.sql());
        assert_eq!(&[Param::I32(7)], raw.params());
    }
}
