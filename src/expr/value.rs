use smol_str::SmolStr;

use crate::{
    Raw,
    bind::{IntoParam, Param, Params},
};

/// Right-hand side of a criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Renders as `IS NULL`, binds nothing.
    #[default]
    Null,
    Scalar(Param),
    /// Renders as `(?, ?, ...)`, or `? AND ?` for `BETWEEN`.
    List(Params),
    /// Embedded verbatim with its own params.
    Raw(Raw),
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

macro_rules! impl_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                #[inline]
                fn into_value(self) -> Value {
                    Value::Scalar(self.into_param())
                }
            }
        )*
    };
}

impl_into_value!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, &str, &String, String, SmolStr,
);

#[cfg(feature = "chrono")]
impl_into_value!(chrono::DateTime<chrono::Utc>, chrono::NaiveDate);

#[cfg(feature = "time")]
impl_into_value!(time::OffsetDateTime, time::Date);

#[cfg(feature = "uuid")]
impl_into_value!(uuid::Uuid);

#[cfg(feature = "json")]
impl_into_value!(serde_json::Value);

impl IntoValue for Value {
    #[inline(always)]
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for Param {
    fn into_value(self) -> Value {
        match self {
            Param::Null => Value::Null,
            param => Value::Scalar(param),
        }
    }
}

impl IntoValue for Raw {
    fn into_value(self) -> Value {
        Value::Raw(self)
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl<T> IntoValue for Option<T>
where
    T: IntoParam,
{
    fn into_value(self) -> Value {
        self.into_param().into_value()
    }
}

impl<T> IntoValue for Vec<T>
where
    T: IntoParam,
{
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoParam::into_param).collect())
    }
}

impl<T, const N: usize> IntoValue for [T; N]
where
    T: IntoParam,
{
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoParam::into_param).collect())
    }
}

impl<T> IntoValue for &[T]
where
    T: IntoParam + Clone,
{
    fn into_value(self) -> Value {
        Value::List(self.iter().cloned().map(IntoParam::into_param).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_value() {
        assert_eq!(Value::Scalar(Param::String("bar".into())), "bar".into_value());
        assert_eq!(Value::Null, None::<i32>.into_value());
        assert_eq!(Value::Null, Param::Null.into_value());
        assert_eq!(Value::Scalar(Param::I32(5)), Some(5).into_value());
        assert_eq!(
            Value::List(vec![Param::I32(2), Param::I32(5), Param::I32(9)]),
            [2, 5, 9].into_value()
        );
        let slice: &[i64] = &[1, 2];
        assert_eq!(Value::List(vec![Param::I64(1), Param::I64(2)]), slice.into_value());
    }
}
