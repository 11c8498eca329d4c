use smol_str::SmolStr;

/// A value bound to a `?` placeholder. Passed through to the driver untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    #[cfg(feature = "chrono")]
    ChronoDateTime(chrono::DateTime<chrono::Utc>),
    #[cfg(feature = "chrono")]
    ChronoDate(chrono::NaiveDate),
    #[cfg(feature = "time")]
    TimeDateTime(time::OffsetDateTime),
    #[cfg(feature = "time")]
    TimeDate(time::Date),
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

pub type Params = Vec<Param>;

pub trait IntoParam {
    fn into_param(self) -> Param;
}

pub trait IntoParams {
    fn into_params(self) -> Params;
}

macro_rules! impl_into_param {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoParam for $ty {
                #[inline]
                fn into_param(self) -> Param {
                    Param::$variant(self)
                }
            }
        )*
    };
}

impl_into_param!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
);

#[cfg(feature = "chrono")]
impl_into_param!(
    chrono::DateTime<chrono::Utc> => ChronoDateTime,
    chrono::NaiveDate => ChronoDate,
);

#[cfg(feature = "time")]
impl_into_param!(
    time::OffsetDateTime => TimeDateTime,
    time::Date => TimeDate,
);

#[cfg(feature = "uuid")]
impl_into_param!(uuid::Uuid => Uuid);

#[cfg(feature = "json")]
impl_into_param!(serde_json::Value => Json);

impl IntoParam for &str {
    #[inline]
    fn into_param(self) -> Param {
        Param::String(self.to_owned())
    }
}

impl IntoParam for &String {
    #[inline]
    fn into_param(self) -> Param {
        Param::String(self.clone())
    }
}

impl IntoParam for SmolStr {
    #[inline]
    fn into_param(self) -> Param {
        Param::String(self.into())
    }
}

impl IntoParam for Param {
    #[inline(always)]
    fn into_param(self) -> Param {
        self
    }
}

impl<T> IntoParam for Option<T>
where
    T: IntoParam,
{
    fn into_param(self) -> Param {
        if let Some(value) = self {
            value.into_param()
        } else {
            Param::Null
        }
    }
}

impl IntoParams for () {
    fn into_params(self) -> Params {
        Params::new()
    }
}

impl<T> IntoParams for T
where
    T: IntoParam,
{
    fn into_params(self) -> Params {
        vec![self.into_param()]
    }
}

impl<T> IntoParams for Vec<T>
where
    T: IntoParam,
{
    fn into_params(self) -> Params {
        self.into_iter().map(IntoParam::into_param).collect()
    }
}

impl<T, const N: usize> IntoParams for [T; N]
where
    T: IntoParam,
{
    fn into_params(self) -> Params {
        self.into_iter().map(IntoParam::into_param).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_is_null() {
        assert_eq!(Param::Null, None::<i32>.into_param());
        assert_eq!(Param::I32(3), Some(3).into_param());
    }

    #[test]
    fn test_into_params() {
        assert!(().into_params().is_empty());
        assert_eq!(vec![Param::I64(42)], 42i64.into_params());
        assert_eq!(
            vec![Param::String("bar".into()), Param::Null],
            [Some("bar"), None].into_params()
        );
    }
}
