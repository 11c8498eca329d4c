use std::fmt::Write;

use crate::{
    Raw,
    bind::{IntoParam, Param},
    writer::{FormatContext, FormatWriter},
};

/// A value assigned by INSERT or UPDATE: a bound param or a raw fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SetExpr {
    Param(Param),
    Raw(Raw),
}

pub trait IntoSet {
    fn into_set(self) -> SetExpr;
}

impl IntoSet for SetExpr {
    fn into_set(self) -> SetExpr {
        self
    }
}

impl IntoSet for Raw {
    fn into_set(self) -> SetExpr {
        SetExpr::Raw(self)
    }
}

impl<T> IntoSet for T
where
    T: IntoParam,
{
    fn into_set(self) -> SetExpr {
        SetExpr::Param(self.into_param())
    }
}

impl FormatWriter for SetExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        match self {
            SetExpr::Param(param) => {
                context.push_param(param.clone());
                context.writer.write_char('?')
            }
            SetExpr::Raw(raw) => raw.format_writer(context),
        }
    }
}
