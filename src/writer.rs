use std::fmt::Write;

use crate::{
    Raw,
    bind::{Param, Params},
    dialect::SharedAdapter,
};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) adapter: &'a SharedAdapter,
    params: Params,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, adapter: &'a SharedAdapter) -> Self {
        Self {
            writer,
            adapter,
            params: Params::new(),
        }
    }

    pub(crate) fn write_field(&mut self, field: &str) -> std::fmt::Result {
        let quoted = self.adapter.sanitize_field(field);
        self.writer.write_str(&quoted)
    }

    pub(crate) fn write_list<T: FormatWriter>(&mut self, items: &[T], separator: &str) -> std::fmt::Result {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(separator)?;
            }
            item.format_writer(self)?;
        }
        Ok(())
    }

    pub(crate) fn push_param(&mut self, param: Param) {
        self.params.push(param);
    }

    pub(crate) fn extend_params(&mut self, params: &[Param]) {
        self.params.extend_from_slice(params);
    }

    pub(crate) fn into_params(self) -> Params {
        self.params
    }
}

/// Renders `value` into a fresh fragment.
pub(crate) fn render<T: FormatWriter>(value: &T, adapter: &SharedAdapter) -> Raw {
    let mut sql = String::with_capacity(64);
    let mut context = FormatContext::new(&mut sql, adapter);
    value
        .format_writer(&mut context)
        .expect("should not fail on a string writer");
    let params = context.into_params();
    Raw::with_params(sql, params)
}

/// Logs a rendered statement and flags a placeholder/param mismatch, which
/// can only come from a caller-supplied raw fragment.
pub(crate) fn finish(statement: &'static str, raw: Raw) -> Raw {
    let placeholders = raw.placeholder_count();
    let params = raw.params().len();
    if placeholders != params {
        tracing::warn!(
            statement,
            placeholders,
            params,
            sql = raw.sql(),
            "placeholder count does not match the bound parameters"
        );
    }
    tracing::debug!(statement, sql = raw.sql(), params, "rendered statement");
    raw
}
