use std::fmt::{self, Write};

use crate::{
    bind::{IntoParams, Param, Params},
    writer::{FormatContext, FormatWriter},
};

/// A SQL fragment and the values bound to its `?` placeholders, in order.
///
/// Embedding a `Raw` inside a larger fragment copies its text verbatim, so
/// the caller is responsible for keeping the placeholder count equal to the
/// number of params.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Raw {
    sql: String,
    params: Params,
}

pub trait IntoRaw {
    fn into_raw(self) -> Raw;
}

impl IntoRaw for Raw {
    #[inline(always)]
    fn into_raw(self) -> Raw {
        self
    }
}

impl IntoRaw for &str {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl Raw {
    pub fn new<T>(sql: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            sql: sql.into(),
            params: Params::new(),
        }
    }

    pub fn with_params<T, P>(sql: T, params: P) -> Self
    where
        T: Into<String>,
        P: IntoParams,
    {
        Self {
            sql: sql.into(),
            params: params.into_params(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Params) {
        (self.sql, self.params)
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Number of `?` placeholders, ignoring quoted literals and identifiers
    /// as well as the `??`, `?|` and `?&` operators.
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        // writing into a sink never fails
        let _ = write_placeholders(&self.sql, &mut Sink, |_| {
            count += 1;
            Ok(())
        });
        count
    }

    /// Rewrites the `?` placeholders into `$1`, `$2`, ... for drivers that
    /// expect numbered parameters.
    pub fn to_numbered(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + 8);
        let mut placeholder = 0u16;
        let result = write_placeholders(&self.sql, &mut out, |writer| {
            placeholder += 1;
            write!(writer, "${placeholder}")
        });
        debug_assert!(result.is_ok(), "should not fail on a string writer");
        out
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl FormatWriter for Raw {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(&self.sql)?;
        context.extend_params(&self.params);
        Ok(())
    }
}

struct Sink;

impl Write for Sink {
    fn write_str(&mut self, _: &str) -> fmt::Result {
        Ok(())
    }
}

fn write_placeholders<W, F>(sql: &str, writer: &mut W, mut placeholder: F) -> fmt::Result
where
    W: Write,
    F: FnMut(&mut W) -> fmt::Result,
{
    enum State {
        Normal,
        Quoted(char),
    }

    let mut state = State::Normal;
    let mut span_start = 0;

    let mut chars = sql.char_indices().peekable();
    while let Some((index, char)) = chars.next() {
        match state {
            State::Normal => match char {
                '\'' | '"' | '`' => state = State::Quoted(char),
                '?' => {
                    // `??`, `?|` and `?&` are jsonb operators, not placeholders
                    let is_placeholder = !matches!(chars.peek(), Some((_, '?' | '|' | '&')));
                    if is_placeholder {
                        writer.write_str(&sql[span_start..index])?;
                        placeholder(writer)?;
                        span_start = index + char.len_utf8();
                    } else {
                        chars.next();
                    }
                }
                _ => {}
            },
            State::Quoted(quote) => {
                if char == quote {
                    // doubled quote is an escaped quote
                    if matches!(chars.peek(), Some(&(_, next)) if next == quote) {
                        chars.next();
                    } else {
                        state = State::Normal;
                    }
                }
            }
        }
    }

    writer.write_str(&sql[span_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_and_display() {
        let raw = Raw::with_params("SELECT", [Param::I32(42), Param::String("bar".into())]);
        assert_eq!(&[Param::I32(42), Param::String("bar".into())], raw.params());
        assert_eq!("SELECT", raw.to_string());
    }

    #[test]
    fn test_raw_str() {
        let raw = Raw::new("'te?st'");
        assert_eq!("'te?st'", raw.to_numbered());
        assert_eq!(0, raw.placeholder_count());
    }

    #[test]
    fn test_raw_double_quote() {
        let raw = Raw::new("'te''? st'");
        assert_eq!("'te''? st'", raw.to_numbered());
    }

    #[test]
    fn test_raw_bind() {
        let raw = Raw::new("'test' = ?");
        assert_eq!("'test' = $1", raw.to_numbered());
        assert_eq!(1, raw.placeholder_count());
    }

    #[test]
    fn test_raw_ident() {
        let raw = Raw::new("\"te? ? \"\"st\" = ? AND `a?` IN (?, ?)");
        assert_eq!("\"te? ? \"\"st\" = $1 AND `a?` IN ($2, $3)", raw.to_numbered());
        assert_eq!(3, raw.placeholder_count());
    }

    #[test]
    fn test_placeholder_double() {
        let raw = Raw::new("test ?? data ?| keys ?& keys");
        assert_eq!("test ?? data ?| keys ?& keys", raw.to_numbered());
        assert_eq!(0, raw.placeholder_count());
    }

    #[test]
    fn test_placeholder_before_literal() {
        let raw = Raw::new("a = ?'?'");
        assert_eq!("a = $1'?'", raw.to_numbered());
    }
}
