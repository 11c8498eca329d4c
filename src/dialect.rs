use std::{fmt, sync::Arc};

/// Identifier-quoting strategy for one SQL dialect.
///
/// Builders receive the adapter explicitly and share it read-only, so one
/// adapter can serve any number of builders across threads.
pub trait Adapter: fmt::Debug + Send + Sync {
    /// The character wrapped around every quoted identifier segment.
    fn quote_char(&self) -> char;

    /// Quotes a dotted field path. Override for dialects whose opening and
    /// closing quotes differ.
    fn sanitize_field(&self, field: &str) -> String {
        sanitize_field(field, self.quote_char())
    }
}

pub type SharedAdapter = Arc<dyn Adapter>;

/// Splits `field` on `.` and wraps every segment except `*` in `quote`.
/// A quote character inside a segment is doubled.
pub fn sanitize_field(field: &str, quote: char) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, part) in field.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        if part == "*" {
            out.push('*');
            continue;
        }
        out.push(quote);
        for char in part.chars() {
            if char == quote {
                out.push(quote);
            }
            out.push(char);
        }
        out.push(quote);
    }
    out
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    MySql,
    Postgres,
    Sqlite,
}

impl Adapter for Dialect {
    fn quote_char(&self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::Postgres | Dialect::Sqlite => '"',
        }
    }
}

impl From<Dialect> for SharedAdapter {
    fn from(dialect: Dialect) -> Self {
        Arc::new(dialect)
    }
}
