use std::{borrow::Cow, fmt, sync::Arc};

use smol_str::SmolStr;

use crate::writer::{self, FormatWriter};

/// An unquoted identifier or dotted field path such as `users.id`.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ident(SmolStr);

pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for char {
    fn into_ident(self) -> Ident {
        Ident::new(smol_str::format_smolstr!("{}", self))
    }
}

impl IntoIdent for &str {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for &String {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for String {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Box<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Arc<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Cow<'_, str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for SmolStr {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

/// Splits `"users as u"` into `("users", Some("u"))`, case insensitive.
pub fn split_alias(s: &str) -> (&str, Option<&str>) {
    if let Some(idx) = find_as(s.as_bytes()) {
        let left = &s[..idx];
        let right = &s[idx + 4..];
        (left, Some(right))
    } else {
        (s, None)
    }
}

impl Ident {
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    #[inline]
    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn split_alias(&self) -> (Ident, Option<Ident>) {
        match split_alias(self.as_str()) {
            (_, None) => (self.clone(), None),
            (left, Some(right)) => (Ident::new(left), Some(Ident::new(right))),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FormatWriter for Ident {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> std::fmt::Result {
        context.write_field(self.as_str())
    }
}

/// Writes `" AS <alias>"` when an alias is present.
pub(crate) fn write_alias<W: std::fmt::Write>(
    context: &mut writer::FormatContext<'_, W>,
    alias: Option<&Ident>,
) -> std::fmt::Result {
    if let Some(alias) = alias {
        context.writer.write_str(" AS ")?;
        alias.format_writer(context)?;
    }
    Ok(())
}

/// Return the index of " as " in bytes case insensitive with no allocations.
fn find_as(h: &[u8]) -> Option<usize> {
    if h.len() < 4 {
        return None;
    }
    for (i, w) in h.windows(4).enumerate() {
        if w[0] == b' ' && w[3] == b' ' && (w[1] | 0x20) == b'a' && (w[2] | 0x20) == b's' {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::tests::{format_writer, mysql, postgres};

    use super::*;

    #[test]
    fn test_find_as() {
        let matches = "users as u";
        let index = find_as(matches.as_bytes());
        assert_eq!(index, Some(5));
        let no_match = "users";
        let index = find_as(no_match.as_bytes());
        assert_eq!(index, None);
        let first_match = "users AS u as bob";
        let index = find_as(first_match.as_bytes());
        assert_eq!(index, Some(5));
    }

    #[test]
    fn test_split_alias() {
        assert_eq!(("users", Some("u")), split_alias("users As u"));
        assert_eq!(("users", None), split_alias("users"));
        let (table, alias) = Ident::new_static("users as u").split_alias();
        assert_eq!("users", table.as_str());
        assert_eq!(Some(Ident::new_static("u")), alias);
    }

    #[test]
    fn test_format_ident_simple() {
        let ident = Ident::new_static("users");
        assert_eq!("\"users\"", format_writer(&ident, &postgres()).sql());
        assert_eq!("`users`", format_writer(&ident, &mysql()).sql());
    }

    #[test]
    fn test_format_ident_dot() {
        let ident = Ident::new_static("x.y");
        assert_eq!("\"x\".\"y\"", format_writer(&ident, &postgres()).sql());
        assert_eq!("`x`.`y`", format_writer(&ident, &mysql()).sql());
    }

    #[test]
    fn test_format_ident_star() {
        let ident = Ident::new_static("foo.*");
        assert_eq!("`foo`.*", format_writer(&ident, &mysql()).sql());
    }
}
