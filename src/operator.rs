use std::fmt;

use smol_str::SmolStr;

/// Common comparison operators. Any other operator can be passed as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
}

impl Operator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait IntoOperator {
    fn into_operator(self) -> SmolStr;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> SmolStr {
        SmolStr::new_static(self.as_str())
    }
}

impl IntoOperator for &str {
    fn into_operator(self) -> SmolStr {
        SmolStr::new(self)
    }
}

impl IntoOperator for String {
    fn into_operator(self) -> SmolStr {
        SmolStr::from(self)
    }
}

impl IntoOperator for SmolStr {
    fn into_operator(self) -> SmolStr {
        self
    }
}

/// Operators accepted when comparing two columns directly.
pub(crate) const COLUMN_OPERATORS: [&str; 6] = ["=", "!=", ">", ">=", "<", "<="];

pub(crate) fn is_between(operator: &str) -> bool {
    let operator = operator.trim();
    operator.eq_ignore_ascii_case("BETWEEN") || operator.eq_ignore_ascii_case("NOT BETWEEN")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_operator() {
        assert_eq!(Operator::NotEq.into_operator(), "!=");
        assert_eq!("LIKE".into_operator(), "LIKE");
        assert_eq!("NOT BETWEEN", Operator::NotBetween.to_string());
    }

    #[test]
    fn test_is_between() {
        assert!(is_between("BETWEEN"));
        assert!(is_between("between"));
        assert!(is_between("NOT BETWEEN"));
        assert!(!is_between("IN"));
        assert!(!is_between("="));
    }
}
