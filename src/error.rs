//! Error types for kriteria

use thiserror::Error;

/// Result type alias for fallible builder calls.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised synchronously by the builder call that received the invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A column comparison was given an operator outside `=, !=, >, >=, <, <=`.
    #[error("invalid column comparison operator `{operator}`, expected one of =, !=, >, >=, <, <=")]
    InvalidOperator { operator: String },

    /// A bulk-replaced criterion is missing a required attribute or carries one it cannot use.
    #[error("malformed criterion at index {index}: `{attribute}` {reason}")]
    MalformedCriterion {
        index: usize,
        attribute: &'static str,
        reason: &'static str,
    },

    /// An ORDER BY direction that is neither ASC nor DESC.
    #[error("order direction must be ASC or DESC, \"{direction}\" given")]
    InvalidSortDirection { direction: String },
}
