//! Module: directive
//! Responsibility: the handler contract and the built-in handler variants.
//! Does not own: name resolution (registry) or execution order (compiler).

pub mod filter;
pub mod force;
pub mod order;
pub mod projection;
pub mod scope;
pub mod window;

#[cfg(test)]
mod tests;

use crate::{
    error::ArgumentError,
    query::{QueryBuilder, QueryError},
};
use std::fmt;

///
/// Directive
///
/// One handler per directive occurrence. The compiler calls `tokenize`
/// exactly once, then `apply` exactly once; handlers are not reused.
///
/// Handlers never touch shared state. Their only side effect is the
/// fragment they contribute to the query passed to `apply`.
///

pub trait Directive: fmt::Debug {
    /// Parse the raw argument into this handler's tokens.
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError>;

    /// Contribute this handler's fragment to `query`.
    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError>;

    /// Tokens produced by `tokenize`; meaning is variant-specific.
    fn tokens(&self) -> &[String];
}

///
/// Built-in directive names
///

pub mod names {
    pub const WITH_TRASHED: &str = "with_trashed";
    pub const ONLY_TRASHED: &str = "only_trashed";
    pub const FORCE: &str = crate::FORCE_DIRECTIVE;

    pub const WHERE: &str = "where";
    pub const OR_WHERE: &str = "or_where";
    pub const WHERE_IN: &str = "where_in";
    pub const WHERE_NOT_IN: &str = "where_not_in";
    pub const OR_WHERE_IN: &str = "or_where_in";
    pub const OR_WHERE_NOT_IN: &str = "or_where_not_in";
    pub const WHERE_BETWEEN: &str = "where_between";
    pub const WHERE_NOT_BETWEEN: &str = "where_not_between";
    pub const OR_WHERE_BETWEEN: &str = "or_where_between";
    pub const OR_WHERE_NOT_BETWEEN: &str = "or_where_not_between";
    pub const WHERE_NULL: &str = "where_null";
    pub const WHERE_NOT_NULL: &str = "where_not_null";

    pub const ORDER_BY: &str = "order_by";
    pub const COLUMNS: &str = crate::COLUMNS_DIRECTIVE;
    pub const WITH: &str = "with";
    pub const LIMIT: &str = crate::LIMIT_DIRECTIVE;
    pub const OFFSET: &str = "offset";
}

// ----------------------------------------------------------------------
// Tokenizing helpers shared by the built-in variants
// ----------------------------------------------------------------------

/// Trimmed, non-empty field name.
pub(crate) fn field_name(raw: &str) -> Result<String, ArgumentError> {
    let field = raw.trim();
    if field.is_empty() {
        return Err(ArgumentError::EmptyField);
    }

    Ok(field.to_string())
}

/// Comma-separated list with blanks dropped.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Non-empty comma-separated list.
pub(crate) fn non_empty_list(
    raw: &str,
    expected: &'static str,
) -> Result<Vec<String>, ArgumentError> {
    let items = split_list(raw);
    if items.is_empty() {
        return Err(ArgumentError::Shape { expected });
    }

    Ok(items)
}
