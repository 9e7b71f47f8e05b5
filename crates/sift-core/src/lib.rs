//! Core runtime for sift: the directive registry, the built-in directives,
//! request decoding, and the compiler that folds directives onto a query.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod compiler;
pub mod decode;
pub mod directive;
pub mod error;
pub mod query;
pub mod registry;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Directive that always executes after every other directive in a plan.
pub const FORCE_DIRECTIVE: &str = "force";

/// Directive whose first argument callers read back as the row cap.
pub const LIMIT_DIRECTIVE: &str = "limit";

/// Directive that overrides the entity's default projection.
pub const COLUMNS_DIRECTIVE: &str = "columns";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No registries or compiler internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        compiler::{CompiledQuery, compile},
        decode::{RawParams, RawValue, ReservedKeys},
        directive::Directive,
        query::{
            Conjunction, OrderDirection, Projection, QueryBuilder, QueryError, Queryable,
            SoftDeleteScope, model::EntityModel, value::Value,
        },
    };
}
