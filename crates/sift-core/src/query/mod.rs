//! Query abstraction consumed by directives.
//!
//! `QueryBuilder` is the only surface a directive may touch. `Queryable`
//! describes the entity a compilation starts from. `model` and `intent`
//! provide a reference implementation that records intent and can be
//! executed over in-memory rows by `eval`.

pub mod eval;
pub mod intent;
pub mod model;
pub mod predicate;
pub mod value;


pub use predicate::{CompareOp, Predicate};

use thiserror::Error as ThisError;

///
/// SoftDeleteScope
///
/// Visibility of logically deleted rows.
/// `WithoutTrashed` is the default scope of every soft-deleting entity.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SoftDeleteScope {
    #[default]
    WithoutTrashed,
    WithTrashed,
    OnlyTrashed,
}

impl SoftDeleteScope {
    /// Parse the directive spelling of a scope.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "without_trashed" => Some(Self::WithoutTrashed),
            "with_trashed" => Some(Self::WithTrashed),
            "only_trashed" => Some(Self::OnlyTrashed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WithoutTrashed => "without_trashed",
            Self::WithTrashed => "with_trashed",
            Self::OnlyTrashed => "only_trashed",
        }
    }
}

///
/// Conjunction
///
/// How a filter joins the predicate accumulated so far.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Conjunction {
    And,
    Or,
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

///
/// Projection
///
/// Column selection for the primary entity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Projection {
    /// Every column of the named table (`table.*`).
    AllOf(String),

    /// Explicit column list, in request order.
    Columns(Vec<String>),
}

///
/// QueryError
///
/// Recoverable refusals raised by a query builder when asked for an
/// operation the target entity cannot honour.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("entity '{entity}' does not support soft-delete scoping")]
    SoftDeleteUnsupported { entity: String },

    #[error("entity '{entity}' has no relation '{relation}'")]
    UnknownRelation { entity: String, relation: String },

    #[error("{operation} is not supported by this query")]
    Unsupported { operation: &'static str },
}

///
/// QueryBuilder
///
/// Mutable, side-effect-free builder for one read or write operation.
/// Nothing touches storage until the host issues a terminal call.
///

pub trait QueryBuilder {
    /// Join `predicate` onto the accumulated filter.
    fn filter(&mut self, conjunction: Conjunction, predicate: Predicate)
    -> Result<(), QueryError>;

    /// Append a sort key.
    fn order_by(&mut self, field: &str, direction: OrderDirection) -> Result<(), QueryError>;

    fn select(&mut self, projection: Projection) -> Result<(), QueryError>;

    fn limit(&mut self, limit: u32) -> Result<(), QueryError>;

    fn offset(&mut self, offset: u32) -> Result<(), QueryError>;

    /// Eagerly include a named relation.
    fn with_relation(&mut self, relation: &str) -> Result<(), QueryError> {
        let _ = relation;

        Err(QueryError::Unsupported {
            operation: "relation inclusion",
        })
    }

    /// Replace the soft-delete scope.
    ///
    /// Entities without soft-delete support must refuse rather than ignore.
    fn soft_delete_scope(&mut self, scope: SoftDeleteScope) -> Result<(), QueryError> {
        let _ = scope;

        Err(QueryError::Unsupported {
            operation: "soft-delete scoping",
        })
    }
}

///
/// Queryable
///
/// Entity descriptor a compilation starts from.
///

pub trait Queryable {
    type Query: QueryBuilder;

    /// Table name of the primary entity.
    fn table(&self) -> &str;

    /// Fresh, unfiltered query over this entity.
    fn query(&self) -> Self::Query;

    /// Projection used when no `columns` directive is present.
    fn default_projection(&self) -> Projection {
        Projection::AllOf(self.table().to_string())
    }
}
