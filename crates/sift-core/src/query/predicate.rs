use crate::query::{Conjunction, value::Value};

///
/// Predicate AST
///
/// Schema-agnostic filter tree produced by filter directives.
/// No field validation happens here; unknown fields simply never match.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
}

impl CompareOp {
    /// Parse the operator token used in `field:op:value` arguments.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "eq" => Self::Eq,
            "ne" | "noteq" => Self::Ne,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lk" => Self::Like,
            "nlk" => Self::NotLike,
            _ => return None,
        };

        Some(op)
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Like => "lk",
            Self::NotLike => "nlk",
        }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    And(Vec<Self>),
    Or(Vec<Self>),
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
        negated: bool,
    },
    Between {
        field: String,
        low: Value,
        high: Value,
        negated: bool,
    },
    IsNull {
        field: String,
        negated: bool,
    },
}

impl Predicate {
    #[must_use]
    pub fn compare(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value,
        }
    }

    #[must_use]
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::IsNull {
            field: field.into(),
            negated: false,
        }
    }

    #[must_use]
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::IsNull {
            field: field.into(),
            negated: true,
        }
    }

    /// Join `next` onto an optional accumulated predicate.
    ///
    /// The first predicate becomes the root whatever its conjunction;
    /// later ones nest left-associatively.
    #[must_use]
    pub fn join(existing: Option<Self>, conjunction: Conjunction, next: Self) -> Self {
        match (existing, conjunction) {
            (None, _) => next,
            (Some(existing), Conjunction::And) => Self::And(vec![existing, next]),
            (Some(existing), Conjunction::Or) => Self::Or(vec![existing, next]),
        }
    }
}
