use crate::query::QueryError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Coarse classification used by hosts to pick a response status.
/// Client-input errors originate from caller-controlled parameters.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    ClientInput,
    Internal,
}

impl ErrorClass {
    /// True if the caller can remediate this by changing the request.
    #[must_use]
    pub const fn is_client_input(self) -> bool {
        matches!(self, Self::ClientInput)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ClientInput => "client_input",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ArgumentError
///
/// Shape violations detected while tokenizing one raw directive argument.
/// Carries no directive context; the compiler attaches it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ArgumentError {
    #[error("expected {expected}")]
    Shape { expected: &'static str },

    #[error("field name is empty")]
    EmptyField,

    #[error("unknown comparison operator '{0}'")]
    UnknownOperator(String),

    #[error("'{0}' is not a non-negative integer")]
    NotAnInteger(String),

    #[error("'{raw}' exceeds the maximum of {max}")]
    OutOfRange { raw: String, max: u32 },

    #[error("range bound '{0}' is not numeric")]
    NonNumericBound(String),

    #[error("unknown soft-delete scope '{0}'")]
    UnknownScope(String),
}

///
/// CompileError
///
/// Failures that abort a compilation. Every variant is caused by the
/// request parameters and must be reported to the caller as a bad request.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("unknown directive '{name}'")]
    UnknownDirective { name: String },

    #[error("malformed argument '{raw}' for directive '{directive}': {source}")]
    MalformedArgument {
        directive: String,
        raw: String,
        #[source]
        source: ArgumentError,
    },

    #[error("directive '{directive}' rejected: {source}")]
    UnsupportedOperation {
        directive: String,
        #[source]
        source: QueryError,
    },

    /// The entity refused its own default projection; no directive is at fault.
    #[error("default projection of table '{table}' rejected: {source}")]
    DefaultProjection {
        table: String,
        #[source]
        source: QueryError,
    },
}

impl CompileError {
    pub(crate) fn unknown_directive(name: impl Into<String>) -> Self {
        Self::UnknownDirective { name: name.into() }
    }

    pub(crate) fn malformed(
        directive: impl Into<String>,
        raw: impl Into<String>,
        source: ArgumentError,
    ) -> Self {
        Self::MalformedArgument {
            directive: directive.into(),
            raw: raw.into(),
            source,
        }
    }

    pub(crate) fn unsupported(directive: impl Into<String>, source: QueryError) -> Self {
        Self::UnsupportedOperation {
            directive: directive.into(),
            source,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownDirective { .. }
            | Self::MalformedArgument { .. }
            | Self::UnsupportedOperation { .. } => ErrorClass::ClientInput,
            Self::DefaultProjection { .. } => ErrorClass::Internal,
        }
    }

    /// Name of the directive that caused the failure, if one did.
    #[must_use]
    pub fn directive(&self) -> Option<&str> {
        match self {
            Self::UnknownDirective { name } => Some(name),
            Self::MalformedArgument { directive, .. }
            | Self::UnsupportedOperation { directive, .. } => Some(directive),
            Self::DefaultProjection { .. } => None,
        }
    }
}
