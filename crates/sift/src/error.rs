use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use sift_core::error::{CompileError, ErrorClass};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///
/// Serializes as `{"kind": "...", "directive": "...", "message": "..."}` so
/// hosts can echo it in a response body.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            directive: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// HTTP status a host should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::ClientInput => 400,
            ErrorClass::Internal => 500,
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        let kind = match err {
            CompileError::UnknownDirective { .. } => ErrorKind::UnknownDirective,
            CompileError::MalformedArgument { .. } => ErrorKind::MalformedArgument,
            CompileError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            CompileError::DefaultProjection { .. } => ErrorKind::Internal,
        };

        let error = Self::new(kind, err.to_string());
        match err.directive() {
            Some(directive) => error.with_directive(directive),
            None => error,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Parameter name with no registered directive.
    UnknownDirective,

    /// Directive argument that does not fit its shape.
    MalformedArgument,

    /// Well-formed directive the target entity cannot honour.
    UnsupportedOperation,

    /// Invalid service configuration. The caller cannot remediate this.
    Config,

    /// The host's entity or query refused work no directive asked for.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::UnknownDirective | Self::MalformedArgument | Self::UnsupportedOperation => {
                ErrorClass::ClientInput
            }
            Self::Config | Self::Internal => ErrorClass::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnknownDirective => "unknown_directive",
            Self::MalformedArgument => "malformed_argument",
            Self::UnsupportedOperation => "unsupported_operation",
            Self::Config => "config",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::{
        compiler::compile,
        decode::parse_query_string,
        query::{QueryError, model::EntityModel},
    };

    const NOTES: EntityModel = EntityModel::new("Note", "notes");

    fn compile_error(query: &str) -> Error {
        compile(&parse_query_string(query), &NOTES)
            .map(|_| ())
            .unwrap_err()
            .into()
    }

    #[test]
    fn compile_errors_map_to_client_kinds() {
        let unknown = compile_error("sort=name");
        let malformed = compile_error("limit=ten");
        let unsupported = compile_error("with_trashed");

        assert_eq!(unknown.kind, ErrorKind::UnknownDirective);
        assert_eq!(malformed.kind, ErrorKind::MalformedArgument);
        assert_eq!(unsupported.kind, ErrorKind::UnsupportedOperation);

        for err in [unknown, malformed, unsupported] {
            assert_eq!(err.status_code(), 400);
            assert!(err.class().is_client_input());
        }
    }

    #[test]
    fn config_errors_are_internal() {
        let err: Error = ConfigError::ZeroPageSize.into();

        assert_eq!(err.kind, ErrorKind::Config);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.directive, None);
    }

    #[test]
    fn refused_default_projection_is_internal() {
        let err: Error = CompileError::DefaultProjection {
            table: "notes".to_string(),
            source: QueryError::Unsupported {
                operation: "whole-table projection",
            },
        }
        .into();

        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.directive, None);
        assert_eq!(
            serde_json::to_value(&err).unwrap()["kind"],
            serde_json::json!("internal")
        );
    }

    #[test]
    fn error_serializes_for_response_bodies() {
        let err = compile_error("sort=name");

        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({
                "kind": "unknown_directive",
                "directive": "sort",
                "message": "unknown directive 'sort'",
            })
        );

        let config: Error = ConfigError::ZeroPageSize.into();
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            serde_json::json!({
                "kind": "config",
                "message": "default_per_page must be greater than zero",
            })
        );
    }

    #[test]
    fn error_round_trips_through_json() {
        let err = compile_error("limit=ten");
        let text = serde_json::to_string(&err).unwrap();

        assert_eq!(serde_json::from_str::<Error>(&text).unwrap(), err);
        assert_eq!(err.kind.to_string(), "malformed_argument");
    }
}
